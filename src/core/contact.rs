use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::regions::{DEFAULT_COUNTRY, RegionCatalog};

/// vCard type tag attached to a phone number.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum PhoneLabel {
    #[default]
    Cell,
    Work,
    Home,
    Fax,
}

impl PhoneLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhoneLabel::Cell => "CELL",
            PhoneLabel::Work => "WORK",
            PhoneLabel::Home => "HOME",
            PhoneLabel::Fax => "FAX",
        }
    }
}

impl fmt::Display for PhoneLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PhoneLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CELL" | "MOBILE" => Ok(PhoneLabel::Cell),
            "WORK" => Ok(PhoneLabel::Work),
            "HOME" => Ok(PhoneLabel::Home),
            "FAX" => Ok(PhoneLabel::Fax),
            other => Err(format!(
                "unknown phone label '{}' (expected CELL, WORK, HOME or FAX)",
                other
            )),
        }
    }
}

/// One phone number exactly as typed or parsed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhoneEntry {
    pub number: String,
    #[serde(default)]
    pub label: PhoneLabel,
}

impl PhoneEntry {
    pub fn new<S: Into<String>>(number: S, label: PhoneLabel) -> Self {
        Self {
            number: number.into(),
            label,
        }
    }

    pub fn cell<S: Into<String>>(number: S) -> Self {
        Self::new(number, PhoneLabel::Cell)
    }
}

/// A single contact as fed to the card payload serializer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ContactRecord {
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub job_title: String,
    pub email: String,
    pub website: String,
    pub street: String,
    pub region: String,
    pub country: String,
    pub phones: Vec<PhoneEntry>,
}

impl Default for ContactRecord {
    fn default() -> Self {
        Self::in_region(RegionCatalog::default_region())
    }
}

impl ContactRecord {
    /// Empty record placed in `region` with the default country.
    pub fn in_region<S: Into<String>>(region: S) -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            company: String::new(),
            job_title: String::new(),
            email: String::new(),
            website: String::new(),
            street: String::new(),
            region: region.into(),
            country: DEFAULT_COUNTRY.to_string(),
            phones: Vec::new(),
        }
    }

    /// A record may only be emitted once it carries a first name or a phone.
    pub fn is_emittable(&self) -> bool {
        !self.first_name.is_empty() || !self.phones.is_empty()
    }

    /// "First Last", without dangling spaces.
    pub fn display_name(&self) -> String {
        match (self.first_name.is_empty(), self.last_name.is_empty()) {
            (false, false) => format!("{} {}", self.first_name, self.last_name),
            (false, true) => self.first_name.clone(),
            (true, false) => self.last_name.clone(),
            (true, true) => String::new(),
        }
    }
}
