use thiserror::Error;

/// Administrative regions offered by the single-entry flow, in display order.
pub const REGIONS: [&str; 28] = [
    "Dar es Salaam",
    "Arusha",
    "Dodoma",
    "Mwanza",
    "Kilimanjaro",
    "Mbeya",
    "Morogoro",
    "Tanga",
    "Geita",
    "Kagera",
    "Mara",
    "Tabora",
    "Manyara",
    "Kigoma",
    "Mtwara",
    "Lindi",
    "Ruvuma",
    "Iringa",
    "Njombe",
    "Songwe",
    "Rukwa",
    "Katavi",
    "Shinyanga",
    "Simiyu",
    "Singida",
    "Pwani",
    "Zanzibar (Unguja)",
    "Pemba",
];

/// Country written into every record unless the caller overrides it.
pub const DEFAULT_COUNTRY: &str = "Tanzania";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegionError {
    #[error("unknown region '{0}' (see `qrcard regions list`)")]
    Unknown(String),
}

/// Lookup helpers over [`REGIONS`].
pub struct RegionCatalog;

impl RegionCatalog {
    pub fn list() -> &'static [&'static str] {
        &REGIONS
    }

    /// Region preselected for a fresh single-entry record.
    pub fn default_region() -> &'static str {
        REGIONS[0]
    }

    /// Resolve a region by name (case-insensitive), returning the catalog spelling.
    pub fn resolve(name: &str) -> Result<&'static str, RegionError> {
        let wanted = name.trim();
        REGIONS
            .iter()
            .copied()
            .find(|region| region.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| RegionError::Unknown(name.to_string()))
    }

    pub fn contains(name: &str) -> bool {
        Self::resolve(name).is_ok()
    }
}
