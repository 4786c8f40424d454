//! Bulk text parser: turns pasted, loosely formatted contact lists into records.
//!
//! The parser is a single pass over the input lines carrying two pieces of
//! state, the region announced by the latest header and the contact currently
//! being filled. It never fails; lines it cannot place are dropped.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use crate::core::contact::{ContactRecord, PhoneEntry};
use crate::core::regions::DEFAULT_COUNTRY;

/// Glyph marking a region header line (`📍 Arusha REGION`).
pub const REGION_MARKER: char = '\u{1F4CD}';

static NUMBERED_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+[.)]\s*").expect("numbered prefix regex"));
static REGION_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)region").expect("region word regex"));
static PHONE_LIKE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+0-9\s\-()]{9,}$").expect("phone regex"));

/// Parse a whole paste into contact records, in input order.
pub fn parse(raw_text: &str) -> Vec<ContactRecord> {
    let records = raw_text
        .lines()
        .fold(ParserState::new(), ParserState::feed)
        .finish();
    debug!(count = records.len(), "bulk parse finished");
    records
}

/// How a normalized line drives the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    /// Region header with the marker and the word "region" removed.
    RegionHeader(String),
    /// `1.` / `2)` style marker; carries whatever follows the marker.
    NumberedTrigger(&'a str),
    /// `First Name ...` or `Name: ...`; the whole line is still content.
    LabelTrigger,
    Content,
}

/// Contact field addressed by a `key: value` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FirstName,
    LastName,
    Company,
    JobTitle,
    Email,
    Website,
    Street,
    Phones,
}

impl Field {
    /// Match a lowercased key by substring, English and Swahili keywords alike.
    pub fn for_key(key: &str) -> Option<Field> {
        let has = |words: &[&str]| words.iter().any(|w| key.contains(w));
        if key.contains("first") || key == "name" {
            Some(Field::FirstName)
        } else if key.contains("last") {
            Some(Field::LastName)
        } else if has(&["company", "org", "biashara"]) {
            Some(Field::Company)
        } else if has(&["job", "title", "cheo"]) {
            Some(Field::JobTitle)
        } else if has(&["email", "barua"]) {
            Some(Field::Email)
        } else if has(&["web", "url"]) {
            Some(Field::Website)
        } else if has(&["address", "loc", "anwani"]) {
            Some(Field::Street)
        } else if has(&["phone", "mobile", "simu", "tel"]) {
            Some(Field::Phones)
        } else {
            None
        }
    }

    /// Store `value`; scalar fields are overwritten, phones accumulate.
    pub fn apply(self, contact: &mut ContactRecord, value: &str) {
        let slot = match self {
            Field::FirstName => &mut contact.first_name,
            Field::LastName => &mut contact.last_name,
            Field::Company => &mut contact.company,
            Field::JobTitle => &mut contact.job_title,
            Field::Email => &mut contact.email,
            Field::Website => &mut contact.website,
            Field::Street => &mut contact.street,
            Field::Phones => {
                push_phone_list(contact, value);
                return;
            }
        };
        *slot = value.to_string();
    }
}

/// Tabs become spaces, surrounding whitespace and byte-order marks go.
pub fn normalize_line(raw: &str) -> String {
    raw.replace('\t', " ")
        .trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
        .to_string()
}

/// Classify an already normalized line.
pub fn classify_line(line: &str) -> LineKind<'_> {
    if line.is_empty() {
        return LineKind::Blank;
    }
    if line.contains(REGION_MARKER) {
        let without_marker = line.replacen(REGION_MARKER, "", 1);
        let region = REGION_WORD.replacen(&without_marker, 1, "");
        return LineKind::RegionHeader(region.trim().to_string());
    }
    if let Some(prefix) = NUMBERED_PREFIX.find(line) {
        return LineKind::NumberedTrigger(&line[prefix.end()..]);
    }
    let lower = line.to_lowercase();
    if lower.starts_with("first name") || lower.starts_with("name:") {
        return LineKind::LabelTrigger;
    }
    LineKind::Content
}

/// Carried state of the bulk parser.
#[derive(Debug, Clone)]
pub struct ParserState {
    current_region: String,
    current: Option<ContactRecord>,
    records: Vec<ContactRecord>,
}

impl Default for ParserState {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserState {
    pub fn new() -> Self {
        Self {
            current_region: DEFAULT_COUNTRY.to_string(),
            current: None,
            records: Vec::new(),
        }
    }

    /// Fold step: consume one raw line.
    pub fn feed(mut self, raw_line: &str) -> Self {
        self.step(raw_line);
        self
    }

    pub fn step(&mut self, raw_line: &str) {
        let line = normalize_line(raw_line);
        let content = match classify_line(&line) {
            LineKind::Blank => return,
            LineKind::RegionHeader(region) => {
                debug!(region = %region, "region header");
                self.current_region = region;
                return;
            }
            LineKind::NumberedTrigger(rest) => {
                self.start_contact();
                if rest.is_empty() {
                    return;
                }
                rest
            }
            LineKind::LabelTrigger => {
                self.start_contact();
                line.as_str()
            }
            LineKind::Content => line.as_str(),
        };
        match self.current.as_mut() {
            Some(contact) => assign_content(contact, content),
            None => trace!(line = content, "no open contact; line dropped"),
        }
    }

    pub fn current_region(&self) -> &str {
        &self.current_region
    }

    pub fn open_contact(&self) -> Option<&ContactRecord> {
        self.current.as_ref()
    }

    /// Records closed so far.
    pub fn records(&self) -> &[ContactRecord] {
        &self.records
    }

    /// Close the open contact and hand back everything emitted.
    pub fn finish(mut self) -> Vec<ContactRecord> {
        self.close_current();
        self.records
    }

    fn start_contact(&mut self) {
        if self
            .current
            .as_ref()
            .is_some_and(ContactRecord::is_emittable)
        {
            self.close_current();
        }
        if self.current.is_none() {
            self.current = Some(ContactRecord::in_region(self.current_region.clone()));
        }
    }

    fn close_current(&mut self) {
        match self.current.take() {
            Some(contact) if contact.is_emittable() => {
                debug!(
                    name = %contact.display_name(),
                    region = %contact.region,
                    phones = contact.phones.len(),
                    "contact closed"
                );
                self.records.push(contact);
            }
            Some(_) => trace!("dropping contact without name or phone"),
            None => {}
        }
    }
}

/// Fill a field from `content`. For numbered lines this is the text after the
/// marker, so `1. www.acme.co.tz` is a website rather than a name.
fn assign_content(contact: &mut ContactRecord, content: &str) {
    if let Some((key, value)) = content.split_once(':') {
        let key = key.trim().to_lowercase();
        match Field::for_key(&key) {
            Some(field) => field.apply(contact, value.trim()),
            None => trace!(key = %key, "unrecognised key ignored"),
        }
        return;
    }

    let lower = content.to_lowercase();
    if content.contains('@') && content.contains('.') {
        contact.email = content.to_string();
    } else if lower.starts_with("http") || lower.starts_with("www") {
        contact.website = content.to_string();
    } else if PHONE_LIKE.is_match(content) {
        contact.phones.push(PhoneEntry::cell(content));
    } else if contact.first_name.is_empty() {
        // Counted in scalar values; UTF-16 units would count astral chars twice.
        let len = content.chars().count();
        if len > 2 && len < 40 {
            assign_name(contact, content);
        }
    }
}

fn assign_name(contact: &mut ContactRecord, content: &str) {
    match content.split_once(' ') {
        Some((first, rest)) => {
            contact.first_name = first.to_string();
            contact.last_name = rest.to_string();
        }
        None => contact.first_name = content.to_string(),
    }
}

fn push_phone_list(contact: &mut ContactRecord, value: &str) {
    for fragment in value.split(['/', ',']) {
        let number = fragment.trim();
        // Scalar values, not UTF-16 units.
        if number.chars().count() > 3 {
            contact.phones.push(PhoneEntry::cell(number));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::contact::PhoneLabel;
    use pretty_assertions::assert_eq;

    fn numbers(record: &ContactRecord) -> Vec<&str> {
        record.phones.iter().map(|p| p.number.as_str()).collect()
    }

    #[test]
    fn classifies_lines_in_precedence_order() {
        assert_eq!(classify_line(""), LineKind::Blank);
        assert_eq!(
            classify_line("\u{1F4CD} Arusha REGION"),
            LineKind::RegionHeader("Arusha".to_string())
        );
        // A header wins even when it also looks numbered.
        assert_eq!(
            classify_line("1. \u{1F4CD} Mbeya region"),
            LineKind::RegionHeader("1.  Mbeya".to_string())
        );
        assert_eq!(classify_line("12) Asha"), LineKind::NumberedTrigger("Asha"));
        assert_eq!(classify_line("3."), LineKind::NumberedTrigger(""));
        assert_eq!(classify_line("First Name: Asha"), LineKind::LabelTrigger);
        assert_eq!(classify_line("NAME: Asha"), LineKind::LabelTrigger);
        assert_eq!(classify_line("Name Asha"), LineKind::Content);
        assert_eq!(classify_line("0755 111 222"), LineKind::Content);
    }

    #[test]
    fn keys_match_by_substring() {
        assert_eq!(Field::for_key("first_name"), Some(Field::FirstName));
        assert_eq!(Field::for_key("name"), Some(Field::FirstName));
        assert_eq!(Field::for_key("full name"), None);
        assert_eq!(Field::for_key("surname / last"), Some(Field::LastName));
        assert_eq!(Field::for_key("jina la biashara"), Some(Field::Company));
        assert_eq!(Field::for_key("organisation"), Some(Field::Company));
        assert_eq!(Field::for_key("job title"), Some(Field::JobTitle));
        assert_eq!(Field::for_key("cheo"), Some(Field::JobTitle));
        assert_eq!(Field::for_key("barua pepe"), Some(Field::Email));
        assert_eq!(Field::for_key("website"), Some(Field::Website));
        assert_eq!(Field::for_key("location"), Some(Field::Street));
        assert_eq!(Field::for_key("anwani"), Some(Field::Street));
        assert_eq!(Field::for_key("namba ya simu"), Some(Field::Phones));
        assert_eq!(Field::for_key("tel"), Some(Field::Phones));
        assert_eq!(Field::for_key("notes"), None);
    }

    #[test]
    fn parse_never_fails_on_odd_input() {
        assert!(parse("").is_empty());
        assert!(parse("   \n\t\n  ").is_empty());
        assert!(parse("\u{0}\u{FFFD}\u{7F}::::\n)))((\n1)").is_empty());
        assert!(parse(":\n\u{1F4CD}\n1.\n:").is_empty());
    }

    #[test]
    fn region_header_carries_over_until_next_header() {
        let input = "\u{1F4CD} Mwanza REGION\n1. Asha Juma\n2. Baraka Ally\n\u{1F4CD} Region Tanga\n3. Neema Said";
        let records = parse(input);
        let regions: Vec<&str> = records.iter().map(|r| r.region.as_str()).collect();
        assert_eq!(regions, vec!["Mwanza", "Mwanza", "Tanga"]);

        // A header inside an open contact only affects the next one.
        let records = parse("1. Asha Juma\n\u{1F4CD} Tanga REGION\nPhone: 0755111222\n2. Baraka");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].first_name, "Asha");
        assert_eq!(records[0].region, "Tanzania");
        assert_eq!(numbers(&records[0]), vec!["0755111222"]);
        assert_eq!(records[1].first_name, "Baraka");
        assert_eq!(records[1].region, "Tanga");
    }

    #[test]
    fn byte_order_mark_does_not_hide_first_entry() {
        assert_eq!(normalize_line("\u{FEFF}1. John Mwita "), "1. John Mwita");
        let records = parse("\u{FEFF}1. John Mwita\nPhone: 0755123456\n2. Jane Doe\nPhone: 0766111222");
        let names: Vec<&str> = records.iter().map(|r| r.first_name.as_str()).collect();
        assert_eq!(names, vec!["John", "Jane"]);
        assert_eq!(numbers(&records[0]), vec!["0755123456"]);
    }

    #[test]
    fn numbered_remainder_is_checked_for_website() {
        let records = parse("1. www.acme.co.tz\nPhone: 0755123456");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].website, "www.acme.co.tz");
        assert_eq!(records[0].first_name, "");
    }

    #[test]
    fn lengths_count_chars_not_utf16_units() {
        let smile = "\u{1F600}";
        assert!(parse(&format!("1. {}", smile.repeat(2))).is_empty());
        let records = parse(&format!("1. {}", smile.repeat(39)));
        assert_eq!(records[0].first_name, smile.repeat(39));
        let records = parse(&format!("Name: Asha\nPhone: {}", "\u{10000}".repeat(4)));
        assert_eq!(records[0].phones.len(), 1);
    }

    #[test]
    fn region_defaults_to_country_without_header() {
        let records = parse("1. Asha Juma");
        assert_eq!(records[0].region, "Tanzania");
        assert_eq!(records[0].country, "Tanzania");
    }

    #[test]
    fn phone_list_splits_on_slash_and_comma() {
        let records = parse("Name: Asha\nPhone: 0755111222/0766333444 , 0777 888 999, 12");
        assert_eq!(
            numbers(&records[0]),
            vec!["0755111222", "0766333444", "0777 888 999"]
        );
        assert!(records[0].phones.iter().all(|p| p.label == PhoneLabel::Cell));
    }

    #[test]
    fn nameless_phoneless_contact_is_dropped() {
        let records = parse("1.\nCompany: Ghost Ltd\n2. Asha\nCompany: Real Ltd");
        assert_eq!(records.len(), 1);
        // The empty contact is reused by the next trigger, so the first company
        // survives until it is overwritten.
        assert_eq!(records[0].first_name, "Asha");
        assert_eq!(records[0].company, "Real Ltd");
    }

    #[test]
    fn trigger_reuses_open_empty_contact() {
        let records = parse("1.\nEmail: a@b.co\n2. Asha");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].email, "a@b.co");
        assert_eq!(records[0].first_name, "Asha");
    }

    #[test]
    fn heuristics_fill_unlabelled_lines() {
        let input = "1. Peter Kassim\npeter@kassim.co.tz\nwww.kassim.co.tz\n+255 (0) 755-123-456\nSenior Engineer Of Things";
        let records = parse(input);
        let r = &records[0];
        assert_eq!(r.first_name, "Peter");
        assert_eq!(r.last_name, "Kassim");
        assert_eq!(r.email, "peter@kassim.co.tz");
        assert_eq!(r.website, "www.kassim.co.tz");
        assert_eq!(numbers(r), vec!["+255 (0) 755-123-456"]);
        // First name already set; plain text is dropped.
        assert_eq!(r.job_title, "");
    }

    #[test]
    fn name_heuristic_respects_length_window() {
        assert!(parse("1. Al").is_empty());
        let long = format!("1. {}", "x".repeat(40));
        assert!(parse(&long).is_empty());
        let records = parse("1. Ali");
        assert_eq!(records[0].first_name, "Ali");
        assert_eq!(records[0].last_name, "");
    }

    #[test]
    fn name_split_keeps_remaining_tokens() {
        let records = parse("1. Mary Jane  Watson");
        assert_eq!(records[0].first_name, "Mary");
        assert_eq!(records[0].last_name, "Jane  Watson");
    }

    #[test]
    fn colon_values_keep_later_colons_and_last_write_wins() {
        let records = parse("Name: Asha\nWebsite: https://asha.example\nCompany: One\nCompany: Two");
        assert_eq!(records[0].website, "https://asha.example");
        assert_eq!(records[0].company, "Two");
    }

    #[test]
    fn bare_url_with_scheme_is_read_as_unknown_key() {
        let records = parse("1. Asha\nhttps://asha.example");
        assert_eq!(records[0].website, "");
        let records = parse("1. Asha\nHTTP-ONLY.example");
        assert_eq!(records[0].website, "HTTP-ONLY.example");
    }

    #[test]
    fn tabs_are_treated_as_spaces() {
        let records = parse("1.\tAsha\tJuma\nPhone:\t0755111222");
        assert_eq!(records[0].first_name, "Asha");
        assert_eq!(records[0].last_name, "Juma");
        assert_eq!(numbers(&records[0]), vec!["0755111222"]);
    }

    #[test]
    fn state_exposes_transitions() {
        let mut state = ParserState::new();
        state.step("\u{1F4CD} Dodoma REGION");
        assert_eq!(state.current_region(), "Dodoma");
        assert!(state.open_contact().is_none());
        state.step("0712345678");
        assert!(state.open_contact().is_none());
        state.step("1. Asha");
        assert_eq!(state.open_contact().map(|c| c.region.as_str()), Some("Dodoma"));
        state.step("2. Baraka");
        assert_eq!(state.records().len(), 1);
        assert_eq!(state.finish().len(), 2);
    }
}
