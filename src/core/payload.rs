//! vCard 2.1 payload embedded in the generated codes.
//!
//! Every line is always present, even when its value is empty, because
//! readers expect the fixed field layout. Values are written verbatim.

use crate::core::contact::{ContactRecord, PhoneEntry};

/// Dial prefix used by the CLI unless configured otherwise.
pub const DEFAULT_DIAL_PREFIX: &str = "+255";

/// Serialize `record` into a vCard payload.
///
/// When `dial_prefix` is given, a phone number starting with `0` (after all
/// whitespace is removed) has that `0` replaced by the prefix. Without a
/// prefix numbers are only stripped of whitespace.
pub fn serialize(record: &ContactRecord, dial_prefix: Option<&str>) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(10 + record.phones.len());
    lines.push("BEGIN:VCARD".to_string());
    lines.push("VERSION:2.1".to_string());
    lines.push(format!("N:{};{}", record.last_name, record.first_name));
    lines.push(format!("FN:{} {}", record.first_name, record.last_name));
    lines.push(format!("ORG:{}", record.company));
    lines.push(format!("TITLE:{}", record.job_title));
    for phone in &record.phones {
        lines.push(phone_line(phone, dial_prefix));
    }
    lines.push(format!(
        "ADR;WORK;PREF:;;{};{};;;{}",
        record.street, record.region, record.country
    ));
    lines.push(format!("EMAIL;WORK;INTERNET:{}", record.email));
    lines.push(format!("URL:{}", record.website));
    lines.push("END:VCARD".to_string());
    lines.join("\n")
}

/// Remove whitespace and apply the dial prefix to a leading `0`.
pub fn normalize_number(number: &str, dial_prefix: Option<&str>) -> String {
    let compact: String = number.chars().filter(|c| !c.is_whitespace()).collect();
    match (dial_prefix, compact.strip_prefix('0')) {
        (Some(prefix), Some(rest)) => format!("{prefix}{rest}"),
        _ => compact,
    }
}

fn phone_line(phone: &PhoneEntry, dial_prefix: Option<&str>) -> String {
    format!(
        "TEL;{};VOICE:{}",
        phone.label,
        normalize_number(&phone.number, dial_prefix)
    )
}
