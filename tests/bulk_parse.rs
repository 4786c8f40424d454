use pretty_assertions::assert_eq;
use qrcard::{ContactRecord, PhoneEntry, PhoneLabel, parse, serialize};

fn contact(first: &str, last: &str, region: &str, phones: &[&str]) -> ContactRecord {
    let mut record = ContactRecord::in_region(region);
    record.first_name = first.to_string();
    record.last_name = last.to_string();
    record.phones = phones.iter().map(|n| PhoneEntry::cell(*n)).collect();
    record
}

#[test]
fn numbered_entries_split_into_two_contacts() {
    let input = "1. John Mwita\nPhone: 0755123456\n\n2. Jane Doe\nCompany: Acme\nPhone: 0766111222";
    let mut jane = contact("Jane", "Doe", "Tanzania", &["0766111222"]);
    jane.company = "Acme".to_string();
    assert_eq!(
        parse(input),
        vec![contact("John", "Mwita", "Tanzania", &["0755123456"]), jane]
    );
}

#[test]
fn region_header_applies_to_following_contact() {
    let input = "\u{1F4CD} Arusha REGION\n\n1. Neema Lukumay\nSimu: 0713 000 111";
    let records = parse(input);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].region, "Arusha");
    assert_eq!(records[0].country, "Tanzania");
}

#[test]
fn unlabelled_name_line_fills_first_and_last_name() {
    let records = parse("1.\nPeter Kassim\nMobile: 0789 555 000");
    assert_eq!(records[0].first_name, "Peter");
    assert_eq!(records[0].last_name, "Kassim");
}

#[test]
fn phone_without_open_contact_is_dropped() {
    assert!(parse("0712345678").is_empty());
}

#[test]
fn slash_separated_phones_accumulate() {
    let records = parse("Name: Halima\nPhone: 0755111222/0766333444");
    assert_eq!(
        records[0].phones,
        vec![
            PhoneEntry::new("0755111222", PhoneLabel::Cell),
            PhoneEntry::new("0766333444", PhoneLabel::Cell),
        ]
    );
}

#[test]
fn contact_without_name_or_phone_is_not_emitted() {
    let input = "1.\nCompany: Nobody Ltd\nEmail: info@nobody.co.tz";
    assert!(parse(input).is_empty());
}

#[test]
fn swahili_labels_fill_fields() {
    let input = "Name: Baraka\nJina la biashara: Duka Letu\nCheo: Meneja\nBarua pepe: baraka@duka.co.tz\nAnwani: Kariakoo\nSimu: 0744 222 333, 0655 444 555";
    let records = parse(input);
    let r = &records[0];
    assert_eq!(r.first_name, "Baraka");
    assert_eq!(r.company, "Duka Letu");
    assert_eq!(r.job_title, "Meneja");
    assert_eq!(r.email, "baraka@duka.co.tz");
    assert_eq!(r.street, "Kariakoo");
    assert_eq!(r.phones.len(), 2);
}

#[test]
fn label_trigger_starts_a_new_contact() {
    let input = "First Name: Asha\nLast Name: Juma\nPhone: 0700000001\nFirst Name: Ali\nPhone: 0700000002";
    let records = parse(input);
    let names: Vec<(&str, &str)> = records
        .iter()
        .map(|r| (r.first_name.as_str(), r.last_name.as_str()))
        .collect();
    assert_eq!(names, vec![("Asha", "Juma"), ("Ali", "")]);
}

#[test]
fn mixed_paste_with_regions_and_garbage() {
    let input = "\
CONTACT LIST 2026
\u{1F4CD} DODOMA REGION
1) Mussa Hamisi
   Title:\tDistrict Officer
   mussa.hamisi@example.go.tz
   +255 754 000 111

2)
Name: Rehema
www.rehema.example
\u{1F4CD} Mwanza region
3. Joseph
0688-123-456
random trailing words that are far too long to be a name ok
";
    let records = parse(input);
    assert_eq!(records.len(), 3);

    assert_eq!(records[0].first_name, "Mussa");
    assert_eq!(records[0].job_title, "District Officer");
    assert_eq!(records[0].email, "mussa.hamisi@example.go.tz");
    assert_eq!(records[0].phones[0].number, "+255 754 000 111");
    assert_eq!(records[0].region, "DODOMA");

    assert_eq!(records[1].first_name, "Rehema");
    assert_eq!(records[1].website, "www.rehema.example");
    assert_eq!(records[1].region, "DODOMA");

    assert_eq!(records[2].first_name, "Joseph");
    assert_eq!(records[2].phones[0].number, "0688-123-456");
    assert_eq!(records[2].region, "Mwanza");
}

#[test]
fn parsing_is_repeatable() {
    let input = "1. John Mwita\nPhone: 0755123456\n2. Jane Doe";
    assert_eq!(parse(input), parse(input));
}

#[test]
fn parsed_records_serialize_with_dial_prefix() {
    let records = parse("1. John Mwita\nPhone: 0755 123 456");
    let payload = serialize(&records[0], Some("+255"));
    assert!(payload.contains("\nTEL;CELL;VOICE:+255755123456\n"));
    assert!(payload.contains("\nADR;WORK;PREF:;;;Tanzania;;;Tanzania\n"));
    assert_eq!(payload, serialize(&records[0].clone(), Some("+255")));
}
