//! Core domain: contact records, the bulk text parser, and card payloads.

pub mod contact;
pub mod parser;
pub mod payload;
pub mod regions;

pub use contact::{ContactRecord, PhoneEntry, PhoneLabel};
pub use parser::{Field, LineKind, ParserState, REGION_MARKER, classify_line, parse};
pub use payload::{DEFAULT_DIAL_PREFIX, normalize_number, serialize};
pub use regions::{DEFAULT_COUNTRY, REGIONS, RegionCatalog, RegionError};
