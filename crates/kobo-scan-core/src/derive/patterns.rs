//! Regex patterns for birth date encodings.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Any of the accepted day/month/year separators
    pub static ref DATE_DELIMITER: Regex = Regex::new(r"[./\-]").unwrap();

    // YYMMDD without separators, as printed in machine-readable zones.
    // ASCII digits only, so byte slicing stays on char boundaries.
    pub static ref COMPACT_YYMMDD: Regex = Regex::new(r"^[0-9]{6}$").unwrap();
}
