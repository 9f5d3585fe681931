//! Address normalization.
//!
//! Province, district and village are not separate SDK fields. They come from
//! the "additional address information" string, split on whitespace and
//! assigned by position. This is a fixed-format assumption: a multi-word
//! province shifts every following token, and extra tokens are dropped.

/// Positional parts of the additional address information.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressParts {
    pub province: String,
    pub district: String,
    pub village: String,
}

/// Split `info` into its first three whitespace-separated tokens.
pub fn split_address_parts(info: &str) -> AddressParts {
    let mut tokens = info.split_whitespace().map(str::to_string);

    AddressParts {
        province: tokens.next().unwrap_or_default(),
        district: tokens.next().unwrap_or_default(),
        village: tokens.next().unwrap_or_default(),
    }
}

/// Collapse embedded line breaks into single spaces.
pub fn single_line(address: &str) -> String {
    address.replace("\r\n", " ").replace(['\n', '\r'], " ")
}
