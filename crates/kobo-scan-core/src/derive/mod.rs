//! Values computed from extracted fields.

pub mod age;
pub mod patterns;

pub use age::{age_on, compute_age, parse_birth_date};
