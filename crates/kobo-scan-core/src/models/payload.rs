//! Flattened payload handed to the companion data-collection app.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::derive::compute_age;
use crate::error::CompanionError;
use crate::extract::parse_dependents;
use crate::models::record::ScanRecord;

/// Record fields flattened for the companion's ingestion entry point, plus age.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryPayload {
    pub date_of_birth: String,
    #[serde(rename = "CoAAddress")]
    pub coa_address: String,
    pub province: String,
    pub district: String,
    pub village: String,
    pub document_number: String,
    pub full_name: String,
    pub fathers_name: String,
    pub age: u32,
    pub gender: String,
    pub front_image: String,
    pub back_image: String,
    pub dependents_info: String,
    pub date_of_issue: String,
    pub document_additional_number: String,
    pub date_of_expiry: String,
}

impl DeliveryPayload {
    /// Build the payload for `record`, computing age relative to `today`.
    pub fn from_record(record: &ScanRecord, today: NaiveDate) -> Self {
        let front = &record.front;
        let back = &record.back;

        Self {
            date_of_birth: front.date_of_birth.clone(),
            coa_address: front.address.clone(),
            province: front.province.clone(),
            district: front.district.clone(),
            village: front.village.clone(),
            document_number: front.document_number.clone(),
            full_name: front.full_name.clone(),
            fathers_name: front.fathers_name.clone(),
            age: compute_age(&front.date_of_birth, today),
            gender: front.sex.clone(),
            front_image: record.front_image.clone(),
            back_image: record.back_image.clone(),
            dependents_info: record.dependents_info.clone(),
            date_of_issue: back.date_of_issue.clone(),
            document_additional_number: back.document_additional_number.clone(),
            date_of_expiry: back.date_of_expiry.clone(),
        }
    }

    /// Strict check for sinks that refuse records with an empty document
    /// number, name or birth date.
    pub fn validate_required(&self) -> Result<(), CompanionError> {
        let missing: Vec<&str> = [
            ("documentNumber", &self.document_number),
            ("fullName", &self.full_name),
            ("dateOfBirth", &self.date_of_birth),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(CompanionError::MissingParameters(missing.join(", ")))
        }
    }

    /// Flatten into the key/value extras the companion form reads.
    ///
    /// Besides the payload fields this adds `*_dep` copies used to pre-fill
    /// the dependents repeat group, `dependentCount`, and one
    /// `dependentNN_*` block per parsed dependent (`NN` is 1-based, two digits).
    pub fn to_extras(&self) -> BTreeMap<String, Value> {
        let mut extras = BTreeMap::new();

        let mut put = |key: &str, value: Value| {
            extras.insert(key.to_string(), value);
        };

        put("dateOfBirth", Value::from(self.date_of_birth.as_str()));
        put("CoAAddress", Value::from(self.coa_address.as_str()));
        put("province", Value::from(self.province.as_str()));
        put("district", Value::from(self.district.as_str()));
        put("village", Value::from(self.village.as_str()));
        put("documentNumber", Value::from(self.document_number.as_str()));
        put("fullName", Value::from(self.full_name.as_str()));
        put("fathersName", Value::from(self.fathers_name.as_str()));
        put("age", Value::from(self.age));
        put("gender", Value::from(self.gender.as_str()));
        put("dependentsInfo", Value::from(self.dependents_info.as_str()));
        put("dateOfIssue", Value::from(self.date_of_issue.as_str()));
        put(
            "documentAdditionalNumber",
            Value::from(self.document_additional_number.as_str()),
        );
        put("dateOfExpiry", Value::from(self.date_of_expiry.as_str()));

        put("fullName_dep", Value::from(self.full_name.as_str()));
        put("dateOfBirth_dep", Value::from(self.date_of_birth.as_str()));
        put("documentNumber_dep", Value::from(self.document_number.as_str()));
        put("fathersName_dep", Value::from(self.fathers_name.as_str()));
        put("gender_dep", Value::from(self.gender.as_str()));
        put("age_dep", Value::from(self.age));

        if let Some(dependents) = parse_dependents(&self.dependents_info) {
            put("dependentCount", Value::from(dependents.len()));
            for (i, dependent) in dependents.iter().enumerate() {
                let prefix = format!("dependent{:02}", i + 1);
                put(
                    &format!("{prefix}_dateOfBirth"),
                    Value::from(dependent.date_of_birth.as_str()),
                );
                put(&format!("{prefix}_sex"), Value::from(dependent.sex.as_str()));
                put(
                    &format!("{prefix}_documentNumber"),
                    Value::from(dependent.document_number.as_str()),
                );
                put(
                    &format!("{prefix}_fullName"),
                    Value::from(dependent.full_name.as_str()),
                );
            }
        }

        extras
    }
}
