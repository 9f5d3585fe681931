//! Human-readable summary of scanned records.

use crate::models::config::SummaryLabels;
use crate::models::record::ScanRecord;

/// Format one record as a front block and a back block separated by a blank line.
pub fn format_record(record: &ScanRecord, labels: &SummaryLabels) -> String {
    let front = &record.front;
    let back = &record.back;

    let front_block = [
        (&labels.full_name, &front.full_name),
        (&labels.date_of_birth, &front.date_of_birth),
        (&labels.document_number, &front.document_number),
        (&labels.fathers_name, &front.fathers_name),
        (&labels.address, &front.address),
        (&labels.sex, &front.sex),
    ];
    let back_block = [
        (&labels.date_of_issue, &back.date_of_issue),
        (&labels.document_additional_number, &back.document_additional_number),
        (&labels.date_of_expiry, &back.date_of_expiry),
    ];

    format!("{}\n\n{}", lines(&front_block), lines(&back_block))
}

/// Format every record, separated by a blank line. Empty input gives `""`.
pub fn format_summary(records: &[ScanRecord], labels: &SummaryLabels) -> String {
    records
        .iter()
        .map(|record| format_record(record, labels))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn lines(pairs: &[(&String, &String)]) -> String {
    pairs
        .iter()
        .map(|(label, value)| format!("{label}: {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}
