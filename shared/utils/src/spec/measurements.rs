//! Measurement table scanner.

use trimflow_models::Measurement;

use super::rules::MEASUREMENTS_ANCHOR;

/// Every `key: value` line from the first `Measurements` line to the end of
/// input. Duplicates are kept.
pub fn scan_measurements(lines: &[&str]) -> Vec<Measurement> {
    let Some(start) = lines.iter().position(|line| line.contains(MEASUREMENTS_ANCHOR)) else {
        return Vec::new();
    };

    lines[start..]
        .iter()
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim(), value.trim()))
        .filter(|(key, value)| !key.is_empty() && !value.is_empty())
        .map(|(key, value)| Measurement {
            key: key.to_string(),
            value: value.to_string(),
        })
        .collect()
}
