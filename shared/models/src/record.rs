//! Stored specification records.
//!
//! A record tracks one uploaded document from upload to parsed data, along
//! with its parse log and the exports taken from it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::spec::{ParseResult, ParseStats, Trim};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecStatus {
    Uploaded,
    Parsed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseLogEntry {
    pub level: LogLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// One export taken from a stored specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRecord {
    pub export_type: String,
    pub export_format: String,
    pub filename: String,
    pub record_count: usize,
    pub exported_at: DateTime<Utc>,
}

impl ExportRecord {
    pub fn new(
        export_type: impl Into<String>,
        export_format: impl Into<String>,
        filename: impl Into<String>,
        record_count: usize,
    ) -> Self {
        Self {
            export_type: export_type.into(),
            export_format: export_format.into(),
            filename: filename.into(),
            record_count,
            exported_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecRecord {
    pub id: Uuid,
    pub filename: String,
    pub file_type: String,
    pub file_size: usize,
    pub status: SpecStatus,
    pub uploaded_at: DateTime<Utc>,
    pub parsed_at: Option<DateTime<Utc>>,
    pub stats: ParseStats,
    pub result: ParseResult,
    pub logs: Vec<ParseLogEntry>,
    pub exports: Vec<ExportRecord>,
}

/// Listing view of a record, without the parsed data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecSummary {
    pub id: Uuid,
    pub filename: String,
    pub file_type: String,
    pub file_size: usize,
    pub status: SpecStatus,
    pub uploaded_at: DateTime<Utc>,
    pub stats: ParseStats,
    pub export_count: usize,
}

/// A trim found by searching across stored specifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrimMatch {
    pub spec_id: Uuid,
    pub filename: String,
    pub trim: Trim,
}

impl SpecRecord {
    pub fn new(filename: impl Into<String>, file_type: impl Into<String>, file_size: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            filename: filename.into(),
            file_type: file_type.into(),
            file_size,
            status: SpecStatus::Uploaded,
            uploaded_at: Utc::now(),
            parsed_at: None,
            stats: ParseStats::default(),
            result: ParseResult::default(),
            logs: Vec::new(),
            exports: Vec::new(),
        }
    }

    pub fn add_log(&mut self, level: LogLevel, message: impl Into<String>) {
        self.logs.push(ParseLogEntry {
            level,
            message: message.into(),
            created_at: Utc::now(),
        });
    }

    /// Attach parsed data, refresh the totals and log what was found.
    pub fn save_parsed(&mut self, result: ParseResult) {
        self.stats = result.stats();
        self.status = SpecStatus::Parsed;
        self.parsed_at = Some(Utc::now());

        let stats = self.stats;
        self.add_log(
            LogLevel::Info,
            format!(
                "Parsed {} trims, {} suppliers, {} colors, {} measurements",
                stats.total_trims, stats.total_suppliers, stats.total_colors, stats.total_measurements
            ),
        );
        for (missing, section) in [
            (result.trims.is_empty(), "part specification"),
            (result.color_bom.is_empty(), "color BOM"),
            (result.measurements.is_empty(), "measurement"),
        ] {
            if missing {
                self.add_log(LogLevel::Warning, format!("No {} data found", section));
            }
        }

        self.result = result;
    }

    pub fn record_export(&mut self, export: ExportRecord) {
        self.exports.push(export);
    }

    /// Exports, newest first.
    pub fn export_history(&self) -> Vec<ExportRecord> {
        let mut history = self.exports.clone();
        history.sort_by(|a, b| b.exported_at.cmp(&a.exported_at));
        history
    }

    pub fn summary(&self) -> SpecSummary {
        SpecSummary {
            id: self.id,
            filename: self.filename.clone(),
            file_type: self.file_type.clone(),
            file_size: self.file_size,
            status: self.status,
            uploaded_at: self.uploaded_at,
            stats: self.stats,
            export_count: self.exports.len(),
        }
    }

    pub fn search_trims(&self, term: &str) -> Vec<TrimMatch> {
        self.result
            .search_trims(term)
            .into_iter()
            .map(|trim| TrimMatch {
                spec_id: self.id,
                filename: self.filename.clone(),
                trim: trim.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{Measurement, Supplier};

    fn parsed() -> ParseResult {
        let mut trim = Trim::new("123456", "YKK Zipper");
        trim.suppliers.push(Supplier::new("Acme Labels"));
        ParseResult {
            trims: vec![trim, Trim::new("654321", "Woven Label")],
            color_bom: Vec::new(),
            measurements: vec![Measurement {
                key: "Chest".to_string(),
                value: "42in".to_string(),
            }],
        }
    }

    #[test]
    fn test_new_record_is_uploaded() {
        let record = SpecRecord::new("spec.txt", "txt", 120);
        assert_eq!(record.status, SpecStatus::Uploaded);
        assert!(record.parsed_at.is_none());
        assert!(record.result.is_empty());
    }

    #[test]
    fn test_save_parsed_updates_totals_and_logs() {
        let mut record = SpecRecord::new("spec.txt", "txt", 120);
        record.save_parsed(parsed());

        assert_eq!(record.status, SpecStatus::Parsed);
        assert!(record.parsed_at.is_some());
        assert_eq!(record.stats.total_trims, 2);
        assert_eq!(record.stats.total_suppliers, 1);
        assert_eq!(record.logs.len(), 2);
        assert_eq!(record.logs[0].level, LogLevel::Info);
        assert_eq!(
            record.logs[0].message,
            "Parsed 2 trims, 1 suppliers, 0 colors, 1 measurements"
        );
        assert_eq!(record.logs[1].level, LogLevel::Warning);
        assert_eq!(record.logs[1].message, "No color BOM data found");
    }

    #[test]
    fn test_summary_and_exports() {
        let mut record = SpecRecord::new("spec.txt", "txt", 120);
        record.save_parsed(parsed());
        record.record_export(ExportRecord::new("trims", "xlsx", "trim_data.xlsx", 2));

        let summary = record.summary();
        assert_eq!(summary.id, record.id);
        assert_eq!(summary.export_count, 1);
        assert_eq!(record.export_history()[0].record_count, 2);
    }

    #[test]
    fn test_search_tags_matches_with_record() {
        let mut record = SpecRecord::new("spec.txt", "txt", 120);
        record.save_parsed(parsed());

        let matches = record.search_trims("WOVEN");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].spec_id, record.id);
        assert_eq!(matches[0].filename, "spec.txt");
        assert_eq!(matches[0].trim.number, "654321");
    }

    #[test]
    fn test_record_json_shape() {
        let record = SpecRecord::new("spec.txt", "txt", 120);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["status"], "uploaded");
        assert_eq!(json["fileType"], "txt");
        assert_eq!(json["fileSize"], 120);
        assert!(json["result"]["colorBOM"].is_array());
    }
}
