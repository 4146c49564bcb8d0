//! PO Line Delivery Schedule Import
//!
//! Reads an uploaded schedule (CSV, XLSX or XLS) into header-keyed rows.
//! Cells are kept as text; no column mapping is applied.

use anyhow::{Context, Result};
use calamine::{open_workbook_from_rs, DataType, Reader, Xls, Xlsx};
use serde::Serialize;
use serde_json::{Map, Value};
use std::io::Cursor;
use std::path::Path;

use crate::error::{TrimflowError, TrimflowResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScheduleFormat {
    Csv,
    Xlsx,
    Xls,
}

impl ScheduleFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" => Some(Self::Xlsx),
            "xls" => Some(Self::Xls),
            _ => None,
        }
    }
}

pub type ScheduleRow = Map<String, Value>;

#[derive(Debug, Clone, Serialize)]
pub struct ParsedSchedule {
    pub filename: String,
    pub format: ScheduleFormat,
    pub headers: Vec<String>,
    pub rows: Vec<ScheduleRow>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Default)]
pub struct ScheduleParser;

impl ScheduleParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_bytes(&self, filename: &str, data: &[u8]) -> TrimflowResult<ParsedSchedule> {
        let format = ScheduleFormat::from_extension(Path::new(filename))
            .ok_or_else(|| TrimflowError::unsupported_format(filename))?;

        let (headers, rows, warnings) = match format {
            ScheduleFormat::Csv => self.parse_csv(data)?,
            ScheduleFormat::Xlsx => self.parse_excel::<Xlsx<Cursor<&[u8]>>>(data)?,
            ScheduleFormat::Xls => self.parse_excel::<Xls<Cursor<&[u8]>>>(data)?,
        };

        tracing::info!(filename, rows = rows.len(), "Schedule imported");
        Ok(ParsedSchedule {
            filename: filename.to_string(),
            format,
            headers,
            rows,
            warnings,
        })
    }

    fn parse_csv(&self, data: &[u8]) -> Result<(Vec<String>, Vec<ScheduleRow>, Vec<String>)> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(data);

        let headers: Vec<String> = reader
            .headers()
            .context("Failed to read CSV headers")?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        let mut warnings = Vec::new();

        for (idx, result) in reader.records().enumerate() {
            match result {
                Ok(record) => {
                    let cells: Vec<String> = record.iter().map(str::to_string).collect();
                    rows.push(to_row(&headers, cells));
                }
                Err(e) => {
                    warnings.push(format!("Row {}: Parse error - {}", idx + 2, e));
                }
            }
        }

        Ok((headers, rows, warnings))
    }

    fn parse_excel<'a, R>(&self, data: &'a [u8]) -> Result<(Vec<String>, Vec<ScheduleRow>, Vec<String>)>
    where
        R: Reader<Cursor<&'a [u8]>>,
        R::Error: std::error::Error + Send + Sync + 'static,
    {
        let mut workbook: R =
            open_workbook_from_rs(Cursor::new(data)).context("Failed to open Excel workbook")?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .context("No sheets found in workbook")?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .context("Failed to read worksheet")??;

        let mut rows_iter = range.rows();

        // First row is headers
        let headers: Vec<String> = rows_iter
            .next()
            .context("Empty worksheet")?
            .iter()
            .map(|cell: &DataType| cell.to_string().trim().to_string())
            .collect();

        let rows = rows_iter
            .map(|row| to_row(&headers, row.iter().map(|cell| cell.to_string()).collect()))
            .collect();

        Ok((headers, rows, Vec::new()))
    }
}

fn to_row(headers: &[String], cells: Vec<String>) -> ScheduleRow {
    headers
        .iter()
        .cloned()
        .zip(cells.into_iter().map(Value::String))
        .collect()
}
