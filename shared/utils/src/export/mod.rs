//! Spreadsheet Export
//!
//! Turns parsed specification data into named sheets and writes them as
//! XLSX workbooks (one worksheet per sheet) or single-sheet CSV.

pub mod sheets;

pub use sheets::{
    color_bom_sheet, combined_workbook, compact_trims_sheet, measurements_sheet, pivot_sheet,
    trims_sheet,
};

use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook};
use serde::Serialize;
use std::path::Path;
use tracing::info;
use trimflow_models::{ColorEntry, Measurement, ParseResult, Trim};

use crate::error::{TrimflowError, TrimflowResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Csv,
}

impl ExportFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "xlsx" | "excel" => Some(Self::Xlsx),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Self::Csv => "text/csv; charset=utf-8",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
        }
    }
}

/// A named table: header row plus data rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

/// Data rows written per data set by a combined export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSummary {
    pub trims: usize,
    pub color_bom: usize,
    pub measurements: usize,
}

impl Sheet {
    pub fn new<I, S>(name: impl Into<String>, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            name: name.into(),
            headers: headers.into_iter().map(|h| h.as_ref().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn to_csv_bytes(&self) -> TrimflowResult<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer
            .into_inner()
            .map_err(|e| TrimflowError::export(format!("Failed to flush CSV: {}", e)))
    }

    pub fn into_workbook(self) -> Workbook {
        Workbook { sheets: vec![self] }
    }
}

impl Workbook {
    pub fn row_count(&self) -> usize {
        self.sheets.iter().map(|s| s.rows.len()).sum()
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn to_xlsx_bytes(&self) -> TrimflowResult<Vec<u8>> {
        if self.sheets.is_empty() {
            return Err(TrimflowError::export("Workbook has no sheets"));
        }

        let mut workbook = XlsxWorkbook::new();
        let header_format = Format::new().set_bold();

        for sheet in &self.sheets {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(sheet.name.as_str())?;

            for (col, header) in sheet.headers.iter().enumerate() {
                let (row, col) = cell(0, col)?;
                worksheet.write_string_with_format(row, col, header.as_str(), &header_format)?;
            }
            for (row_idx, values) in sheet.rows.iter().enumerate() {
                for (col, value) in values.iter().enumerate() {
                    let (row, col) = cell(row_idx + 1, col)?;
                    worksheet.write_string(row, col, value.as_str())?;
                }
            }
            worksheet.autofit();
        }

        Ok(workbook.save_to_buffer()?)
    }

    pub fn save_xlsx(&self, path: impl AsRef<Path>) -> TrimflowResult<usize> {
        let path = path.as_ref();
        let bytes = self.to_xlsx_bytes()?;
        std::fs::write(path, bytes).map_err(|e| {
            TrimflowError::export(format!("Failed to write {}: {}", path.display(), e))
        })?;

        let rows = self.row_count();
        info!(path = %path.display(), sheets = self.sheets.len(), rows, "Workbook exported");
        Ok(rows)
    }
}

fn cell(row: usize, col: usize) -> TrimflowResult<(u32, u16)> {
    let row = u32::try_from(row).map_err(|_| TrimflowError::export("Too many rows for a worksheet"))?;
    let col = u16::try_from(col).map_err(|_| TrimflowError::export("Too many columns for a worksheet"))?;
    Ok((row, col))
}

pub fn export_trims(trims: &[Trim], path: impl AsRef<Path>) -> TrimflowResult<usize> {
    trims_sheet(trims)?.into_workbook().save_xlsx(path)
}

pub fn export_color_bom(color_bom: &[ColorEntry], path: impl AsRef<Path>) -> TrimflowResult<usize> {
    color_bom_sheet(color_bom)?.into_workbook().save_xlsx(path)
}

pub fn export_measurements(
    measurements: &[Measurement],
    path: impl AsRef<Path>,
) -> TrimflowResult<usize> {
    measurements_sheet(measurements)?.into_workbook().save_xlsx(path)
}

pub fn export_all(result: &ParseResult, path: impl AsRef<Path>) -> TrimflowResult<ExportSummary> {
    combined_workbook(result)?.save_xlsx(path)?;
    Ok(ExportSummary {
        trims: result.trims.len(),
        color_bom: result.color_bom.len(),
        measurements: result.measurements.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use trimflow_models::Supplier;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("trimflow-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_csv_quotes_commas_and_quotes() {
        let mut sheet = Sheet::new("Measurements", ["Key", "Value"]);
        sheet.rows.push(vec!["Chest, relaxed".to_string(), "42\" in".to_string()]);

        let csv = String::from_utf8(sheet.to_csv_bytes().unwrap()).unwrap();
        assert_eq!(csv, "Key,Value\n\"Chest, relaxed\",\"42\"\" in\"\n");
    }

    #[test]
    fn test_xlsx_bytes_are_a_zip_package() {
        let mut sheet = Sheet::new("Color BOM", ["Color", "Component", "Usage"]);
        sheet.rows.push(vec!["Red".into(), "Zipper".into(), "main closure".into()]);

        let bytes = sheet.into_workbook().to_xlsx_bytes().unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_empty_workbook_is_rejected() {
        assert!(Workbook::default().to_xlsx_bytes().is_err());
    }

    #[test]
    fn test_export_trims_writes_file() {
        let mut trim = Trim::new("123456", "Zipper");
        trim.suppliers.push(Supplier::new("Acme Labels"));
        trim.suppliers.push(Supplier::new("Globex Trims"));

        let path = temp_path("trims.xlsx");
        let rows = export_trims(&[trim], &path).unwrap();
        let written = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
        std::fs::remove_file(&path).ok();

        assert_eq!(rows, 2);
        assert!(written > 0);
    }

    #[test]
    fn test_export_color_bom_empty_fails_without_file() {
        let path = temp_path("empty_color_bom.xlsx");
        let err = export_color_bom(&[], &path).unwrap_err();
        assert_eq!(err.to_string(), "No color BOM data to export");
        assert!(!path.exists());
    }

    #[test]
    fn test_export_all_summary() {
        let result = crate::spec::parse_spec_text(
            "123456 Zipper\nSupplier: Acme Labels\nMeasurements\nChest: 42in\n",
        );
        let path = temp_path("all.xlsx");
        let summary = export_all(&result, &path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(
            summary,
            ExportSummary {
                trims: 1,
                color_bom: 0,
                measurements: 1,
            }
        );
    }

    #[test]
    fn test_export_format_names() {
        assert_eq!(ExportFormat::from_name("CSV"), Some(ExportFormat::Csv));
        assert_eq!(ExportFormat::from_name("excel"), Some(ExportFormat::Xlsx));
        assert_eq!(ExportFormat::from_name("pdf"), None);
        assert_eq!(ExportFormat::Csv.extension(), "csv");
    }
}
