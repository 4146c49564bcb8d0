//! Row builders for exported sheets.
//!
//! Each builder refuses an empty input so no empty file is ever written.

use trimflow_models::{ColorEntry, Measurement, ParseResult, PivotEntry, Supplier, Trim};

use super::{Sheet, Workbook};
use crate::error::{TrimflowError, TrimflowResult};

pub const TRIMS_SHEET: &str = "Trims";
pub const COLOR_BOM_SHEET: &str = "Color BOM";
pub const MEASUREMENTS_SHEET: &str = "Measurements";
pub const PIVOT_SHEET: &str = "Pivot Data";

const TRIM_COLUMNS: [&str; 9] = [
    "Number",
    "Description",
    "UM",
    "Fiber Content",
    "Fiber Content Back",
    "Material Coating",
    "Material Finish (Face)",
    "Material Laminate",
    "Trim Specific",
];

const SUPPLIER_COLUMNS: [&str; 7] = [
    "Supplier Name",
    "Art No",
    "Country",
    "Standard Cost (FOB)",
    "Purchase Cost (CIF)",
    "Lead Time With Greige",
    "Lead Time Without Greige",
];

const COLOR_BOM_COLUMNS: [&str; 3] = ["Color", "Component", "Usage"];
const MEASUREMENT_COLUMNS: [&str; 2] = ["Key", "Value"];

const PIVOT_COLUMNS: [&str; 14] = [
    "Supplier",
    "Style Number",
    "Color",
    "Quantity",
    "Allowances",
    "Component Material",
    "Logo",
    "Logo Color",
    "Main Label",
    "Main Label Color",
    "Care Label Code",
    "Care Label Supplier",
    "Hangtag Code",
    "Hangtag Supplier",
];

fn trim_cells(trim: &Trim) -> Vec<String> {
    vec![
        trim.number.clone(),
        trim.description.clone(),
        trim.um.clone(),
        trim.fiber_content.clone(),
        trim.fiber_content_back.clone(),
        trim.material_coating.clone(),
        trim.material_finish.clone(),
        trim.material_laminate.clone(),
        trim.trim_specific.clone(),
    ]
}

fn supplier_cells(supplier: Option<&Supplier>) -> Vec<String> {
    match supplier {
        Some(s) => vec![
            s.name.clone(),
            s.art_no.clone(),
            s.country.clone(),
            s.standard_cost_fob.clone(),
            s.purchase_cost_cif.clone(),
            s.lead_time_with_greige.clone(),
            s.lead_time_without_greige.clone(),
        ],
        None => vec![String::new(); SUPPLIER_COLUMNS.len()],
    }
}

/// One row per (trim, supplier); a trim without suppliers still gets a row.
pub fn trims_sheet(trims: &[Trim]) -> TrimflowResult<Sheet> {
    if trims.is_empty() {
        return Err(TrimflowError::empty_export("trim"));
    }

    let mut sheet = Sheet::new(TRIMS_SHEET, TRIM_COLUMNS.iter().chain(SUPPLIER_COLUMNS.iter()));
    for trim in trims {
        if trim.suppliers.is_empty() {
            let mut row = trim_cells(trim);
            row.extend(supplier_cells(None));
            sheet.rows.push(row);
            continue;
        }
        for supplier in &trim.suppliers {
            let mut row = trim_cells(trim);
            row.extend(supplier_cells(Some(supplier)));
            sheet.rows.push(row);
        }
    }
    Ok(sheet)
}

/// One row per trim with supplier names folded into a single cell.
pub fn compact_trims_sheet(trims: &[Trim]) -> TrimflowResult<Sheet> {
    if trims.is_empty() {
        return Err(TrimflowError::empty_export("trim"));
    }

    let mut sheet = Sheet::new(
        TRIMS_SHEET,
        TRIM_COLUMNS.iter().chain(["Suppliers", "Supplier Count"].iter()),
    );
    for trim in trims {
        let mut row = trim_cells(trim);
        row.push(trim.supplier_names());
        row.push(trim.suppliers.len().to_string());
        sheet.rows.push(row);
    }
    Ok(sheet)
}

pub fn color_bom_sheet(color_bom: &[ColorEntry]) -> TrimflowResult<Sheet> {
    if color_bom.is_empty() {
        return Err(TrimflowError::empty_export("color BOM"));
    }

    let mut sheet = Sheet::new(COLOR_BOM_SHEET, COLOR_BOM_COLUMNS.iter());
    for color in color_bom {
        for component in &color.components {
            sheet.rows.push(vec![
                color.color_name.clone(),
                component.component.clone(),
                component.usage.clone(),
            ]);
        }
    }
    Ok(sheet)
}

pub fn measurements_sheet(measurements: &[Measurement]) -> TrimflowResult<Sheet> {
    if measurements.is_empty() {
        return Err(TrimflowError::empty_export("measurements"));
    }

    let mut sheet = Sheet::new(MEASUREMENTS_SHEET, MEASUREMENT_COLUMNS.iter());
    sheet.rows = measurements
        .iter()
        .map(|m| vec![m.key.clone(), m.value.clone()])
        .collect();
    Ok(sheet)
}

pub fn pivot_sheet(pivot: &[PivotEntry]) -> TrimflowResult<Sheet> {
    if pivot.is_empty() {
        return Err(TrimflowError::empty_export("pivot"));
    }

    let mut sheet = Sheet::new(PIVOT_SHEET, PIVOT_COLUMNS.iter());
    sheet.rows = pivot
        .iter()
        .map(|p| {
            vec![
                p.supplier.clone(),
                p.style_number.clone(),
                p.color.clone(),
                p.quantity.to_string(),
                p.allowances.clone(),
                p.component_material.clone(),
                p.logo.clone(),
                p.logo_color.clone(),
                p.main_label.clone(),
                p.main_label_color.clone(),
                p.care_label_code.clone(),
                p.care_label_supplier.clone(),
                p.hangtag_code.clone(),
                p.hangtag_supplier.clone(),
            ]
        })
        .collect();
    Ok(sheet)
}

/// Every non-empty data set as its own sheet.
pub fn combined_workbook(result: &ParseResult) -> TrimflowResult<Workbook> {
    let mut workbook = Workbook::default();
    if !result.trims.is_empty() {
        workbook.sheets.push(trims_sheet(&result.trims)?);
    }
    if !result.color_bom.is_empty() {
        workbook.sheets.push(color_bom_sheet(&result.color_bom)?);
    }
    if !result.measurements.is_empty() {
        workbook.sheets.push(measurements_sheet(&result.measurements)?);
    }

    if workbook.sheets.is_empty() {
        return Err(TrimflowError::empty_export("specification"));
    }
    Ok(workbook)
}

#[cfg(test)]
mod tests {
    use super::*;
    use trimflow_models::ColorComponent;

    fn trims() -> Vec<Trim> {
        let mut zipper = Trim::new("123456", "YKK Zipper");
        zipper.um = "EA".to_string();
        let mut acme = Supplier::new("Acme Labels");
        acme.country = "Vietnam".to_string();
        zipper.suppliers.push(acme);
        zipper.suppliers.push(Supplier::new("Globex Trims"));
        vec![zipper, Trim::new("654321", "Hangtag")]
    }

    #[test]
    fn test_trims_sheet_rows_per_supplier() {
        let sheet = trims_sheet(&trims()).unwrap();
        assert_eq!(sheet.headers.len(), 16);
        assert_eq!(sheet.headers[6], "Material Finish (Face)");
        assert_eq!(sheet.headers[9], "Supplier Name");
        assert_eq!(sheet.headers[15], "Lead Time Without Greige");
        assert_eq!(sheet.rows.len(), 3);
        assert_eq!(sheet.rows[0][0], "123456");
        assert_eq!(sheet.rows[0][2], "EA");
        assert_eq!(sheet.rows[0][9], "Acme Labels");
        assert_eq!(sheet.rows[0][11], "Vietnam");
        assert_eq!(sheet.rows[1][9], "Globex Trims");
        assert_eq!(sheet.rows[2][0], "654321");
        assert!(sheet.rows[2][9..].iter().all(String::is_empty));
        assert!(sheet.rows.iter().all(|row| row.len() == 16));
    }

    #[test]
    fn test_compact_trims_sheet() {
        let sheet = compact_trims_sheet(&trims()).unwrap();
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0][9], "Acme Labels; Globex Trims");
        assert_eq!(sheet.rows[0][10], "2");
        assert_eq!(sheet.rows[1][10], "0");
    }

    #[test]
    fn test_color_bom_sheet() {
        let entries = vec![ColorEntry {
            color_name: "Red".to_string(),
            components: vec![
                ColorComponent {
                    component: "Zipper".to_string(),
                    usage: "main closure".to_string(),
                },
                ColorComponent {
                    component: "Label".to_string(),
                    usage: "neck".to_string(),
                },
            ],
        }];
        let sheet = color_bom_sheet(&entries).unwrap();
        assert_eq!(sheet.headers, vec!["Color", "Component", "Usage"]);
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[1], vec!["Red", "Label", "neck"]);
    }

    #[test]
    fn test_empty_sets_are_rejected() {
        let err = color_bom_sheet(&[]).unwrap_err();
        assert_eq!(err.error_code(), "EMPTY_EXPORT");
        assert_eq!(err.to_string(), "No color BOM data to export");

        assert!(trims_sheet(&[]).is_err());
        assert!(compact_trims_sheet(&[]).is_err());
        assert!(measurements_sheet(&[]).is_err());
        assert!(pivot_sheet(&[]).is_err());
        assert!(combined_workbook(&ParseResult::default()).is_err());
    }

    #[test]
    fn test_combined_workbook_skips_empty_sets() {
        let result = ParseResult {
            trims: trims(),
            color_bom: Vec::new(),
            measurements: vec![Measurement {
                key: "Chest".to_string(),
                value: "42in".to_string(),
            }],
        };
        let workbook = combined_workbook(&result).unwrap();
        let names: Vec<&str> = workbook.sheets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Trims", "Measurements"]);
        assert_eq!(workbook.row_count(), 4);
    }

    #[test]
    fn test_pivot_sheet() {
        let entry = PivotEntry {
            supplier: "Avery".to_string(),
            style_number: "AM1234".to_string(),
            quantity: 1000,
            ..PivotEntry::default()
        };
        let sheet = pivot_sheet(&[entry]).unwrap();
        assert_eq!(sheet.name, "Pivot Data");
        assert_eq!(sheet.rows[0][0], "Avery");
        assert_eq!(sheet.rows[0][3], "1000");
    }
}
