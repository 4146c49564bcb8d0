//! Specification document models for the Trimflow sourcing system.
//!
//! These are the records produced by the specification parser: trims with
//! their approved suppliers, the per-color bill of materials and the
//! measurement table. Field names serialize in the camelCase shape the
//! display and export collaborators consume.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A purchasable trim identified by a 5-7 digit code.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Trim {
    pub number: String,
    pub description: String,
    /// Unit of measurement
    pub um: String,
    pub fiber_content: String,
    pub fiber_content_back: String,
    pub material_coating: String,
    /// Material Finish (Face)
    pub material_finish: String,
    pub material_laminate: String,
    pub trim_specific: String,
    /// Approved suppliers in discovery order
    pub suppliers: Vec<Supplier>,
}

/// An approved supplier for a single trim. Owned by its trim.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Supplier {
    pub name: String,
    pub art_no: String,
    pub country: String,
    #[serde(rename = "standardCostFOB")]
    pub standard_cost_fob: String,
    #[serde(rename = "purchaseCostCIF")]
    pub purchase_cost_cif: String,
    pub lead_time_with_greige: String,
    pub lead_time_without_greige: String,
}

/// Components assigned to one garment color.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorEntry {
    pub color_name: String,
    pub components: Vec<ColorComponent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColorComponent {
    pub component: String,
    pub usage: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Measurement {
    pub key: String,
    pub value: String,
}

/// Everything extracted from one specification document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ParseResult {
    pub trims: Vec<Trim>,
    #[serde(rename = "colorBOM")]
    pub color_bom: Vec<ColorEntry>,
    pub measurements: Vec<Measurement>,
}

/// Record counts for a parsed document.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ParseStats {
    pub total_trims: usize,
    pub total_suppliers: usize,
    pub total_colors: usize,
    pub total_measurements: usize,
}

impl Trim {
    pub fn new(number: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn has_suppliers(&self) -> bool {
        !self.suppliers.is_empty()
    }

    /// Names of all suppliers joined with `"; "`.
    pub fn supplier_names(&self) -> String {
        self.suppliers
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl Supplier {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn standard_cost_fob_value(&self) -> Option<f64> {
        parse_decimal(&self.standard_cost_fob)
    }

    pub fn purchase_cost_cif_value(&self) -> Option<f64> {
        parse_decimal(&self.purchase_cost_cif)
    }

    pub fn lead_time_with_greige_days(&self) -> Option<u32> {
        parse_whole(&self.lead_time_with_greige)
    }

    pub fn lead_time_without_greige_days(&self) -> Option<u32> {
        parse_whole(&self.lead_time_without_greige)
    }
}

impl ColorEntry {
    pub fn new(color_name: impl Into<String>) -> Self {
        Self {
            color_name: color_name.into(),
            components: Vec::new(),
        }
    }
}

impl ParseResult {
    pub fn is_empty(&self) -> bool {
        self.trims.is_empty() && self.color_bom.is_empty() && self.measurements.is_empty()
    }

    pub fn stats(&self) -> ParseStats {
        let colors: HashSet<&str> = self
            .color_bom
            .iter()
            .map(|c| c.color_name.as_str())
            .collect();

        ParseStats {
            total_trims: self.trims.len(),
            total_suppliers: self.trims.iter().map(|t| t.suppliers.len()).sum(),
            total_colors: colors.len(),
            total_measurements: self.measurements.len(),
        }
    }

    /// Trims whose number or description contains `term`, ignoring case.
    pub fn search_trims(&self, term: &str) -> Vec<&Trim> {
        let needle = term.trim().to_lowercase();
        self.trims
            .iter()
            .filter(|t| {
                t.number.to_lowercase().contains(&needle)
                    || t.description.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

// Cost and lead-time cells are free text; only plain numbers convert.
fn parse_decimal(value: &str) -> Option<f64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_whole(value: &str) -> Option<u32> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    value.parse::<u32>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ParseResult {
        let mut zipper = Trim::new("123456", "YKK Zipper #5");
        zipper.suppliers.push(Supplier::new("Acme Labels"));
        zipper.suppliers.push(Supplier::new("Globex Trims"));

        ParseResult {
            trims: vec![zipper, Trim::new("7654321", "Woven Main Label")],
            color_bom: vec![
                ColorEntry::new("Red"),
                ColorEntry::new("Black"),
                ColorEntry::new("Red"),
            ],
            measurements: vec![Measurement {
                key: "Chest".to_string(),
                value: "42in".to_string(),
            }],
        }
    }

    #[test]
    fn test_stats_counts_distinct_colors() {
        let stats = sample().stats();
        assert_eq!(stats.total_trims, 2);
        assert_eq!(stats.total_suppliers, 2);
        assert_eq!(stats.total_colors, 2);
        assert_eq!(stats.total_measurements, 1);
    }

    #[test]
    fn test_search_trims_matches_number_and_description() {
        let result = sample();
        assert_eq!(result.search_trims("1234").len(), 1);
        assert_eq!(result.search_trims("main label")[0].number, "7654321");
        assert!(result.search_trims("velcro").is_empty());
    }

    #[test]
    fn test_supplier_numeric_fields() {
        let mut supplier = Supplier::new("Acme");
        supplier.standard_cost_fob = " 0.125 ".to_string();
        supplier.purchase_cost_cif = "USD 0.20".to_string();
        supplier.lead_time_with_greige = "30".to_string();
        supplier.lead_time_without_greige = "45 days".to_string();

        assert_eq!(supplier.standard_cost_fob_value(), Some(0.125));
        assert_eq!(supplier.purchase_cost_cif_value(), None);
        assert_eq!(supplier.lead_time_with_greige_days(), Some(30));
        assert_eq!(supplier.lead_time_without_greige_days(), None);
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("colorBOM").is_some());
        let supplier = &json["trims"][0]["suppliers"][0];
        assert!(supplier.get("standardCostFOB").is_some());
        assert!(supplier.get("leadTimeWithoutGreige").is_some());
        assert!(json["trims"][0].get("fiberContentBack").is_some());
        assert_eq!(json["colorBOM"][0]["colorName"], "Red");
    }

    #[test]
    fn test_supplier_names_joined() {
        let result = sample();
        assert_eq!(result.trims[0].supplier_names(), "Acme Labels; Globex Trims");
        assert_eq!(result.trims[1].supplier_names(), "");
    }
}
