//! Trim ordering workflow records.
//!
//! The sourcing wizard collects buyer style numbers (trim summary) and
//! tech pack entries, then crosses them into pivot rows for ordering.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Buyer style numbers to order for. An empty list is allowed and yields
/// no pivot rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TrimSummary {
    #[serde(default)]
    pub buyer_style_numbers: Vec<String>,
}

/// One tech pack data entry, as typed in by the sourcing team.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct TechPackEntry {
    pub component_material: String,
    pub logo: String,
    pub logo_color: String,
    pub main_label: String,
    pub main_label_color: String,
    pub care_label_code: String,
    pub care_label_supplier: String,
    pub hangtag_code: String,
    pub hangtag_supplier: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PivotRequest {
    #[serde(default)]
    pub trim_summary: TrimSummary,
    #[serde(default)]
    pub tech_pack_data: Vec<TechPackEntry>,
    #[serde(default = "default_quantity")]
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: u32,
    #[serde(default = "default_allowances")]
    #[validate(length(max = 20))]
    pub allowances: String,
}

/// A single order line: one tech pack entry for one buyer style.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PivotEntry {
    pub supplier: String,
    pub style_number: String,
    pub color: String,
    pub quantity: u32,
    pub allowances: String,
    pub component_material: String,
    pub logo: String,
    pub logo_color: String,
    pub main_label: String,
    pub main_label_color: String,
    pub care_label_code: String,
    pub care_label_supplier: String,
    pub hangtag_code: String,
    pub hangtag_supplier: String,
}

const NOT_AVAILABLE: &str = "N/A";

fn default_quantity() -> u32 {
    1000
}

fn default_allowances() -> String {
    "5%".to_string()
}

impl Default for PivotRequest {
    fn default() -> Self {
        Self {
            trim_summary: TrimSummary::default(),
            tech_pack_data: Vec::new(),
            quantity: default_quantity(),
            allowances: default_allowances(),
        }
    }
}

impl PivotRequest {
    /// Cross every tech pack entry with every buyer style number,
    /// tech-pack-major.
    pub fn generate_pivot(&self) -> Vec<PivotEntry> {
        let styles = &self.trim_summary.buyer_style_numbers;
        let mut pivot = Vec::with_capacity(self.tech_pack_data.len() * styles.len());

        for entry in &self.tech_pack_data {
            for style in styles {
                pivot.push(PivotEntry {
                    supplier: or_not_available(&entry.care_label_supplier),
                    style_number: style.clone(),
                    color: or_not_available(&entry.main_label_color),
                    quantity: self.quantity,
                    allowances: self.allowances.clone(),
                    component_material: entry.component_material.clone(),
                    logo: entry.logo.clone(),
                    logo_color: entry.logo_color.clone(),
                    main_label: entry.main_label.clone(),
                    main_label_color: entry.main_label_color.clone(),
                    care_label_code: entry.care_label_code.clone(),
                    care_label_supplier: entry.care_label_supplier.clone(),
                    hangtag_code: entry.hangtag_code.clone(),
                    hangtag_supplier: entry.hangtag_supplier.clone(),
                });
            }
        }

        pivot
    }
}

fn or_not_available(value: &str) -> String {
    if value.trim().is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        value.to_string()
    }
}
