//! Line recognition rules for specification documents.
//!
//! The heuristics are kept as data: ordered tables of (pattern, target field)
//! pairs, so each rule can be read and tested on its own. Trim detail rules
//! are first-match-wins; supplier detail rules are all applied.

use once_cell::sync::Lazy;
use regex::Regex;
use trimflow_models::{Supplier, Trim};

/// `<5-7 digits><whitespace><description>` at the start of a line
static TRIM_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([0-9]{5,7})\s+(.+)$").unwrap());

/// Any 5-7 digit run; the loose acceptance test outside the section
static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]{5,7}").unwrap());

/// Only the label ignores case; the value is ASCII word characters
static UNIT_OF_MEASURE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i:UM:)\s*([0-9A-Za-z_]+)").unwrap());

/// A color header is exactly one capitalized word
static COLOR_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][a-z]+$").unwrap());

pub(crate) const PART_SPECIFICATIONS_MARKER: &str = "part specifications";
pub(crate) const COLOR_BOM_ANCHOR: &str = "Color BOM";
pub(crate) const MEASUREMENTS_ANCHOR: &str = "Measurements";

/// Lowercase keywords that end trim scanning while a trim is open.
const TRIM_TERMINATORS: &[&str] = &["color bom", "measurements", "end"];

/// Column header words from the supplier table.
const COLUMN_HEADERS: &[&str] = &[
    "Number",
    "Description",
    "Supplier",
    "Art No",
    "Country",
    "Cost",
    "Lead Time",
];

const MIN_SUPPLIER_LINE_LEN: usize = 8;
const MIN_SUPPLIER_NAME_LEN: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrimHeader<'a> {
    pub number: &'a str,
    pub description: &'a str,
}

pub(crate) fn match_trim_header(line: &str, in_part_specs: bool) -> Option<TrimHeader<'_>> {
    let caps = TRIM_HEADER.captures(line)?;
    if !in_part_specs && !DIGIT_RUN.is_match(line) {
        return None;
    }
    let number = caps.get(1)?.as_str();
    let description = caps.get(2)?.as_str().trim();
    Some(TrimHeader {
        number,
        description,
    })
}

pub(crate) fn is_trim_terminator(lower: &str) -> bool {
    TRIM_TERMINATORS.iter().any(|keyword| lower.contains(keyword))
}

pub(crate) fn is_column_header(line: &str) -> bool {
    let trimmed = line.trim();
    COLUMN_HEADERS.iter().any(|header| trimmed.starts_with(header))
}

pub(crate) fn is_color_header(line: &str) -> bool {
    COLOR_HEADER.is_match(line)
}

// ---------------------------------------------------------------------------
// Trim details
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrimField {
    Um,
    FiberContent,
    FiberContentBack,
    MaterialCoating,
    MaterialFinish,
    MaterialLaminate,
    TrimSpecific,
}

impl TrimField {
    pub fn slot(self, trim: &mut Trim) -> &mut String {
        match self {
            Self::Um => &mut trim.um,
            Self::FiberContent => &mut trim.fiber_content,
            Self::FiberContentBack => &mut trim.fiber_content_back,
            Self::MaterialCoating => &mut trim.material_coating,
            Self::MaterialFinish => &mut trim.material_finish,
            Self::MaterialLaminate => &mut trim.material_laminate,
            Self::TrimSpecific => &mut trim.trim_specific,
        }
    }
}

/// How a detail label is found in a line and where its value sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailPattern {
    /// `UM:` in any case, value is the word run right after it
    UnitWord,
    /// Literal label, value is the rest of the line
    Label(&'static str),
    /// Literal label, value is whatever follows the next colon
    LabelThenColon(&'static str),
}

impl DetailPattern {
    /// `None` when the line does not carry this label; an empty string when
    /// it does but holds no value.
    pub fn extract(self, line: &str) -> Option<String> {
        match self {
            Self::UnitWord => UNIT_OF_MEASURE
                .captures(line)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim().to_string()),
            Self::Label(label) => line
                .split_once(label)
                .map(|(_, rest)| rest.trim().to_string()),
            Self::LabelThenColon(label) => line.split_once(label).map(|(_, rest)| {
                rest.split_once(':')
                    .map(|(_, value)| value.trim().to_string())
                    .unwrap_or_default()
            }),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TrimDetailRule {
    pub pattern: DetailPattern,
    pub field: TrimField,
}

/// Evaluated in order, first match wins.
pub const TRIM_DETAIL_RULES: &[TrimDetailRule] = &[
    TrimDetailRule {
        pattern: DetailPattern::UnitWord,
        field: TrimField::Um,
    },
    TrimDetailRule {
        pattern: DetailPattern::Label("Fiber Content:"),
        field: TrimField::FiberContent,
    },
    TrimDetailRule {
        pattern: DetailPattern::Label("Fiber Content Back:"),
        field: TrimField::FiberContentBack,
    },
    TrimDetailRule {
        pattern: DetailPattern::Label("Material Coating:"),
        field: TrimField::MaterialCoating,
    },
    TrimDetailRule {
        pattern: DetailPattern::LabelThenColon("Material Finish"),
        field: TrimField::MaterialFinish,
    },
    TrimDetailRule {
        pattern: DetailPattern::Label("Material Laminate:"),
        field: TrimField::MaterialLaminate,
    },
    TrimDetailRule {
        pattern: DetailPattern::Label("Size UM:"),
        field: TrimField::TrimSpecific,
    },
];

/// Apply the first matching detail rule. Returns the field written, if any.
pub(crate) fn apply_trim_detail(line: &str, trim: &mut Trim) -> Option<TrimField> {
    TRIM_DETAIL_RULES.iter().find_map(|rule| {
        let value = rule.pattern.extract(line)?;
        *rule.field.slot(trim) = value;
        Some(rule.field)
    })
}

// ---------------------------------------------------------------------------
// Suppliers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupplierField {
    ArtNo,
    Country,
    StandardCostFob,
    PurchaseCostCif,
    LeadTimeWithGreige,
    LeadTimeWithoutGreige,
}

impl SupplierField {
    pub fn slot(self, supplier: &mut Supplier) -> &mut String {
        match self {
            Self::ArtNo => &mut supplier.art_no,
            Self::Country => &mut supplier.country,
            Self::StandardCostFob => &mut supplier.standard_cost_fob,
            Self::PurchaseCostCif => &mut supplier.purchase_cost_cif,
            Self::LeadTimeWithGreige => &mut supplier.lead_time_with_greige,
            Self::LeadTimeWithoutGreige => &mut supplier.lead_time_without_greige,
        }
    }
}

pub struct SupplierDetailRule {
    /// Lowercase substring that selects the rule
    pub needle: &'static str,
    /// Label, optional colon, then the captured value
    pub pattern: Regex,
    pub field: SupplierField,
}

pub static SUPPLIER_DETAIL_RULES: Lazy<Vec<SupplierDetailRule>> = Lazy::new(|| {
    [
        ("art no", SupplierField::ArtNo),
        ("country", SupplierField::Country),
        ("standard cost", SupplierField::StandardCostFob),
        ("purchase cost", SupplierField::PurchaseCostCif),
        ("with greige", SupplierField::LeadTimeWithGreige),
        ("without greige", SupplierField::LeadTimeWithoutGreige),
    ]
    .into_iter()
    .map(|(needle, field)| SupplierDetailRule {
        needle,
        pattern: Regex::new(&format!(r"(?i){}\s*:?\s*(.*)", regex::escape(needle))).unwrap(),
        field,
    })
    .collect()
});

/// Name of the supplier a line introduces, if it introduces one.
///
/// `Supplier: <name>` always qualifies. Any other line mentioning a supplier
/// qualifies when it is long enough and is not a column header row.
pub(crate) fn supplier_name(line: &str, lower: &str) -> Option<String> {
    let labeled = lower.contains("supplier:");
    let loose = lower.contains("supplier")
        && line.chars().count() > MIN_SUPPLIER_LINE_LEN
        && !is_column_header(line);
    if !labeled && !loose {
        return None;
    }

    let name = match line.split_once(':') {
        Some((_, rest)) => rest.trim(),
        None => line.trim(),
    };

    if name.chars().count() <= MIN_SUPPLIER_NAME_LEN {
        return None;
    }
    if !labeled && is_column_header(line) {
        return None;
    }
    Some(name.to_string())
}

/// Write every supplier detail the line carries. Returns the fields written.
pub(crate) fn apply_supplier_details(
    line: &str,
    lower: &str,
    supplier: &mut Supplier,
) -> Vec<SupplierField> {
    let mut written = Vec::new();
    for rule in SUPPLIER_DETAIL_RULES.iter() {
        if !lower.contains(rule.needle) {
            continue;
        }
        let value = rule
            .pattern
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();
        *rule.field.slot(supplier) = value;
        written.push(rule.field);
    }
    written
}
