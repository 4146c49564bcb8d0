//! Specification Document Parser
//!
//! Extracts trims (with approved suppliers), the color bill of materials and
//! measurements from semi-structured specification text.
//!
//! The document is split into trimmed lines once. Trims are built in a
//! single forward pass that stops at the next section keyword; the color BOM
//! and measurement scanners each find their own heading and read to the end
//! of input. Matching is permissive: a line that fits no rule is skipped, and
//! a missing section gives an empty list. Parsing never fails.

pub mod color_bom;
pub mod input;
pub mod measurements;
pub mod rules;
pub mod trims;


pub use color_bom::scan_color_bom;
pub use input::{decode_spec_bytes, parse_spec_bytes, parse_spec_file, read_spec_file, SpecFormat};
pub use measurements::scan_measurements;
pub use trims::{ScanState, TrimScanner};

use tracing::info;
use trimflow_models::{ColorEntry, Measurement, ParseResult, Trim};

/// Parser over one document. Holds borrowed, trimmed lines.
#[derive(Debug, Clone)]
pub struct SpecParser<'a> {
    lines: Vec<&'a str>,
}

impl<'a> SpecParser<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: split_lines(text),
        }
    }

    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    pub fn parse(&self) -> ParseResult {
        let result = ParseResult {
            trims: self.parse_part_specifications(),
            color_bom: self.parse_color_bom(),
            measurements: self.parse_measurements(),
        };

        let stats = result.stats();
        info!(
            lines = self.lines.len(),
            trims = stats.total_trims,
            suppliers = stats.total_suppliers,
            colors = stats.total_colors,
            measurements = stats.total_measurements,
            "Specification parsed"
        );
        result
    }

    pub fn parse_part_specifications(&self) -> Vec<Trim> {
        TrimScanner::new().scan(self.lines.iter().copied())
    }

    pub fn parse_color_bom(&self) -> Vec<ColorEntry> {
        scan_color_bom(&self.lines)
    }

    pub fn parse_measurements(&self) -> Vec<Measurement> {
        scan_measurements(&self.lines)
    }
}

/// Split on newlines and trim each line. Blank lines are kept as empty
/// strings so line positions stay stable.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').map(str::trim).collect()
}

pub fn parse_spec_text(text: &str) -> ParseResult {
    SpecParser::new(text).parse()
}
