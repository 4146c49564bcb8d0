//! Part specification scanner.
//!
//! One forward pass over the document lines. A trim header opens a trim,
//! detail and supplier lines fill it in, and the next header (or a section
//! keyword, or the end of input) closes it.

use tracing::debug;
use trimflow_models::{Supplier, Trim};

use super::rules::{
    apply_supplier_details, apply_trim_detail, is_trim_terminator, match_trim_header,
    supplier_name, PART_SPECIFICATIONS_MARKER,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// No trim has been opened yet
    Idle,
    /// A trim is open and has no suppliers
    InTrim,
    /// A trim is open and its last supplier receives detail lines
    InSupplier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

/// Accumulates trims line by line.
#[derive(Debug, Default)]
pub struct TrimScanner {
    in_part_specs: bool,
    current: Option<Trim>,
    trims: Vec<Trim>,
}

impl TrimScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ScanState {
        match &self.current {
            None => ScanState::Idle,
            Some(trim) if trim.suppliers.is_empty() => ScanState::InTrim,
            Some(_) => ScanState::InSupplier,
        }
    }

    pub fn in_part_specs(&self) -> bool {
        self.in_part_specs
    }

    /// Scan every line, stopping early at a section keyword.
    pub fn scan<'a, I>(mut self, lines: I) -> Vec<Trim>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for line in lines {
            if self.feed(line) == Flow::Stop {
                break;
            }
        }
        self.finish()
    }

    fn feed(&mut self, line: &str) -> Flow {
        if line.is_empty() {
            return Flow::Continue;
        }

        let lower = line.to_lowercase();
        if lower.contains(PART_SPECIFICATIONS_MARKER) {
            debug!("Found part specifications section");
            self.in_part_specs = true;
            return Flow::Continue;
        }

        if let Some(header) = match_trim_header(line, self.in_part_specs) {
            debug!(number = header.number, "Found trim");
            self.close_current();
            self.current = Some(Trim::new(header.number, header.description));
            return Flow::Continue;
        }

        let Some(trim) = self.current.as_mut() else {
            return Flow::Continue;
        };

        apply_trim_detail(line, trim);
        extract_supplier(line, &lower, trim);

        if is_trim_terminator(&lower) {
            debug!(line, "Trim scanning stopped at section keyword");
            return Flow::Stop;
        }
        Flow::Continue
    }

    fn close_current(&mut self) {
        if let Some(trim) = self.current.take() {
            self.trims.push(trim);
        }
    }

    pub fn finish(mut self) -> Vec<Trim> {
        self.close_current();
        self.trims
    }
}

/// Open a new supplier if the line names one, then route any labeled
/// values to the most recent supplier of this trim.
fn extract_supplier(line: &str, lower: &str, trim: &mut Trim) {
    if let Some(name) = supplier_name(line, lower) {
        debug!(supplier = %name, trim = %trim.number, "Found supplier");
        trim.suppliers.push(Supplier::new(name));
    }

    if let Some(supplier) = trim.suppliers.last_mut() {
        apply_supplier_details(line, lower, supplier);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str) -> Vec<Trim> {
        TrimScanner::new().scan(text.lines().map(str::trim))
    }

    #[test]
    fn test_trims_in_section_in_order() {
        let trims = scan(
            "Part Specifications with Approved Suppliers\n\
             123456 YKK Zipper #5\n\
             UM: EA\n\
             7654321 Woven Main Label\n\
             Fiber Content: 100% Polyester\n",
        );
        assert_eq!(trims.len(), 2);
        assert_eq!(trims[0].number, "123456");
        assert_eq!(trims[0].description, "YKK Zipper #5");
        assert_eq!(trims[0].um, "EA");
        assert_eq!(trims[1].number, "7654321");
        assert_eq!(trims[1].fiber_content, "100% Polyester");
    }

    #[test]
    fn test_lines_before_first_header_are_ignored() {
        let trims = scan("UM: EA\nSupplier: Nobody Inc\n123456 Snap\nMaterial Coating: PU\n");
        assert_eq!(trims.len(), 1);
        assert_eq!(trims[0].um, "");
        assert!(trims[0].suppliers.is_empty());
        assert_eq!(trims[0].material_coating, "PU");
    }

    #[test]
    fn test_supplier_with_country() {
        let trims = scan("123456 Care Label\nSupplier: Acme Labels\nCountry: Vietnam\n");
        assert_eq!(trims[0].suppliers.len(), 1);
        assert_eq!(trims[0].suppliers[0].name, "Acme Labels");
        assert_eq!(trims[0].suppliers[0].country, "Vietnam");
    }

    #[test]
    fn test_details_attach_to_latest_supplier_only() {
        let trims = scan(
            "123456 Care Label\n\
             Supplier: Acme Labels\n\
             Supplier: Globex Trims\n\
             Art No: GT-99\n\
             Country: China\n",
        );
        let suppliers = &trims[0].suppliers;
        assert_eq!(suppliers.len(), 2);
        assert_eq!(suppliers[0].art_no, "");
        assert_eq!(suppliers[0].country, "");
        assert_eq!(suppliers[1].art_no, "GT-99");
        assert_eq!(suppliers[1].country, "China");
    }

    #[test]
    fn test_suppliers_do_not_carry_across_trims() {
        let trims = scan(
            "123456 Care Label\n\
             Supplier: Acme Labels\n\
             654321 Hangtag\n\
             Country: Italy\n",
        );
        assert_eq!(trims[0].suppliers[0].country, "");
        assert!(trims[1].suppliers.is_empty());
    }

    #[test]
    fn test_end_keyword_stops_scan_and_keeps_open_trim() {
        let trims = scan(
            "123456 Care Label\n\
             UM: EA\n\
             END OF PART SPECS\n\
             654321 Hangtag\n",
        );
        assert_eq!(trims.len(), 1);
        assert_eq!(trims[0].number, "123456");
        assert_eq!(trims[0].um, "EA");
    }

    #[test]
    fn test_section_keywords_stop_scan() {
        for keyword in ["Color BOM", "Measurements"] {
            let text = format!("123456 Care Label\n{keyword}\n654321 Hangtag\n");
            let trims = scan(&text);
            assert_eq!(trims.len(), 1, "{keyword}");
        }
    }

    #[test]
    fn test_header_wins_over_terminator() {
        let trims = scan("123456 Legend Patch\n654321 Hangtag\n");
        assert_eq!(trims.len(), 2);
        assert_eq!(trims[0].description, "Legend Patch");
    }

    #[test]
    fn test_terminator_before_any_trim_is_ignored() {
        let trims = scan("Legend\n123456 Care Label\n");
        assert_eq!(trims.len(), 1);
    }

    #[test]
    fn test_marker_line_is_consumed() {
        let mut scanner = TrimScanner::new();
        assert_eq!(scanner.feed("PART SPECIFICATIONS 123456 Zipper"), Flow::Continue);
        assert!(scanner.in_part_specs());
        assert_eq!(scanner.state(), ScanState::Idle);
    }

    #[test]
    fn test_state_transitions() {
        let mut scanner = TrimScanner::new();
        assert_eq!(scanner.state(), ScanState::Idle);
        scanner.feed("123456 Care Label");
        assert_eq!(scanner.state(), ScanState::InTrim);
        scanner.feed("Supplier: Acme Labels");
        assert_eq!(scanner.state(), ScanState::InSupplier);
        scanner.feed("654321 Hangtag");
        assert_eq!(scanner.state(), ScanState::InTrim);
        assert_eq!(scanner.finish().len(), 2);
    }
}
