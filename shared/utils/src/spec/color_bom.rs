//! Color bill of materials scanner.

use tracing::debug;
use trimflow_models::{ColorComponent, ColorEntry};

use super::rules::{is_color_header, COLOR_BOM_ANCHOR};

/// Scan from the first `Color BOM` line to the end of input.
///
/// A single capitalized word opens a color; `component - usage` lines
/// attach to the open color. Everything else is skipped.
pub fn scan_color_bom(lines: &[&str]) -> Vec<ColorEntry> {
    let Some(start) = lines.iter().position(|line| line.contains(COLOR_BOM_ANCHOR)) else {
        return Vec::new();
    };

    let mut entries = Vec::new();
    let mut current: Option<ColorEntry> = None;

    for line in &lines[start..] {
        if is_color_header(line) {
            debug!(color = *line, "Found color");
            if let Some(done) = current.replace(ColorEntry::new(*line)) {
                entries.push(done);
            }
            continue;
        }

        let Some(color) = current.as_mut() else {
            continue;
        };
        if let Some((component, usage)) = line.split_once('-') {
            color.components.push(ColorComponent {
                component: component.trim().to_string(),
                usage: usage.trim().to_string(),
            });
        }
    }

    entries.extend(current);
    entries
}
