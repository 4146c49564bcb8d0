use serde_json::{Map, Value};

/// Keep rows whose values, joined and lowercased, contain the search term.
/// A blank term keeps every row.
pub fn filter_rows(rows: &[Map<String, Value>], search_term: &str) -> Vec<Map<String, Value>> {
    let needle = search_term.trim().to_lowercase();
    if needle.is_empty() {
        return rows.to_vec();
    }

    rows.iter()
        .filter(|row| {
            let haystack = row
                .values()
                .map(cell_text)
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase();
            haystack.contains(&needle)
        })
        .cloned()
        .collect()
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
