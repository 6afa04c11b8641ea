//! Task result output formatting.

use serde::Serialize;
use serde_json::{Map, Value};
use telemars_api::result::Table;

use super::helpers::{format_cell, format_header, truncate_str};

/// Widest a column is allowed to grow.
const MAX_COLUMN_WIDTH: usize = 40;

/// JSON output structure for a task result.
#[derive(Serialize)]
pub struct ResultOutput<'a> {
    pub columns: &'a [String],
    pub rows: Vec<Map<String, Value>>,
}

/// Formats a result table as JSON records.
pub fn format_result_json(table: &Table) -> Result<String, serde_json::Error> {
    let output = ResultOutput {
        columns: &table.columns,
        rows: table.records(),
    };
    serde_json::to_string_pretty(&output)
}

/// Formats a result table as aligned text columns.
pub fn format_result_table(table: &Table, use_colors: bool) -> String {
    if table.is_empty() {
        return "No rows returned.\n".to_string();
    }

    let cells: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|value| truncate_str(&format_cell(value), MAX_COLUMN_WIDTH))
                .collect()
        })
        .collect();
    let headers: Vec<String> = table
        .columns
        .iter()
        .map(|c| truncate_str(c, MAX_COLUMN_WIDTH))
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            cells
                .iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain([header.chars().count()])
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut output = format_header(&join_padded(&headers, &widths), use_colors);
    for row in &cells {
        output.push_str(&join_padded(row, &widths));
        output.push('\n');
    }
    output
}

fn join_padded(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    padded.join("  ").trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Table {
        Table {
            columns: vec!["tvCompanyName".to_string(), "RtgPer All 25-50".to_string()],
            rows: vec![
                vec![json!("NTV"), json!(0.42)],
                vec![json!("ZVEZDA"), json!(null)],
            ],
        }
    }

    #[test]
    fn test_format_result_table() {
        let output = format_result_table(&sample(), false);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "tvCompanyName  RtgPer All 25-50");
        assert_eq!(lines[1], "NTV            0.42");
        assert_eq!(lines[2], "ZVEZDA");
    }

    #[test]
    fn test_format_result_table_empty() {
        let output = format_result_table(&Table::default(), false);
        assert_eq!(output, "No rows returned.\n");
    }

    #[test]
    fn test_format_result_json() {
        let json = format_result_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["columns"][1], "RtgPer All 25-50");
        assert_eq!(value["rows"][0]["tvCompanyName"], "NTV");
        assert_eq!(value["rows"][1]["RtgPer All 25-50"], json!(null));
    }
}
