//! Minimal CSV encoding for label/value rows.
//!
//! Rows may have different cell counts. No header line is written.

/// Quote a field when it contains a separator, a quote or a line break.
pub fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Encode rows as UTF-8 CSV, one `\n`-terminated line per row.
pub fn write_rows(rows: &[Vec<String>]) -> Vec<u8> {
    let mut out = String::new();
    for row in rows {
        let cells: Vec<String> = row.iter().map(|cell| escape_field(cell)).collect();
        out.push_str(&cells.join(","));
        out.push('\n');
    }
    out.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_fields_are_left_alone() {
        assert_eq!(escape_field("Dr. Smith"), "Dr. Smith");
    }

    #[test]
    fn special_fields_are_quoted() {
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("line1\nline2"), "\"line1\nline2\"");
    }

    #[test]
    fn rows_of_mixed_width() {
        let rows = vec![
            vec!["Name".to_string(), "Doe, Jane".to_string()],
            vec!["OSATS Metrics and Scores".to_string()],
        ];
        let bytes = write_rows(&rows);
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "Name,\"Doe, Jane\"\nOSATS Metrics and Scores\n"
        );
    }
}
