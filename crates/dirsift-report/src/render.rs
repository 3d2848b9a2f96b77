//! Record renderers, one per report format.
//!
//! Pure functions from a metadata record to a string; the writer decides
//! where the strings land. Field order is the record's own order.

use crate::error::ReportError;
use dirsift_core::AnalysisResult;
use serde_json::Value;

/// Display form of a field value: bare strings, JSON for everything else.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Pretty-printed JSON object.
pub fn json(record: &AnalysisResult) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(record)?)
}

/// One header row of field names, one row of values.
pub fn csv(record: &AnalysisResult) -> Result<String, ReportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(record.keys())?;
    writer.write_record(record.values().map(|v| value_text(v)))?;
    let bytes = writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Two-column layout: right-aligned field name, tab, value.
pub fn col(record: &AnalysisResult) -> String {
    let mut out = String::new();
    for (field, value) in record {
        out.push_str(&format!("{:>70}\t{}\n", field, value_text(value)));
    }
    out
}

/// Plain `field: value` lines.
pub fn raw(record: &AnalysisResult) -> String {
    let mut out = String::new();
    for (field, value) in record {
        out.push_str(&format!("{}: {}\n", field, value_text(value)));
    }
    out
}

/// Minimal HTML page wrapping the raw rendering.
pub fn html(title: &str, raw_content: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <title>File tags: {title}</title>\n\
         </head>\n\
         <body>\n\
         <pre>\n\
         {raw_content}\
         </pre>\n\
         </body>\n\
         </html>\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> AnalysisResult {
        let mut record = AnalysisResult::new();
        record.insert("name".into(), json!("x.bin"));
        record.insert("size_bytes".into(), json!(42));
        record
    }

    #[test]
    fn json_is_a_pretty_object() {
        let rendered = json(&sample()).unwrap();
        assert!(rendered.starts_with('{'));
        assert!(rendered.contains("\"name\": \"x.bin\""));
        assert!(rendered.contains("\"size_bytes\": 42"));
    }

    #[test]
    fn csv_is_header_plus_one_row() {
        let rendered = csv(&sample()).unwrap();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines, ["name,size_bytes", "x.bin,42"]);
    }

    #[test]
    fn col_right_aligns_field_names() {
        let rendered = col(&sample());
        assert!(rendered.contains("name\tx.bin\n"));
        assert!(rendered.lines().all(|l| l.contains('\t')));
    }

    #[test]
    fn raw_is_field_colon_value() {
        let rendered = raw(&sample());
        assert_eq!(rendered, "name: x.bin\nsize_bytes: 42\n");
    }

    #[test]
    fn html_wraps_the_raw_rendering() {
        let page = html("x.bin", "name: x.bin\n");
        assert!(page.contains("<title>File tags: x.bin</title>"));
        assert!(page.contains("<pre>"));
        assert!(page.contains("name: x.bin"));
    }

    /// Bare strings render unquoted; everything else as JSON.
    #[test]
    fn value_text_strips_string_quotes_only() {
        assert_eq!(value_text(&json!("plain")), "plain");
        assert_eq!(value_text(&json!(7)), "7");
        assert_eq!(value_text(&json!(null)), "null");
        assert_eq!(value_text(&json!(["a"])), "[\"a\"]");
    }
}
