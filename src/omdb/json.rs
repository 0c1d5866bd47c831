//! JSON decoding for OMDb payloads with readable failure messages.

use anyhow::Result;

/// Decode `body`, reporting the JSON path, the type mismatch and a snippet of
/// the offending line when decoding fails.
pub fn parse_json_with_context<T: serde::de::DeserializeOwned>(body: &str) -> Result<T> {
    let de = &mut serde_json::Deserializer::from_str(body);
    serde_path_to_error::deserialize(de).map_err(|err| {
        let inner = err.inner();
        let (line, column) = (inner.line(), inner.column());
        let path = err.path().to_string();

        let raw = inner.to_string();
        let location = format!(" at line {line} column {column}");
        let message = describe_mismatch(raw.strip_suffix(&location).unwrap_or(&raw));

        let prefix = if path.is_empty() || path == "." {
            String::new()
        } else {
            format!("at path '{path}': ")
        };
        anyhow::anyhow!(
            "{prefix}{message} (line {line} col {column})\n{}",
            snippet(body, line, column, 24)
        )
    })
}

/// Turn serde's "invalid type: X, expected Y" into "expected Y, got X".
fn describe_mismatch(message: &str) -> String {
    if let Some(rest) = message.strip_prefix("invalid type: ")
        && let Some((actual, expected)) = rest.split_once(", expected ")
    {
        return format!("expected {}, got {actual}", expected.trim());
    }
    message.to_owned()
}

fn snippet(body: &str, line: usize, column: usize, width: usize) -> String {
    let text = body.lines().nth(line.saturating_sub(1)).unwrap_or("");
    if text.is_empty() {
        return "(empty line)".to_owned();
    }

    // serde columns are 1-based byte offsets
    let at = column.saturating_sub(1).min(text.len());
    let mut start = at.saturating_sub(width / 2);
    while !text.is_char_boundary(start) {
        start -= 1;
    }
    let mut end = (at + width / 2).min(text.len());
    while !text.is_char_boundary(end) {
        end += 1;
    }

    let marker = " ".repeat(at - start) + "^";
    format!("...{}...\n   {marker}", &text[start..end])
}
