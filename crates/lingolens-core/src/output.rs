//! JSON output helpers for the single-document stdout contract.

use serde::Serialize;
use std::io::{self, Write};

/// Serialize a value to a JSON string, pretty-printed or compact.
pub fn to_json_string<T: Serialize>(value: &T, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

/// Write a value as a single JSON document followed by a newline.
pub fn write_json<W: Write, T: Serialize>(
    writer: &mut W,
    value: &T,
    pretty: bool,
) -> io::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, value).map_err(io::Error::other)?;
    } else {
        serde_json::to_writer(&mut *writer, value).map_err(io::Error::other)?;
    }
    writeln!(writer)?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Sample {
        success: bool,
        error: String,
    }

    #[test]
    fn test_compact_output() {
        let sample = Sample {
            success: false,
            error: "boom".to_string(),
        };
        let mut buffer = Vec::new();
        write_json(&mut buffer, &sample, false).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "{\"success\":false,\"error\":\"boom\"}\n");
    }

    #[test]
    fn test_pretty_output_indents() {
        let sample = Sample {
            success: true,
            error: String::new(),
        };
        let text = to_json_string(&sample, true).unwrap();
        assert!(text.contains("\n  \"success\": true"));
    }
}
