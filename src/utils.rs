use serde_json::Value;

/// Tag value as display text, without the quotes `Value::to_string` puts around strings.
pub fn value_to_clean_string(val: &Value) -> String {
    match val {
        Value::String(s) => s.clone(),
        _ => val.to_string(),
    }
}

/// Captured process output as text. exiftool output is UTF-8 but file names may not be.
pub(crate) fn output_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// `Warning:` lines exiftool printed on stderr.
pub(crate) fn warning_lines(stderr: &str) -> impl Iterator<Item = &str> {
    stderr.lines().filter(|line| line.contains("Warning:"))
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_to_clean_string() {
        assert_eq!(value_to_clean_string(&json!("Huawei")), "Huawei");
        assert_eq!(value_to_clean_string(&json!(2688)), "2688");
    }

    #[test]
    fn test_warning_lines() {
        let stderr = "Warning: [minor] Bad format\nError: nope\nWarning: Truncated\n";
        let warnings: Vec<_> = warning_lines(stderr).collect();
        assert_eq!(warnings, ["Warning: [minor] Bad format", "Warning: Truncated"]);
    }

    #[test]
    fn test_output_text_is_lossy() {
        assert_eq!(output_text(b"ok\xFF"), "ok\u{FFFD}");
    }
}
