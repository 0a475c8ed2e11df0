/// Pure string processing utilities (Discord-agnostic)

/// Trim and normalize whitespace in a string
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Check if a string is empty after trimming
pub fn is_empty_or_whitespace(text: &str) -> bool {
    text.trim().is_empty()
}

/// Split one CSV line on commas, honoring double-quoted fields
///
/// A doubled quote inside a quoted field is an escaped quote.
pub fn split_csv_line(line: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => values.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    values.push(current);

    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  Full   Name "), "Full Name");
        assert_eq!(normalize_whitespace(""), "");
    }

    #[test]
    fn test_is_empty_or_whitespace() {
        assert!(is_empty_or_whitespace(""));
        assert!(is_empty_or_whitespace("   \t"));
        assert!(!is_empty_or_whitespace(" a "));
    }

    #[test]
    fn test_split_csv_line_plain() {
        assert_eq!(split_csv_line("a,b,,c"), vec!["a", "b", "", "c"]);
    }

    #[test]
    fn test_split_csv_line_quoted() {
        assert_eq!(
            split_csv_line(r#"1,"Lovelace, Ada","He said ""hi""",x"#),
            vec!["1", "Lovelace, Ada", r#"He said "hi""#, "x"]
        );
    }
}
