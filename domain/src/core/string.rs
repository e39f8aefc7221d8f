//! String utilities for the domain layer.

/// Truncate a string to a maximum byte length with ellipsis (UTF-8 safe).
///
/// The cut is moved back to the nearest character boundary, so the result
/// never splits a multi-byte character.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let target = max_len.saturating_sub(3);
        let mut end = target.min(s.len());
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

/// Single-line preview of collaborator output for logs and error messages.
pub fn preview(s: &str, max_len: usize) -> String {
    let flat = s.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate(&flat, max_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_multibyte() {
        // "é" is 2 bytes: byte 5 is inside the third "é", cut back to 4
        assert_eq!(truncate("ééééé", 8), "éé...");
    }

    #[test]
    fn test_preview_flattens_whitespace() {
        assert_eq!(preview("Sure!\n\n  {\"choice\": \"A\"}", 100), "Sure! {\"choice\": \"A\"}");
        assert_eq!(preview("a  b  c  d  e  f", 8), "a b c...");
    }
}
