//! Input sanitization for pasted text.

/// Flatten pasted text onto a single input line.
///
/// Tabs become four spaces, any run of line breaks becomes one space, and
/// other control characters are dropped so they cannot corrupt the TUI.
pub fn sanitize_paste(text: &str) -> String {
    let mut sanitized = String::with_capacity(text.len());
    let mut after_break = false;

    for c in text.chars() {
        match c {
            '\r' | '\n' => {
                if !after_break && !sanitized.is_empty() {
                    sanitized.push(' ');
                }
                after_break = true;
                continue;
            }
            '\t' => sanitized.push_str("    "),
            _ if !c.is_control() => sanitized.push(c),
            _ => {}
        }
        after_break = false;
    }

    if after_break && sanitized.ends_with(' ') {
        sanitized.pop();
    }
    sanitized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(sanitize_paste("hello world"), "hello world");
    }

    #[test]
    fn tabs_expand_to_spaces() {
        assert_eq!(sanitize_paste("a\tb"), "a    b");
    }

    #[test]
    fn line_breaks_collapse_to_single_space() {
        assert_eq!(sanitize_paste("one\r\ntwo\n\nthree"), "one two three");
    }

    #[test]
    fn leading_and_trailing_breaks_are_dropped() {
        assert_eq!(sanitize_paste("\nhi\n"), "hi");
    }

    #[test]
    fn control_characters_are_removed() {
        assert_eq!(sanitize_paste("be\x07ep\x1b"), "beep");
    }
}
