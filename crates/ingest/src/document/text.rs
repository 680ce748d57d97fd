//! Plain-text cleanup and title heuristics.

const TITLE_PROPERTY: &str = "title: ";

/// Normalize whitespace in extracted text.
///
/// Collapses runs of 2+ non-newline whitespace into one space, runs of 2+
/// hyphens into exactly two, reduces whitespace-only lines to empty lines,
/// collapses blank-line runs into a single newline, and trims the ends.
/// Whitespace collapsing runs first so space-only lines become truly empty
/// before the blank-line pass. Idempotent.
pub fn cleanup_content(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\n' && c.is_whitespace() {
            if matches!(chars.peek(), Some(&n) if n != '\n' && n.is_whitespace()) {
                while matches!(chars.peek(), Some(&n) if n != '\n' && n.is_whitespace()) {
                    chars.next();
                }
                out.push(' ');
            } else {
                out.push(c);
            }
        } else if c == '-' && chars.peek() == Some(&'-') {
            while chars.peek() == Some(&'-') {
                chars.next();
            }
            out.push_str("--");
        } else {
            out.push(c);
        }
    }

    // Blank-line pass: whitespace-only lines vanish, newline runs collapse.
    let mut result = String::with_capacity(out.len());
    let mut pending_newline = false;
    for line in out.split('\n') {
        let line = if line.trim().is_empty() { "" } else { line };
        if line.is_empty() {
            pending_newline = !result.is_empty();
            continue;
        }
        if pending_newline || !result.is_empty() {
            result.push('\n');
        }
        result.push_str(line);
        pending_newline = false;
    }
    result.trim().to_string()
}

/// Title for a plain-text document: the first line carrying a `title: `
/// property, else the first line containing any alphanumeric character, else
/// the caller-supplied fallback name.
pub fn extract_title(content: &str, fallback: &str) -> String {
    first_line_with_property(content, TITLE_PROPERTY)
        .or_else(|| first_alphanumeric_line(content))
        .unwrap_or_else(|| fallback.to_string())
}

fn first_line_with_property(content: &str, property: &str) -> Option<String> {
    content
        .lines()
        .find(|line| line.starts_with(property))
        .map(|line| line[property.len()..].trim().to_string())
}

fn first_alphanumeric_line(content: &str) -> Option<String> {
    content
        .lines()
        .find(|line| line.chars().any(|c| c.is_alphanumeric()))
        .map(|line| line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(cleanup_content("a    b\tc"), "a b\tc");
        assert_eq!(cleanup_content("a \t b"), "a b");
    }

    #[test]
    fn collapses_hyphen_runs_to_two() {
        assert_eq!(cleanup_content("a ----- b"), "a -- b");
        assert_eq!(cleanup_content("a - b"), "a - b");
        assert_eq!(cleanup_content("a -- b"), "a -- b");
    }

    #[test]
    fn collapses_blank_lines() {
        assert_eq!(cleanup_content("a\n\n\nb"), "a\nb");
        // A line of only spaces is first reduced, then dropped as blank.
        assert_eq!(cleanup_content("a\n   \nb"), "a\nb");
    }

    #[test]
    fn trims_ends() {
        assert_eq!(cleanup_content("  \n a \n  "), "a");
    }

    #[test]
    fn cleanup_is_idempotent() {
        for raw in [
            "a    b\n\n\nc --- d\n \n e",
            "  leading\nand   trailing  ",
            "one\ttab",
            "",
        ] {
            let once = cleanup_content(raw);
            assert_eq!(cleanup_content(&once), once, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn title_from_property_line() {
        let content = "preamble\ntitle: My Document\nbody";
        assert_eq!(extract_title(content, "fallback"), "My Document");
    }

    #[test]
    fn title_property_is_case_sensitive() {
        let content = "Title: Nope\nActual first line";
        assert_eq!(extract_title(content, "fallback"), "Title: Nope");
    }

    #[test]
    fn title_from_first_alphanumeric_line() {
        let content = "---\n***\nChapter 1\nmore";
        assert_eq!(extract_title(content, "fallback"), "Chapter 1");
    }

    #[test]
    fn title_falls_back_to_name() {
        assert_eq!(extract_title("---\n###\n", "notes.txt"), "notes.txt");
    }
}
