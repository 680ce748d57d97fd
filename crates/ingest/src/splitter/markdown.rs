//! Markdown section splitting.
//!
//! Produces paragraph-sized fragments: heading lines start a new fragment,
//! blank lines close the current one. Fragments keep a trailing newline so
//! the serial merger can concatenate them without gluing lines together.

/// Split markdown into heading/blank-line delimited sections.
pub fn split_sections(text: &str) -> Vec<String> {
    let mut sections = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        let is_heading = line.starts_with('#');
        let is_blank = line.trim().is_empty();

        if (is_heading || is_blank) && !current.trim().is_empty() {
            sections.push(std::mem::take(&mut current));
        }
        if is_blank {
            current.clear();
            continue;
        }
        current.push_str(line);
        current.push('\n');
    }
    if !current.trim().is_empty() {
        sections.push(current);
    }
    sections
}
