//! Structural reconstruction of a layout-analysis result.
//!
//! Layout engines return flat character offsets with overlapping structural
//! metadata (paragraph roles, tables, pages). The sweep below reconstructs
//! reading order deterministically from those offsets alone: headings become
//! `<h1>`/`<h2>` tags, table spans are replaced by rendered table markup, and
//! pages are concatenated in order with one trailing space each.

use std::collections::{HashMap, HashSet};

use super::table::table_to_html;
use super::types::{AnalyzeResult, Table, ROLE_SECTION_HEADING, ROLE_TITLE};

fn heading_tag(role: &str) -> Option<&'static str> {
    match role {
        ROLE_TITLE => Some("h1"),
        ROLE_SECTION_HEADING => Some("h2"),
        _ => None,
    }
}

/// Linearize `result` into a single text stream with inline heading and
/// table markup.
pub fn extract_structured_text(result: &AnalyzeResult) -> String {
    // Roles are inferred purely from start/end offset coincidence of a
    // paragraph's first span; no characters are consumed for them.
    let mut roles_start: HashMap<usize, &str> = HashMap::new();
    let mut roles_end: HashMap<usize, &str> = HashMap::new();
    for paragraph in &result.paragraphs {
        if let (Some(role), Some(span)) = (paragraph.role.as_deref(), paragraph.spans.first()) {
            roles_start.insert(span.offset, role);
            roles_end.insert(span.end(), role);
        }
    }

    let content: Vec<char> = result.content.chars().collect();
    let mut full_text = String::with_capacity(content.len());

    for (page_num, page) in result.pages.iter().enumerate() {
        let Some(page_span) = page.spans.first() else {
            continue;
        };
        let page_offset = page_span.offset;
        let page_length = page_span.length;

        let tables_on_page: Vec<&Table> = result
            .tables
            .iter()
            .filter(|t| {
                t.bounding_regions
                    .first()
                    .is_some_and(|r| r.page_number == page_num + 1)
            })
            .collect();

        // Mark every character offset covered by a table span with that
        // table's index. Colliding spans across tables take the later table
        // id (scan order); well-formed input never collides.
        let mut table_chars: Vec<Option<usize>> = vec![None; page_length];
        for (table_id, table) in tables_on_page.iter().enumerate() {
            for span in &table.spans {
                for i in 0..span.length {
                    let position = span.offset + i;
                    if position >= page_offset {
                        if let Some(slot) = table_chars.get_mut(position - page_offset) {
                            *slot = Some(table_id);
                        }
                    }
                }
            }
        }

        let mut page_text = String::new();
        let mut added_tables: HashSet<usize> = HashSet::new();
        for (idx, slot) in table_chars.iter().enumerate() {
            match slot {
                None => {
                    let position = page_offset + idx;
                    if let Some(tag) = roles_start.get(&position).and_then(|r| heading_tag(r)) {
                        page_text.push_str(&format!("<{tag}>"));
                    }
                    if let Some(tag) = roles_end.get(&position).and_then(|r| heading_tag(r)) {
                        page_text.push_str(&format!("</{tag}>"));
                    }
                    if let Some(c) = content.get(position) {
                        page_text.push(*c);
                    }
                }
                Some(table_id) => {
                    // The first covered offset emits the whole table; the
                    // remaining covered offsets emit nothing.
                    if added_tables.insert(*table_id) {
                        page_text.push_str(&table_to_html(tables_on_page[*table_id]));
                    }
                }
            }
        }

        page_text.push(' ');
        full_text.push_str(&page_text);
    }

    full_text
}
