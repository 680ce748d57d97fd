//! Table rendering: cell grid to inline HTML.

use super::types::{Table, TableCell};

/// Render a table as HTML, rows grouped by `row_index` ascending and cells
/// within a row ordered by `column_index` ascending, regardless of span
/// ordering in the source. Span attributes are emitted only when > 1.
pub(crate) fn table_to_html(table: &Table) -> String {
    let mut html = String::from("<table>");
    for row in 0..table.row_count {
        let mut cells: Vec<&TableCell> = table
            .cells
            .iter()
            .filter(|cell| cell.row_index == row)
            .collect();
        cells.sort_by_key(|cell| cell.column_index);

        html.push_str("<tr>");
        for cell in cells {
            let tag = match cell.kind.as_deref() {
                Some("columnHeader") | Some("rowHeader") => "th",
                _ => "td",
            };
            html.push('<');
            html.push_str(tag);
            if cell.column_span > 1 {
                html.push_str(&format!(" colSpan={}", cell.column_span));
            }
            if cell.row_span > 1 {
                html.push_str(&format!(" rowSpan={}", cell.row_span));
            }
            html.push('>');
            html.push_str(&escape_html(&cell.content));
            html.push_str(&format!("</{tag}>"));
        }
        html.push_str("</tr>");
    }
    html.push_str("</table>");
    html
}

/// Entity-escape cell text before insertion into markup.
pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::types::BoundingRegion;

    fn cell(row: usize, col: usize, content: &str) -> TableCell {
        TableCell {
            row_index: row,
            column_index: col,
            row_span: 1,
            column_span: 1,
            kind: None,
            content: content.to_string(),
        }
    }

    fn table(row_count: usize, cells: Vec<TableCell>) -> Table {
        Table {
            row_count,
            spans: vec![],
            cells,
            bounding_regions: vec![BoundingRegion { page_number: 1 }],
        }
    }

    #[test]
    fn renders_rows_in_row_major_order() {
        // Cells deliberately out of order in the source list.
        let t = table(2, vec![cell(1, 1, "d"), cell(0, 1, "b"), cell(1, 0, "c"), cell(0, 0, "a")]);
        assert_eq!(
            table_to_html(&t),
            "<table><tr><td>a</td><td>b</td></tr><tr><td>c</td><td>d</td></tr></table>"
        );
    }

    #[test]
    fn header_kinds_render_as_th() {
        let mut header = cell(0, 0, "Name");
        header.kind = Some("columnHeader".to_string());
        let mut row_header = cell(1, 0, "Total");
        row_header.kind = Some("rowHeader".to_string());
        let t = table(2, vec![header, row_header]);
        let html = table_to_html(&t);
        assert!(html.contains("<th>Name</th>"));
        assert!(html.contains("<th>Total</th>"));
    }

    #[test]
    fn span_attributes_only_when_above_one() {
        let mut wide = cell(0, 0, "w");
        wide.column_span = 2;
        wide.row_span = 3;
        let t = table(1, vec![wide, cell(0, 2, "x")]);
        let html = table_to_html(&t);
        assert!(html.contains("<td colSpan=2 rowSpan=3>w</td>"));
        assert!(html.contains("<td>x</td>"));
    }

    #[test]
    fn cell_text_is_entity_escaped() {
        let t = table(1, vec![cell(0, 0, "a < b & \"c\"")]);
        assert!(table_to_html(&t).contains("a &lt; b &amp; &quot;c&quot;"));
    }
}
