//! Table rendering.

use ww_dom::{Element, NodeKind};

use crate::engine::Converter;
use crate::inline::GENERIC_IMAGE_FILE;

/// Header cell prefix.
const HEADER_CELL: &str = "!";

/// Row separator preceding every body row.
const ROW_SEPARATOR: &str = "|-";

/// File substituted for the generic image marker in note-like tables.
const NOTE_ICON_FILE: &str = "Note Icon1.png";

/// Case-insensitive content triggers for the note icon substitution.
const NOTE_TRIGGERS: &[&str] = &["info", "note", "shortcut ", "collab "];

impl Converter<'_> {
    /// Render a table element.
    ///
    /// The first row is a header row only when the table has at least two
    /// rows. Cells holding a lone hyphen, the imported "not applicable"
    /// convention, render blank.
    pub(crate) fn render_table(&mut self, table: &Element) -> String {
        let mut rows = Vec::new();
        collect_rows(table, &mut rows);
        let single_row = rows.len() == 1;

        let mut out = self.tokens.table_start.clone();
        out.push('\n');

        for (index, row) in rows.iter().enumerate() {
            let header = index == 0 && !single_row;
            if !header {
                out.push_str(ROW_SEPARATOR);
                out.push('\n');
            }
            for cell in row.child_elements() {
                if !matches!(cell.kind, NodeKind::Cell { .. }) {
                    continue;
                }
                let text = self.cell_text(cell, header);
                if header {
                    out.push_str(HEADER_CELL);
                    out.push_str(&text);
                    out.push('\n');
                } else if text.is_empty() {
                    out.push_str(&self.tokens.table_column);
                    out.push('\n');
                } else if text.starts_with(&self.tokens.bullet)
                    || text.starts_with(&self.tokens.numbering)
                {
                    // A leading list token glued to the column token would
                    // break block parsing in the target renderer.
                    out.push_str(&self.tokens.table_column);
                    out.push('\n');
                    out.push_str(&text);
                    out.push('\n');
                } else {
                    out.push_str(&self.tokens.table_column);
                    out.push(' ');
                    out.push_str(&text);
                    out.push('\n');
                }
            }
        }

        if is_note_table(&out) {
            out = out.replace(GENERIC_IMAGE_FILE, NOTE_ICON_FILE);
        }
        out.push_str(&self.tokens.table_end);
        out
    }

    /// A cell's rendered text. Header cells strip boundary quote runs
    /// left by inline markers abutting the cell edge; body cells keep
    /// their markers.
    fn cell_text(&mut self, cell: &Element, header: bool) -> String {
        if cell.text_content().trim() == "-" {
            return String::new();
        }
        let text = self.render_inline(cell, true);
        let text = text.trim();
        if header {
            text.trim_matches('\'').to_owned()
        } else {
            text.to_owned()
        }
    }
}

/// Collect row elements in order, descending through grouping elements
/// but never into a nested table.
fn collect_rows<'a>(element: &'a Element, rows: &mut Vec<&'a Element>) {
    for child in element.child_elements() {
        match child.kind {
            NodeKind::Row => rows.push(child),
            NodeKind::Table => {}
            _ => collect_rows(child, rows),
        }
    }
}

fn is_note_table(fragment: &str) -> bool {
    let lower = fragment.to_lowercase();
    NOTE_TRIGGERS.iter().any(|trigger| lower.contains(trigger))
}
