//! Plain-text table renderer: space-padded columns, header first.

use crate::ReportModel;

const GAP: &str = "  ";

pub fn render_text(m: &ReportModel) -> String {
    let headers: Vec<&str> = m.columns.iter().map(|c| c.as_str()).collect();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &m.rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, headers.iter().copied(), &widths);
    for row in &m.rows {
        push_line(&mut out, row.iter().map(String::as_str), &widths);
    }
    if let Some(msg) = m.message {
        out.push_str(msg);
        out.push('\n');
    }
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let mut line = String::new();
    for (i, (cell, w)) in cells.zip(widths).enumerate() {
        if i > 0 {
            line.push_str(GAP);
        }
        line.push_str(cell);
        let pad = w.saturating_sub(cell.chars().count());
        line.extend(std::iter::repeat(' ').take(pad));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}
