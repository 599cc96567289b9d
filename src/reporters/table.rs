//! Plain-text column layout shared by the table reporters

use crate::error::{TpsError, TpsResult};

/// Lay out `rows` under `headers`.
///
/// Each column is as wide as its widest cell (header included) plus one
/// space. Output starts with a blank line, then the header, a dash rule as
/// long as the full row, and one line per row. Cells are left-aligned.
pub fn render_table<S: AsRef<str>>(headers: &[&str], rows: &[Vec<S>]) -> TpsResult<String> {
    if rows.is_empty() {
        return Err(TpsError::InvalidArgument(
            "Nothing to tabulate: the table has no rows".into(),
        ));
    }
    if let Some(bad) = rows.iter().find(|row| row.len() != headers.len()) {
        return Err(TpsError::InvalidArgument(format!(
            "Table row has {} cells but there are {} columns",
            bad.len(),
            headers.len()
        )));
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count() + 1).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.as_ref().chars().count() + 1);
        }
    }

    let mut out = String::from("\n");
    push_line(&mut out, headers.iter().copied(), &widths);
    out.push_str(&"-".repeat(widths.iter().sum()));
    out.push('\n');
    for row in rows {
        push_line(&mut out, row.iter().map(|cell| cell.as_ref()), &widths);
    }
    Ok(out)
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    for (cell, width) in cells.zip(widths) {
        out.push_str(&format!("{cell:<width$}"));
    }
    out.push('\n');
}
