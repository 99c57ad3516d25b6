// Plain-text grid tables for terminal output:
//
// +----+-------+
// | ID | Name  |
// +====+=======+
// |  1 | Alice |
// +----+-------+
//
// Columns whose cells are all numeric are right-aligned.

use unicode_width::UnicodeWidthStr;

pub fn render_grid<S: AsRef<str>>(headers: &[&str], rows: &[Vec<S>]) -> String {
    let cols = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in rows {
        for (i, cell) in row.iter().take(cols).enumerate() {
            widths[i] = widths[i].max(cell.as_ref().width());
        }
    }
    let numeric: Vec<bool> = (0..cols)
        .map(|i| {
            !rows.is_empty()
                && rows
                    .iter()
                    .all(|r| r.get(i).map_or(false, |c| is_number(c.as_ref())))
        })
        .collect();

    let mut out = String::new();
    out.push_str(&rule(&widths, '-'));
    out.push_str(&line(headers, &widths, &vec![false; cols]));
    out.push_str(&rule(&widths, '='));
    for row in rows {
        let cells: Vec<&str> = (0..cols)
            .map(|i| row.get(i).map_or("", |c| c.as_ref()))
            .collect();
        out.push_str(&line(&cells, &widths, &numeric));
        out.push_str(&rule(&widths, '-'));
    }
    if rows.is_empty() {
        // Close the header block.
        out.push_str(&rule(&widths, '-'));
    }
    out
}

fn rule(widths: &[usize], fill: char) -> String {
    let mut s = String::from("+");
    for w in widths {
        s.extend(std::iter::repeat(fill).take(w + 2));
        s.push('+');
    }
    s.push('\n');
    s
}

fn line(cells: &[&str], widths: &[usize], right: &[bool]) -> String {
    let mut s = String::from("|");
    for ((cell, w), r) in cells.iter().zip(widths).zip(right) {
        let pad = " ".repeat(w.saturating_sub(cell.width()));
        if *r {
            s.push_str(&format!(" {pad}{cell} |"));
        } else {
            s.push_str(&format!(" {cell}{pad} |"));
        }
    }
    s.push('\n');
    s
}

fn is_number(s: &str) -> bool {
    !s.is_empty() && s.parse::<f64>().is_ok()
}
