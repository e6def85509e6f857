use colored::{ColoredString, Colorize};

use revdiff_format::{Marker, Row, Side, UnifiedLine, UnifiedRow};

/// Two-column rendering: old line on the left, new line on the right.
pub fn split(rows: &[Row]) -> Vec<String> {
    let width = rows
        .iter()
        .filter_map(Row::as_line)
        .map(|row| row.old.text.chars().count())
        .max()
        .unwrap_or(0);

    rows.iter()
        .map(|row| match row {
            Row::Header { old_line, new_line } => header(*old_line, *new_line),
            Row::Line(row) => {
                let pad = width - row.old.text.chars().count();
                format!(
                    "{}{} | {}",
                    side(&row.old),
                    " ".repeat(pad),
                    side(&row.new)
                )
            }
        })
        .collect()
}

/// Single-column rendering.
pub fn unified(rows: &[UnifiedRow]) -> Vec<String> {
    rows.iter()
        .map(|row| match row {
            UnifiedRow::Header { old_line, new_line } => header(*old_line, *new_line),
            UnifiedRow::Line(line) => unified_line(line),
        })
        .collect()
}

fn header(old_line: usize, new_line: usize) -> String {
    if old_line == new_line {
        format!("{}", format!("Line {old_line}").cyan())
    } else {
        format!("{}", format!("Line {old_line} / {new_line}").cyan())
    }
}

fn side(side: &Side) -> String {
    if side.is_blank() {
        return format!("{:>4}   ", "");
    }
    format!(
        "{} {} {}",
        line_no(side.line_no),
        paint(side.marker, side.marker.symbol()),
        highlighted(side.marker, &side.text, &side.highlights)
    )
}

fn unified_line(line: &UnifiedLine) -> String {
    format!(
        "{} {} {} {}",
        line_no(line.old_line_no),
        line_no(line.new_line_no),
        paint(line.marker, line.marker.symbol()),
        highlighted(line.marker, &line.text, &line.highlights)
    )
}

fn line_no(line_no: Option<usize>) -> String {
    match line_no {
        Some(n) => format!("{n:>4}").dimmed().to_string(),
        None => format!("{:>4}", ""),
    }
}

fn paint(marker: Marker, text: &str) -> ColoredString {
    match marker {
        Marker::Deleted => text.red(),
        Marker::Added => text.green(),
        Marker::Context | Marker::Blank => text.normal(),
    }
}

/// Paint `text`, with the highlighted byte ranges emphasised.
fn highlighted(marker: Marker, text: &str, ranges: &[std::ops::Range<usize>]) -> String {
    let mut out = String::new();
    let mut pos = 0;
    for range in ranges {
        let (Some(before), Some(inner)) = (text.get(pos..range.start), text.get(range.clone()))
        else {
            break;
        };
        out.push_str(&paint(marker, before).to_string());
        out.push_str(&paint(marker, inner).bold().underline().to_string());
        pos = range.end;
    }
    out.push_str(&paint(marker, text.get(pos..).unwrap_or_default()).to_string());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use revdiff_diff::diff_lines;
    use revdiff_format::{unified as to_unified, FormatOptions, HunkFormatter};

    fn rows(old: &[&str], new: &[&str], options: FormatOptions) -> Vec<Row> {
        HunkFormatter::new(options).format_fresh(&diff_lines(old, new), old, new)
    }

    #[test]
    fn split_pads_old_column() {
        colored::control::set_override(false);
        let lines = split(&rows(&["same", "b"], &["same", "longer"], FormatOptions::default()));
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "   1   same |    1   same");
        assert_eq!(lines[1], "   2 - b    |    2 + longer");
    }

    #[test]
    fn split_blank_side_is_padding() {
        colored::control::set_override(false);
        let lines = split(&rows(&[], &["new"], FormatOptions::default()));
        assert_eq!(lines, vec!["        |    1 + new"]);
    }

    #[test]
    fn headers_name_the_line() {
        colored::control::set_override(false);
        let options = FormatOptions {
            show_header: true,
            ..FormatOptions::windowed(0, 0)
        };
        let lines = split(&rows(&["a", "b"], &["a", "c"], options));
        assert_eq!(lines[0], "Line 2");
    }

    #[test]
    fn unified_shows_both_line_numbers() {
        colored::control::set_override(false);
        let lines = unified(&to_unified(&rows(&["a"], &["b"], FormatOptions::default())));
        assert_eq!(lines, vec!["   1      - a", "        1 + b"]);
    }

    #[test]
    fn highlights_keep_text_intact() {
        colored::control::set_override(false);
        let out = highlighted(Marker::Added, "hello brave world", &[6..11]);
        assert_eq!(out, "hello brave world");
        let out = highlighted(Marker::Added, "short", &[3..99]);
        assert_eq!(out, "short");
    }
}
