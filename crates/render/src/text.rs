use crosstab_frame::Frame;

/// Settings for the plain-text writer.
#[derive(Debug, Clone)]
pub struct TextOptions {
    /// Representation of null cells.
    pub na_rep: String,
}

impl Default for TextOptions {
    fn default() -> Self {
        TextOptions {
            na_rep: "-".to_string(),
        }
    }
}

fn format_cell(cell: Option<f64>, na_rep: &str) -> String {
    match cell {
        Some(value) => format!("{value}"),
        None => na_rep.to_string(),
    }
}

/// Render a frame as an aligned text grid.
///
/// Hierarchical column levels each take a header line; row keys occupy the
/// leading columns. Labels align left, values align right.
#[must_use]
pub fn to_text(frame: &Frame, options: &TextOptions) -> String {
    let row_levels = frame.rows().nlevels();

    let mut lines: Vec<Vec<String>> = Vec::new();
    for level in 0..frame.columns().nlevels() {
        let mut line = vec![String::new(); row_levels];
        if let Some(name) = &frame.columns().names()[level] {
            line[row_levels - 1] = name.clone();
        }
        for key in frame.columns().keys() {
            line.push(key[level].to_string());
        }
        lines.push(line);
    }
    if frame.rows().names().iter().any(Option::is_some) {
        let mut line: Vec<String> = frame
            .rows()
            .names()
            .iter()
            .map(|name| name.clone().unwrap_or_default())
            .collect();
        line.extend((0..frame.ncols()).map(|_| String::new()));
        lines.push(line);
    }
    for row in 0..frame.nrows() {
        let mut line: Vec<String> = frame
            .rows()
            .key(row)
            .iter()
            .map(ToString::to_string)
            .collect();
        line.extend(
            frame
                .row(row)
                .iter()
                .map(|&cell| format_cell(cell, &options.na_rep)),
        );
        lines.push(line);
    }

    let ncols = row_levels + frame.ncols();
    let widths: Vec<usize> = (0..ncols)
        .map(|col| {
            lines
                .iter()
                .map(|line| line[col].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    lines
        .iter()
        .map(|line| {
            let cells: Vec<String> = line
                .iter()
                .enumerate()
                .map(|(col, cell)| {
                    if col < row_levels {
                        format!("{cell:<width$}", width = widths[col])
                    } else {
                        format!("{cell:>width$}", width = widths[col])
                    }
                })
                .collect();
            cells.join("  ").trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
