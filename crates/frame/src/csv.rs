use crate::error::{FrameError, Result};
use crate::frame::Frame;
use crate::index::{Index, Key};
use crate::label::Label;
use std::path::Path;

/// Options for reading and writing frames as CSV.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Leading rows holding column keys, one per column level.
    pub header_rows: usize,
    /// Leading columns holding row keys, one per row level.
    pub index_cols: usize,
}

impl Default for CsvOptions {
    fn default() -> Self {
        CsvOptions {
            header_rows: 1,
            index_cols: 1,
        }
    }
}

fn parse_label(cell: &str) -> Label {
    match cell.parse::<i64>() {
        Ok(i) => Label::Int(i),
        Err(_) => Label::Text(cell.to_string()),
    }
}

fn parse_cell(cell: &str) -> Result<Option<f64>> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|_| FrameError::Parse(format!("not a number: {trimmed:?}")))
}

impl Frame {
    /// Read a frame from a CSV file.
    ///
    /// The first `header_rows` records hold the column keys (one level per
    /// record); the last of them also carries the row level names in its
    /// leading `index_cols` cells. Empty value cells become nulls.
    pub fn from_csv_path(path: impl AsRef<Path>, options: &CsvOptions) -> Result<Self> {
        if options.header_rows == 0 {
            return Err(FrameError::Parse(
                "header_rows must be at least 1".to_string(),
            ));
        }
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;

        let mut records = Vec::new();
        for record in reader.records() {
            records.push(record?);
        }
        if records.len() < options.header_rows {
            return Err(FrameError::Parse(format!(
                "expected at least {} header rows, found {}",
                options.header_rows,
                records.len()
            )));
        }

        let ncols = records
            .first()
            .map_or(0, csv::StringRecord::len)
            .saturating_sub(options.index_cols);

        // Column keys are read level by level from the header rows.
        let mut column_keys: Vec<Key> = vec![Vec::with_capacity(options.header_rows); ncols];
        for record in records.iter().take(options.header_rows) {
            for (col, key) in column_keys.iter_mut().enumerate() {
                let cell = record.get(options.index_cols + col).unwrap_or("");
                key.push(parse_label(cell));
            }
        }
        let columns = Index::from_keys(vec![None; options.header_rows], column_keys)?;

        let row_names: Vec<Option<String>> = match records.get(options.header_rows - 1) {
            Some(record) => (0..options.index_cols)
                .map(|i| {
                    record
                        .get(i)
                        .filter(|cell| !cell.is_empty())
                        .map(ToString::to_string)
                })
                .collect(),
            None => vec![None; options.index_cols],
        };

        let mut row_keys = Vec::new();
        let mut data = Vec::new();
        for record in records.iter().skip(options.header_rows) {
            let key: Key = (0..options.index_cols)
                .map(|i| parse_label(record.get(i).unwrap_or("")))
                .collect();
            let mut values = Vec::with_capacity(ncols);
            for col in 0..ncols {
                values.push(parse_cell(record.get(options.index_cols + col).unwrap_or(""))?);
            }
            row_keys.push(key);
            data.push(values);
        }

        let rows = Index::from_keys(row_names, row_keys)?;
        Frame::new(rows, columns, data)
    }

    /// Write the frame to a CSV file in the layout `from_csv_path` reads.
    pub fn to_csv_path(&self, path: impl AsRef<Path>, options: &CsvOptions) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_path(path)?;

        let index_cols = self.rows().nlevels().max(options.index_cols);
        for level in 0..self.columns().nlevels() {
            let mut record: Vec<String> = vec![String::new(); index_cols];
            if level == self.columns().nlevels() - 1 {
                for (i, slot) in record.iter_mut().enumerate().take(self.rows().nlevels()) {
                    if let Some(name) = &self.rows().names()[i] {
                        slot.clone_from(name);
                    }
                }
            }
            for key in self.columns().keys() {
                record.push(key[level].to_string());
            }
            writer.write_record(&record)?;
        }

        for (pos, key) in self.rows().keys().iter().enumerate() {
            let mut record: Vec<String> = key.iter().map(ToString::to_string).collect();
            for value in self.row(pos) {
                record.push(value.map(|v| v.to_string()).unwrap_or_default());
            }
            writer.write_record(&record)?;
        }
        writer.flush()?;
        Ok(())
    }
}
