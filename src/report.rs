// Table and CSV output
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::{
    Context,
    Result,
};
use comfy_table::presets::ASCII_FULL;
use comfy_table::Table;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Formats `amount` as dollars and cents, eg. `$15.50`.
pub fn dollars(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Rows of text under a header, printable as a table or writable as CSV.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Report {
    headers: Vec<String>,
    rows:    Vec<Vec<String>>,
}

impl Report {
    /// Returns an empty `Report` with the given column `headers`.
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows:    Vec::new(),
        }
    }

    /// Appends a row.
    pub fn push_row<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    /// The rows, in the order they were added.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Renders the report as an ASCII grid table.
    pub fn table(&self) -> Table {
        let mut table = Table::new();

        table
            .load_preset(ASCII_FULL)
            .set_header(self.headers.clone());

        for row in &self.rows {
            table.add_row(row.clone());
        }

        table
    }

    /// Writes the report as CSV, headers first.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);

        writer.write_record(&self.headers)?;

        for row in &self.rows {
            writer.write_record(row)?;
        }

        writer.flush()?;

        Ok(())
    }

    /// Writes the report as CSV to a new file at `path`.
    pub fn export(&self, path: &Path) -> Result<()> {
        debug!("export: Writing {} rows to {:?}", self.rows.len(), path);

        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;

        self.write_csv(file)
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}
