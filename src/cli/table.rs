//! Table formatting for list commands
//!
//! `auto` renders a borderless aligned table with `tabled`; `tsv` prints
//! one tab-separated line per row (no header) for piping.

use tabled::{builder::Builder, settings::Style};

use crate::cli::OutputFormat;

#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&'static str]) -> Self {
        Self {
            headers: headers.to_vec(),
            rows: Vec::new(),
        }
    }

    pub fn push_row<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    pub fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Tsv => self
                .rows
                .iter()
                .map(|row| row.join("\t"))
                .collect::<Vec<_>>()
                .join("\n"),
            OutputFormat::Auto | OutputFormat::Json => {
                let mut builder = Builder::default();
                builder.push_record(self.headers.iter().copied());
                for row in &self.rows {
                    builder.push_record(row.iter().map(String::as_str));
                }
                builder.build().with(Style::blank()).to_string()
            }
        }
    }
}
