// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `wsp list` table.
//!
//! One row per request. Phase and readiness cells are colored from the
//! record itself, so a renamed phase cannot silently lose its color.

use std::io::{self, Write};

use wsp_core::{Phase, WorkspaceRequest};

use crate::color;

/// Column separator: double space.
const SEP: &str = "  ";

/// Namespaces longer than this are cut.
const NAMESPACE_MAX: usize = 40;

/// How a cell is colored once padded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Muted,
    /// Colored by whether the request is done (`true`) or still in flight.
    Progress(bool),
}

impl Tone {
    pub fn of_phase(phase: Phase) -> Self {
        Tone::Progress(phase.is_terminal())
    }

    pub fn of_ready(ready: bool) -> Self {
        Tone::Progress(ready)
    }
}

#[derive(Clone, Copy)]
enum Align {
    Left,
    Right,
}

struct Column {
    name: &'static str,
    align: Align,
    max_width: Option<usize>,
}

const fn col(name: &'static str, align: Align) -> Column {
    Column {
        name,
        align,
        max_width: None,
    }
}

const COLUMNS: [Column; 6] = [
    col("NAME", Align::Left),
    col("USER", Align::Left),
    col("PHASE", Align::Left),
    col("READY", Align::Left),
    col("SERVICES", Align::Right),
    Column {
        name: "NAMESPACE",
        align: Align::Left,
        max_width: Some(NAMESPACE_MAX),
    },
];

struct Cell {
    text: String,
    tone: Tone,
}

impl Cell {
    fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

/// Requests laid out for the terminal.
pub struct RequestTable {
    rows: Vec<[Cell; 6]>,
    colorize: bool,
}

impl RequestTable {
    pub fn new(records: &[WorkspaceRequest]) -> Self {
        Self {
            rows: records.iter().map(row).collect(),
            colorize: color::should_colorize(),
        }
    }

    /// Override terminal detection.
    pub fn colorize(mut self, colorize: bool) -> Self {
        self.colorize = colorize;
        self
    }

    /// Header plus one line per request; nothing at all when empty.
    ///
    /// Color is applied after padding so escapes never count toward width.
    /// A trailing left-aligned column is not padded.
    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        if self.rows.is_empty() {
            return Ok(());
        }
        let widths = self.widths();
        let last = COLUMNS.len() - 1;

        let header: Vec<String> = COLUMNS
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let padded = layout(column.name, column, widths[i], i == last);
                if self.colorize {
                    color::apply_header(&padded)
                } else {
                    padded
                }
            })
            .collect();
        writeln!(out, "{}", header.join(SEP))?;

        for row in &self.rows {
            let cells: Vec<String> = COLUMNS
                .iter()
                .zip(row)
                .enumerate()
                .map(|(i, (column, cell))| {
                    let text = truncate(&cell.text, column.max_width);
                    let padded = layout(text, column, widths[i], i == last);
                    stylize(padded, cell.tone, self.colorize)
                })
                .collect();
            writeln!(out, "{}", cells.join(SEP))?;
        }
        Ok(())
    }

    fn widths(&self) -> [usize; 6] {
        let mut widths = COLUMNS.map(|c| c.name.len());
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let len = truncate(&cell.text, COLUMNS[i].max_width).len();
                widths[i] = widths[i].max(len);
            }
        }
        widths
    }
}

fn row(record: &WorkspaceRequest) -> [Cell; 6] {
    let status = &record.status;
    [
        Cell::new(record.name().as_str(), Tone::Plain),
        Cell::new(record.spec.user(), Tone::Plain),
        Cell::new(record.phase().to_string(), Tone::of_phase(record.phase())),
        Cell::new(
            if status.ready { "yes" } else { "no" },
            Tone::of_ready(status.ready),
        ),
        Cell::new(
            format!(
                "{}/{}",
                status.provisioned_services.len(),
                record.spec.services().len()
            ),
            Tone::Plain,
        ),
        Cell::new(status.namespace.as_str(), Tone::Muted),
    ]
}

fn layout(text: &str, column: &Column, width: usize, is_last: bool) -> String {
    match column.align {
        Align::Left if is_last => text.to_string(),
        Align::Left => format!("{:<width$}", text),
        Align::Right => format!("{:>width$}", text),
    }
}

/// At most `max` characters, cut on a char boundary.
fn truncate(text: &str, max: Option<usize>) -> &str {
    match max.and_then(|m| text.char_indices().nth(m)) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

fn stylize(text: String, tone: Tone, colorize: bool) -> String {
    if !colorize {
        return text;
    }
    match tone {
        Tone::Plain => text,
        Tone::Muted => color::apply_muted(&text),
        Tone::Progress(done) => color::apply_progress(&text, done),
    }
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
