//! Terminal UI utilities.
//!
//! A small box-drawn table for run summaries. Column widths are derived
//! from the visible (ANSI-stripped) cell widths and squeezed to the
//! terminal when needed.

use colored::*;
use console::{Term, measure_text_width, truncate_str};

pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        if row.len() == self.headers.len() {
            self.rows.push(row);
        }
    }

    pub fn print(&self) {
        if self.headers.is_empty() {
            return;
        }

        let cols = self.headers.len();
        let mut widths: Vec<usize> = self
            .headers
            .iter()
            .map(|h| measure_text_width(h))
            .collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(measure_text_width(cell));
            }
        }

        // Squeeze the widest column when the table overflows the terminal.
        let (_rows, term_cols) = Term::stdout().size();
        let overhead = 2 + (3 * cols) + 1;
        let available = (term_cols as usize).saturating_sub(overhead);
        let total: usize = widths.iter().sum();
        if total > available && available > 0 {
            let widest = widths
                .iter()
                .enumerate()
                .max_by_key(|(_, w)| **w)
                .map(|(i, _)| i)
                .unwrap_or(0);
            widths[widest] = widths[widest].saturating_sub(total - available).max(8);
        }

        let border = |left: &str, mid: &str, right: &str| {
            let mut line = String::from("  ");
            line.push_str(left);
            for (i, w) in widths.iter().enumerate() {
                line.push_str(&"─".repeat(w + 2));
                line.push_str(if i + 1 < cols { mid } else { right });
            }
            line
        };

        println!("{}", border("┌", "┬", "┐"));
        self.print_row(&self.headers, &widths, true);
        println!("{}", border("├", "┼", "┤"));
        for row in &self.rows {
            self.print_row(row, &widths, false);
        }
        println!("{}", border("└", "┴", "┘"));
    }

    fn print_row(&self, cells: &[String], widths: &[usize], header: bool) {
        print!("  │");
        for (i, cell) in cells.iter().enumerate() {
            let shown = truncate_str(cell, widths[i], "...").to_string();
            let pad = widths[i].saturating_sub(measure_text_width(&shown));
            if header {
                print!(" {} {}│", shown.bold(), " ".repeat(pad));
            } else {
                print!(" {} {}│", shown, " ".repeat(pad));
            }
        }
        println!();
    }
}
