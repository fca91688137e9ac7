//! Plain-text dashboard renderer for terminals

use std::fmt::Write;

use super::{DashboardRenderer, EMPTY_CHART};
use crate::analysis::{slice_label, slice_shares, BarRecord, DailyPoint, PieSlice};
use crate::intake::UploadSurface;

/// Default width of the longest bar, in characters
const DEFAULT_BAR_WIDTH: usize = 40;

/// Renders the dashboard into a `String`
#[derive(Debug, Clone)]
pub struct TextRenderer {
    out: String,
    bar_width: usize,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self {
            out: String::new(),
            bar_width: DEFAULT_BAR_WIDTH,
        }
    }

    pub fn with_bar_width(mut self, width: usize) -> Self {
        self.bar_width = width.max(1);
        self
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn heading(&mut self, title: &str) {
        let _ = writeln!(self.out);
        let _ = writeln!(self.out, "{}", title);
        let _ = writeln!(self.out, "{}", "-".repeat(title.chars().count()));
    }

    fn placeholder(&mut self) {
        let _ = writeln!(self.out, "  ({})", EMPTY_CHART);
    }

    /// `#` bar scaled against the largest magnitude in the chart
    fn bar(&self, value: f64, max: f64) -> String {
        if max <= 0.0 || !value.is_finite() {
            return String::new();
        }
        let len = ((value.abs() / max) * self.bar_width as f64).round() as usize;
        "#".repeat(len.min(self.bar_width))
    }
}

fn max_magnitude(values: impl Iterator<Item = f64>) -> f64 {
    values
        .filter(|v| v.is_finite())
        .map(f64::abs)
        .fold(0.0, f64::max)
}

fn label_width<'a>(labels: impl Iterator<Item = &'a str>) -> usize {
    labels.map(|l| l.chars().count()).max().unwrap_or(0)
}

impl DashboardRenderer for TextRenderer {
    fn title(&mut self, text: &str) {
        let _ = writeln!(self.out, "{}", text);
        let _ = writeln!(self.out, "{}", "=".repeat(text.chars().count()));
    }

    fn upload_surface(&mut self, surface: &UploadSurface) {
        let _ = writeln!(self.out);
        if surface.is_drag_active() {
            let _ = writeln!(self.out, ">> {} <<", surface.prompt());
        } else {
            let _ = writeln!(self.out, "[ {} ]", surface.prompt());
        }
    }

    fn loading(&mut self) {
        let _ = writeln!(self.out);
        let _ = writeln!(self.out, "Loading...");
    }

    fn error_banner(&mut self, message: &str) {
        let _ = writeln!(self.out);
        let _ = writeln!(self.out, "Error: {}", message);
    }

    fn summary(&mut self, heading: &str, line: &str) {
        self.heading(heading);
        let _ = writeln!(self.out, "{}", line);
    }

    fn pie_chart(&mut self, title: &str, slices: &[PieSlice]) {
        self.heading(title);
        if slices.is_empty() {
            self.placeholder();
            return;
        }

        let shares = slice_shares(slices);
        let labels: Vec<String> = slices
            .iter()
            .zip(&shares)
            .map(|(slice, share)| slice_label(slice, *share))
            .collect();
        let width = label_width(labels.iter().map(String::as_str));

        for ((slice, share), label) in slices.iter().zip(&shares).zip(&labels) {
            let bar = self.bar(*share, 1.0);
            let _ = writeln!(
                self.out,
                "  {:<width$}  {:>10.2}  {}",
                label,
                slice.value,
                bar,
                width = width
            );
        }
    }

    fn bar_chart(&mut self, title: &str, records: &[BarRecord]) {
        self.heading(title);
        if records.is_empty() {
            self.placeholder();
            return;
        }

        let max = max_magnitude(records.iter().map(|r| r.amount));
        let width = label_width(records.iter().map(|r| r.name.as_str()));

        for record in records {
            let bar = self.bar(record.amount, max);
            let _ = writeln!(
                self.out,
                "  {:<width$} | {} {:.2}",
                record.name,
                bar,
                record.amount,
                width = width
            );
        }
    }

    fn line_chart(&mut self, title: &str, points: &[DailyPoint]) {
        self.heading(title);
        if points.is_empty() {
            self.placeholder();
            return;
        }

        let max = max_magnitude(points.iter().map(|p| p.amount));
        let labels: Vec<String> = points.iter().map(DailyPoint::axis_label).collect();
        let width = label_width(labels.iter().map(String::as_str));

        for (point, label) in points.iter().zip(&labels) {
            let bar = self.bar(point.amount, max);
            let _ = writeln!(
                self.out,
                "  {:<width$} | {} {:.2}",
                label,
                bar,
                point.amount,
                width = width
            );
        }
    }
}
