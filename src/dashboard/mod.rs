//! Dashboard View
//!
//! Composition root of the page. [`DashboardView`] walks the fixed panel
//! order for the current [`RequestState`] and hands each panel to a
//! [`DashboardRenderer`]:
//!
//! 1. title
//! 2. upload surface
//! 3. loading indicator (only while `Loading`)
//! 4. error banner (only while `Failed`)
//! 5. summary and the three charts (only while `Ready`)
//!
//! Chart records are projected from the result on every render.

mod text;

pub use text::TextRenderer;

use crate::analysis::{bar_records, daily_points, pie_slices, BarRecord, DailyPoint, PieSlice};
use crate::intake::UploadSurface;
use crate::session::RequestState;

pub const TITLE: &str = "Finance Analyzer";
pub const SUMMARY_HEADING: &str = "Summary Statistics";
pub const PIE_TITLE: &str = "Spending by Category (Pie Chart)";
pub const BAR_TITLE: &str = "Spending by Category (Bar Chart)";
pub const LINE_TITLE: &str = "Daily Spending Trend";

/// Placeholder for a chart with no records
pub const EMPTY_CHART: &str = "No data";

/// Summary text for a total, always two decimals
pub fn summary_line(total: f64) -> String {
    format!("Total Spending: ${:.2}", total)
}

/// Rendering capability for each dashboard panel
pub trait DashboardRenderer {
    fn title(&mut self, text: &str);

    fn upload_surface(&mut self, surface: &UploadSurface);

    fn loading(&mut self);

    fn error_banner(&mut self, message: &str);

    fn summary(&mut self, heading: &str, line: &str);

    /// Empty `slices` must render a placeholder
    fn pie_chart(&mut self, title: &str, slices: &[PieSlice]);

    /// Empty `records` must render a placeholder
    fn bar_chart(&mut self, title: &str, records: &[BarRecord]);

    /// Empty `points` must render a placeholder
    fn line_chart(&mut self, title: &str, points: &[DailyPoint]);
}

/// The dashboard for one state snapshot
pub struct DashboardView<'a> {
    state: &'a RequestState,
    surface: &'a UploadSurface,
}

impl<'a> DashboardView<'a> {
    pub fn new(state: &'a RequestState, surface: &'a UploadSurface) -> Self {
        Self { state, surface }
    }

    /// Render every visible panel, in order
    pub fn render<R: DashboardRenderer + ?Sized>(&self, renderer: &mut R) {
        renderer.title(TITLE);
        renderer.upload_surface(self.surface);

        match self.state {
            RequestState::Idle => {}
            RequestState::Loading => renderer.loading(),
            RequestState::Failed(message) => renderer.error_banner(message),
            RequestState::Ready(result) => {
                renderer.summary(SUMMARY_HEADING, &summary_line(result.total()));
                renderer.pie_chart(PIE_TITLE, &pie_slices(&result.by_category));
                renderer.bar_chart(BAR_TITLE, &bar_records(&result.by_category));
                renderer.line_chart(LINE_TITLE, &daily_points(&result.daily_spending));
            }
        }
    }

    /// The visible panels as data
    pub fn panels(&self) -> Vec<Panel> {
        let mut panels = Vec::new();
        self.render(&mut panels);
        panels
    }
}

/// A rendered panel, for inspection
#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    Title(String),
    UploadSurface { prompt: String, active: bool },
    Loading,
    ErrorBanner(String),
    Summary(String),
    PieChart(Vec<PieSlice>),
    BarChart(Vec<BarRecord>),
    LineChart(Vec<DailyPoint>),
}

impl DashboardRenderer for Vec<Panel> {
    fn title(&mut self, text: &str) {
        self.push(Panel::Title(text.to_string()));
    }

    fn upload_surface(&mut self, surface: &UploadSurface) {
        self.push(Panel::UploadSurface {
            prompt: surface.prompt().to_string(),
            active: surface.is_drag_active(),
        });
    }

    fn loading(&mut self) {
        self.push(Panel::Loading);
    }

    fn error_banner(&mut self, message: &str) {
        self.push(Panel::ErrorBanner(message.to_string()));
    }

    fn summary(&mut self, _heading: &str, line: &str) {
        self.push(Panel::Summary(line.to_string()));
    }

    fn pie_chart(&mut self, _title: &str, slices: &[PieSlice]) {
        self.push(Panel::PieChart(slices.to_vec()));
    }

    fn bar_chart(&mut self, _title: &str, records: &[BarRecord]) {
        self.push(Panel::BarChart(records.to_vec()));
    }

    fn line_chart(&mut self, _title: &str, points: &[DailyPoint]) {
        self.push(Panel::LineChart(points.to_vec()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{AnalysisResult, CategoryTotals, Summary};
    use crate::intake::PROMPT_IDLE;

    fn ready() -> RequestState {
        RequestState::Ready(AnalysisResult {
            summary: Summary { total: 42.5 },
            by_category: [("Food", 10.0), ("Rent", 32.5)].into_iter().collect::<CategoryTotals>(),
            daily_spending: vec![DailyPoint::new("2024-01-01", 42.5)],
        })
    }

    #[test]
    fn test_summary_line_two_decimals() {
        assert_eq!(summary_line(42.5), "Total Spending: $42.50");
        assert_eq!(summary_line(0.0), "Total Spending: $0.00");
        assert_eq!(summary_line(1234.567), "Total Spending: $1234.57");
    }

    #[test]
    fn test_idle_shows_only_title_and_surface() {
        let surface = UploadSurface::new();
        let panels = DashboardView::new(&RequestState::Idle, &surface).panels();

        assert_eq!(
            panels,
            vec![
                Panel::Title(TITLE.to_string()),
                Panel::UploadSurface {
                    prompt: PROMPT_IDLE.to_string(),
                    active: false,
                },
            ]
        );
    }

    #[test]
    fn test_loading_and_failed_panels() {
        let surface = UploadSurface::new();

        let panels = DashboardView::new(&RequestState::Loading, &surface).panels();
        assert_eq!(panels.last(), Some(&Panel::Loading));

        let failed = RequestState::Failed("Failed to analyze file".to_string());
        let panels = DashboardView::new(&failed, &surface).panels();
        assert_eq!(panels.len(), 3);
        assert_eq!(
            panels.last(),
            Some(&Panel::ErrorBanner("Failed to analyze file".to_string()))
        );
        assert!(!panels.iter().any(|p| matches!(p, Panel::Summary(_))));
    }

    #[test]
    fn test_ready_panels_in_order() {
        let surface = UploadSurface::new();
        let state = ready();
        let panels = DashboardView::new(&state, &surface).panels();

        assert_eq!(panels.len(), 6);
        assert_eq!(panels[2], Panel::Summary("Total Spending: $42.50".to_string()));
        assert_eq!(
            panels[3],
            Panel::PieChart(vec![
                PieSlice { name: "Food".into(), value: 10.0 },
                PieSlice { name: "Rent".into(), value: 32.5 },
            ])
        );
        assert_eq!(
            panels[4],
            Panel::BarChart(vec![
                BarRecord { name: "Food".into(), amount: 10.0 },
                BarRecord { name: "Rent".into(), amount: 32.5 },
            ])
        );
        assert_eq!(
            panels[5],
            Panel::LineChart(vec![DailyPoint::new("2024-01-01", 42.5)])
        );
        assert!(!panels.contains(&Panel::Loading));
    }

    #[test]
    fn test_surface_drag_state_is_rendered() {
        let mut surface = UploadSurface::new();
        surface.drag_enter();
        let panels = DashboardView::new(&RequestState::Idle, &surface).panels();

        assert!(matches!(panels[1], Panel::UploadSurface { active: true, .. }));
    }
}
