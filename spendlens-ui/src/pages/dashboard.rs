//! Dashboard Page
//!
//! Renders the core dashboard panels as Leptos views.

use leptos::*;

use spendlens::analysis::{BarRecord, DailyPoint, PieSlice};
use spendlens::dashboard::{DashboardRenderer, DashboardView};
use spendlens::intake::UploadSurface;

use crate::components::{BarChart, DropZone, ErrorBanner, LineChart, Loading, PieChart};
use crate::state::GlobalState;

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    // Only rebuild the panels when the request state actually changes
    let request_state = create_memo(move |_| state.session.with(|session| session.state().clone()));

    view! {
        <div class="space-y-8">
            {move || {
                request_state.with(|request_state| {
                    state.surface.with_untracked(|surface| {
                        let mut renderer = ViewRenderer::default();
                        DashboardView::new(request_state, surface).render(&mut renderer);
                        renderer.views.collect_view()
                    })
                })
            }}
        </div>
    }
}

/// Collects one view per dashboard panel
#[derive(Default)]
struct ViewRenderer {
    views: Vec<View>,
}

impl DashboardRenderer for ViewRenderer {
    fn title(&mut self, text: &str) {
        let text = text.to_string();
        self.views.push(view! { <h1 class="text-3xl font-bold">{text}</h1> }.into_view());
    }

    fn upload_surface(&mut self, _surface: &UploadSurface) {
        // The drop zone tracks the drag state itself
        self.views.push(view! { <DropZone /> }.into_view());
    }

    fn loading(&mut self) {
        self.views.push(view! { <Loading /> }.into_view());
    }

    fn error_banner(&mut self, message: &str) {
        self.views
            .push(view! { <ErrorBanner message=message.to_string() /> }.into_view());
    }

    fn summary(&mut self, heading: &str, line: &str) {
        let heading = heading.to_string();
        let line = line.to_string();
        self.views.push(
            view! {
                <section class="bg-gray-800 rounded-xl p-6">
                    <h2 class="text-xl font-semibold mb-2">{heading}</h2>
                    <p class="text-2xl">{line}</p>
                </section>
            }
            .into_view(),
        );
    }

    fn pie_chart(&mut self, title: &str, slices: &[PieSlice]) {
        self.views.push(
            view! { <PieChart title=title.to_string() slices=slices.to_vec() /> }.into_view(),
        );
    }

    fn bar_chart(&mut self, title: &str, records: &[BarRecord]) {
        self.views.push(
            view! { <BarChart title=title.to_string() records=records.to_vec() /> }.into_view(),
        );
    }

    fn line_chart(&mut self, title: &str, points: &[DailyPoint]) {
        self.views.push(
            view! { <LineChart title=title.to_string() points=points.to_vec() /> }.into_view(),
        );
    }
}
