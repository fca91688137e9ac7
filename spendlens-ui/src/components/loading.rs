//! Loading Component

use leptos::*;

/// Spinner shown while an analysis is in flight
#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center space-x-3 py-12 text-primary-400">
            <div class="loading-spinner w-8 h-8" />
            <span>"Loading..."</span>
        </div>
    }
}
