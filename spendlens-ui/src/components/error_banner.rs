use leptos::*;

/// Error banner for a failed analysis
#[component]
pub fn ErrorBanner(message: String) -> impl IntoView {
    view! {
        <div class="bg-red-900/60 border border-red-700 text-red-200 rounded-lg px-4 py-3" role="alert">
            {message}
        </div>
    }
}
