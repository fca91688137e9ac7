//! App Root Component

use leptos::*;

use crate::api;
use crate::pages::Dashboard;
use crate::state::provide_global_state;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();

    view! {
        <div class="min-h-screen bg-gray-900 text-white flex flex-col">
            <main class="flex-1 container mx-auto px-4 py-8 pb-24">
                <Dashboard />
            </main>

            <Footer />
        </div>
    }
}

/// Footer showing, and letting the user change, the analysis service URL
#[component]
fn Footer() -> impl IntoView {
    let (api_base, set_api_base) = create_signal(api::get_api_base());

    let on_change = move |ev: web_sys::Event| {
        api::set_api_base(&event_target_value(&ev));
        set_api_base.set(api::get_api_base());
    };

    view! {
        <footer class="fixed bottom-0 left-0 right-0 bg-gray-800 border-t border-gray-700 py-3 px-4">
            <div class="container mx-auto flex items-center space-x-3 text-sm text-gray-400">
                <label for="api-url">"Analysis service"</label>
                <input
                    id="api-url"
                    type="url"
                    class="flex-1 bg-gray-700 rounded px-2 py-1 text-gray-200"
                    prop:value=move || api_base.get()
                    on:change=on_change
                />
            </div>
        </footer>
    }
}
