//! Drop Zone Component
//!
//! Drag-and-drop target with a hidden file input for click-to-browse.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{File, FileList, HtmlInputElement};

use spendlens::intake::{FileCandidate, UploadSurface};

use crate::state::GlobalState;

/// Upload surface component
#[component]
pub fn DropZone() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let input_ref = create_node_ref::<html::Input>();

    let on_drag_enter = move |ev: ev::DragEvent| {
        ev.prevent_default();
        state.surface.update(UploadSurface::drag_enter);
    };

    // Required for the browser to deliver the drop
    let on_drag_over = move |ev: ev::DragEvent| ev.prevent_default();

    let on_drag_leave = move |_: ev::DragEvent| {
        state.surface.update(UploadSurface::drag_leave);
    };

    let on_drop = move |ev: ev::DragEvent| {
        ev.prevent_default();
        let files = candidates(ev.data_transfer().and_then(|dt| dt.files()));
        let event = state
            .surface
            .try_update(|surface| surface.drop_files(files))
            .flatten();
        state.handle_intake(event);
    };

    let on_change = move |ev: ev::Event| {
        let Some(input) = ev
            .target()
            .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        let files = candidates(input.files());
        let event = state.surface.with_untracked(|surface| surface.browse(files));

        // Picking the same file again must fire another change event
        input.set_value("");
        state.handle_intake(event);
    };

    let on_click = move |_| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    view! {
        <div>
            <div
                on:dragenter=on_drag_enter
                on:dragover=on_drag_over
                on:dragleave=on_drag_leave
                on:drop=on_drop
                on:click=on_click
                class=move || {
                    let base = "border-2 border-dashed rounded-xl p-10 text-center cursor-pointer transition-colors";
                    if state.surface.with(UploadSurface::is_drag_active) {
                        format!("{} border-primary-500 bg-gray-700", base)
                    } else {
                        format!("{} border-gray-600 bg-gray-800 hover:border-gray-500", base)
                    }
                }
            >
                <p class="text-gray-300">{move || state.surface.with(UploadSurface::prompt)}</p>
            </div>

            <input
                type="file"
                accept=".csv,text/csv"
                class="hidden"
                node_ref=input_ref
                on:change=on_change
            />
        </div>
    }
}

/// Describe the files of a drop or a browse dialog for the upload surface
fn candidates(files: Option<FileList>) -> Vec<FileCandidate<File>> {
    let Some(files) = files else {
        return Vec::new();
    };

    (0..files.length())
        .filter_map(|i| files.get(i))
        .map(|file| FileCandidate::new(file.name(), file.type_(), file))
        .collect()
}
