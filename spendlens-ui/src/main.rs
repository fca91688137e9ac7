//! SpendLens Dashboard
//!
//! Browser front end for the spending analyzer, built with Leptos (WASM).
//!
//! # Features
//!
//! - Drag-and-drop or click-to-browse CSV upload
//! - Summary total plus pie, bar and daily trend charts
//! - Loading and error states driven by the shared request session
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. The request lifecycle, file filter and panel order come from
//! the `spendlens` core crate; this crate supplies the fetch client, the
//! reactive state and the canvas charts.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
