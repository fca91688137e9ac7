//! State Management
//!
//! Reactive session and upload surface state.

pub mod global;

pub use global::{provide_global_state, GlobalState};
