//! State Management
//!
//! Session and notification state.

pub mod global;

pub use global::{provide_global_state, require_sign_in, use_global_state, GlobalState};
