//! API Module
//!
//! HTTP client for the recipe backend.

pub mod client;

pub use client::*;
