//! Recipe Manager Web App
//!
//! Browser front end for recipes, meal plans and grocery lists, built with
//! Leptos (WASM). Validation, planner layout and display rules come from the
//! shared `recipe-manager` crate; this crate only renders and calls the API.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
