//! Recipe Image Component

use leptos::*;

use recipe_manager::display::image_url;

use crate::api;

/// Renders only when the stored reference resolves to a URL
#[component]
pub fn RecipeImage(
    stored: Option<String>,
    #[prop(into)]
    alt: String,
    #[prop(default = "w-full h-48 object-cover")]
    class: &'static str,
) -> impl IntoView {
    image_url(&api::get_api_base(), stored.as_deref()).map(|src| {
        view! { <img src=src alt=alt class=class /> }
    })
}
