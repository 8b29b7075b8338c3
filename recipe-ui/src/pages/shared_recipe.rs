//! Shared Recipe Page
//!
//! Public, read-only view of a recipe opened through its share link.

use leptos::*;
use leptos_router::*;

use recipe_manager::models::Recipe;

use crate::api;
use crate::components::{ErrorMessage, Loading};
use crate::pages::recipe_detail::RecipeView;

#[component]
pub fn SharedRecipe() -> impl IntoView {
    let params = use_params_map();
    let (recipe, set_recipe) = create_signal(None::<Recipe>);
    let (loading, set_loading) = create_signal(true);
    let (error, set_error) = create_signal(None::<String>);

    create_effect(move |_| {
        let token = params.with(|p| p.get("token").cloned()).unwrap_or_default();
        set_loading.set(true);
        spawn_local(async move {
            match api::fetch_shared_recipe(&token).await {
                Ok(r) => set_recipe.set(Some(r)),
                Err(e) => set_error.set(Some(e)),
            }
            set_loading.set(false);
        });
    });

    view! {
        <div class="max-w-4xl mx-auto space-y-4">
            <Show when=move || !loading.get() fallback=|| view! { <Loading /> }>
                {move || error.get().map(|e| view! { <ErrorMessage message=e /> })}
                {move || recipe.get().map(|r| view! {
                    <p class="text-sm text-gray-500">"Shared recipe"</p>
                    <RecipeView recipe=r />
                })}
            </Show>
        </div>
    }
}
