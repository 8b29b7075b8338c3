//! Recipe Detail Page
//!
//! Full recipe view with edit, delete and share actions.

use leptos::*;
use leptos_router::*;

use recipe_manager::display::{format_minutes, ingredient_line, StarSize};
use recipe_manager::models::Recipe;

use crate::api;
use crate::components::{ErrorMessage, Loading, RecipeImage, ShareModal, StarRating};
use crate::state::use_global_state;

#[component]
pub fn RecipeDetail() -> impl IntoView {
    let state = use_global_state();
    let params = use_params_map();
    let navigate = use_navigate();

    let recipe_id = move || params.with(|p| p.get("id").and_then(|id| id.parse::<i64>().ok()));

    let (recipe, set_recipe) = create_signal(None::<Recipe>);
    let (loading, set_loading) = create_signal(true);
    let (error, set_error) = create_signal(None::<String>);
    let (sharing, set_sharing) = create_signal(false);
    let (deleting, set_deleting) = create_signal(false);

    create_effect(move |_| {
        let Some(id) = recipe_id() else {
            set_error.set(Some("Recipe not found".to_string()));
            set_loading.set(false);
            return;
        };
        set_loading.set(true);
        spawn_local(async move {
            match api::fetch_recipe(id).await {
                Ok(r) => set_recipe.set(Some(r)),
                Err(e) => set_error.set(Some(e)),
            }
            set_loading.set(false);
        });
    });

    let on_delete = move |_: web_sys::MouseEvent| {
        let Some(id) = recipe_id() else {
            return;
        };
        let confirmed = window()
            .confirm_with_message("Are you sure you want to delete this recipe?")
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        set_deleting.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::delete_recipe(id).await {
                Ok(()) => {
                    state.show_success("Recipe deleted");
                    navigate("/", Default::default());
                }
                Err(e) => {
                    state.show_error(&e);
                    set_deleting.set(false);
                }
            }
        });
    };

    view! {
        <div class="max-w-4xl mx-auto space-y-6">
            <A href="/" class="text-primary-600 hover:underline">"← Back to recipes"</A>

            {move || error.get().map(|e| view! { <ErrorMessage message=e /> })}

            <Show when=move || !loading.get() fallback=|| view! { <Loading /> }>
                {
                    let on_delete = on_delete.clone();
                    move || recipe.get().map(|r| {
                        let on_delete = on_delete.clone();
                        let edit_href = format!("/recipes/{}/edit", r.id);
                        view! {
                            <Show when=move || state.is_authenticated()>
                                <div class="flex justify-end space-x-2">
                                    <A href=edit_href.clone() class="px-4 py-2 bg-gray-200 hover:bg-gray-300 rounded-lg">
                                        "Edit"
                                    </A>
                                    <button
                                        on:click=move |_| set_sharing.set(true)
                                        class="px-4 py-2 bg-gray-200 hover:bg-gray-300 rounded-lg"
                                    >
                                        "Share"
                                    </button>
                                    <button
                                        on:click=on_delete.clone()
                                        disabled=move || deleting.get()
                                        class="px-4 py-2 bg-red-600 hover:bg-red-700 text-white rounded-lg disabled:bg-gray-400"
                                    >
                                        {move || if deleting.get() { "Deleting..." } else { "Delete" }}
                                    </button>
                                </div>
                            </Show>
                            <RecipeView recipe=r />
                        }
                    })
                }
            </Show>

            {move || {
                (sharing.get())
                    .then(|| recipe.get())
                    .flatten()
                    .map(|r| view! {
                        <ShareModal
                            recipe=r
                            on_close=move |_| set_sharing.set(false)
                            on_update=move |updated: Recipe| set_recipe.set(Some(updated))
                        />
                    })
            }}
        </div>
    }
}

/// Read-only recipe body shared by the detail and shared-link pages
#[component]
pub fn RecipeView(recipe: Recipe) -> impl IntoView {
    let total = recipe.total_time();
    let has_nutrition = recipe.has_nutrition();

    let times = [
        ("Prep", recipe.prep_time),
        ("Cook", recipe.cook_time),
        ("Total", (total > 0).then_some(total)),
    ];

    let nutrition = [
        ("Calories", recipe.calories.map(|c| c.to_string())),
        ("Protein", recipe.protein.map(|g| format!("{}g", g))),
        ("Carbs", recipe.carbohydrates.map(|g| format!("{}g", g))),
        ("Fat", recipe.fat.map(|g| format!("{}g", g))),
    ];

    view! {
        <article class="bg-white rounded-lg shadow overflow-hidden">
            <RecipeImage stored=recipe.image_url.clone() alt=recipe.title.clone() class="w-full h-72 object-cover" />

            <div class="p-6 space-y-6">
                <div>
                    <h1 class="text-3xl font-bold">{recipe.title.clone()}</h1>
                    {recipe.category.as_ref().map(|c| view! {
                        <span class="inline-block mt-2 px-3 py-1 bg-primary-100 text-primary-700 rounded-full text-sm">
                            {c.name.clone()}
                        </span>
                    })}
                    {recipe.description.clone().map(|d| view! { <p class="mt-3 text-gray-700">{d}</p> })}
                    <div class="mt-3">
                        <StarRating rating=recipe.rating size=StarSize::Large />
                    </div>
                </div>

                <div class="flex flex-wrap gap-6 text-sm text-gray-700">
                    {times.into_iter().filter_map(|(label, minutes)| minutes.map(|m| view! {
                        <div>
                            <span class="font-semibold">{label}": "</span>
                            {format_minutes(m)}
                        </div>
                    })).collect_view()}
                    {recipe.servings.map(|s| view! {
                        <div><span class="font-semibold">"Servings: "</span>{s}</div>
                    })}
                </div>

                {has_nutrition.then(|| view! {
                    <section>
                        <h2 class="text-xl font-semibold mb-2">"Nutrition (per serving)"</h2>
                        <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                            {nutrition.into_iter().filter_map(|(label, value)| value.map(|v| view! {
                                <div class="bg-gray-50 rounded-lg p-3 text-center">
                                    <div class="text-lg font-bold">{v}</div>
                                    <div class="text-sm text-gray-600">{label}</div>
                                </div>
                            })).collect_view()}
                        </div>
                    </section>
                })}

                <section>
                    <h2 class="text-xl font-semibold mb-2">"Ingredients"</h2>
                    {if recipe.ingredients.is_empty() {
                        view! { <p class="text-gray-500">"No ingredients listed."</p> }.into_view()
                    } else {
                        view! {
                            <ul class="list-disc list-inside space-y-1">
                                {recipe.ingredients.iter().map(|i| view! {
                                    <li>{ingredient_line(&i.name, i.amount.as_deref(), i.unit.as_deref())}</li>
                                }).collect_view()}
                            </ul>
                        }.into_view()
                    }}
                </section>

                <section>
                    <h2 class="text-xl font-semibold mb-2">"Instructions"</h2>
                    <div class="space-y-2 text-gray-800">
                        {recipe.instructions.lines()
                            .filter(|l| !l.trim().is_empty())
                            .map(|l| view! { <p>{l.to_string()}</p> })
                            .collect_view()}
                    </div>
                </section>
            </div>
        </article>
    }
}
