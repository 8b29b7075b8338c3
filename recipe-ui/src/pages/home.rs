//! Home Page
//!
//! Recipe list with debounced search and category filter.

use leptos::*;
use leptos_router::*;

use recipe_manager::display::format_minutes;
use recipe_manager::models::{Category, Recipe};
use recipe_manager::search::{Debouncer, SearchState, SEARCH_DEBOUNCE_MS};

use crate::api;
use crate::components::{ErrorMessage, Loading, RecipeImage, StarRating};

#[component]
pub fn Home() -> impl IntoView {
    let search = create_rw_signal(SearchState::default());
    let debouncer = store_value(Debouncer::new());
    let (recipes, set_recipes) = create_signal(Vec::<Recipe>::new());
    let (categories, set_categories) = create_signal(Vec::<Category>::new());
    let (loading, set_loading) = create_signal(true);
    let (error, set_error) = create_signal(None::<String>);

    let load = move || {
        let query = search.get_untracked().query();
        set_loading.set(true);
        spawn_local(async move {
            match api::find_recipes(&query).await {
                Ok(list) => {
                    set_recipes.set(list);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e)),
            }
            set_loading.set(false);
        });
    };

    // Categories once, recipes on mount
    create_effect(move |_| {
        spawn_local(async move {
            if let Ok(list) = api::fetch_categories().await {
                set_categories.set(list);
            }
        });
        load();
    });

    // Any change restarts the delay; only the latest one fetches
    let schedule = move || {
        let mut ticket = 0;
        debouncer.update_value(|d| ticket = d.bump());
        gloo_timers::callback::Timeout::new(SEARCH_DEBOUNCE_MS, move || {
            if debouncer.with_value(|d| d.is_current(ticket)) {
                load();
            }
        })
        .forget();
    };

    let on_term = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        search.update(|s| s.term = value);
        schedule();
    };

    let on_category = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        search.update(|s| s.category_id = value.parse().ok());
        schedule();
    };

    let clear_filters = move |_: web_sys::MouseEvent| {
        search.update(|s| s.clear());
        schedule();
    };

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-3xl font-bold">"Recipes"</h1>
            </div>

            <div class="flex flex-wrap gap-3">
                <input
                    type="search"
                    placeholder="Search recipes..."
                    prop:value=move || search.with(|s| s.term.clone())
                    on:input=on_term
                    class="flex-1 min-w-[200px] border border-gray-300 rounded-lg px-4 py-2"
                />
                <select
                    on:change=on_category
                    prop:value=move || search.with(|s| s.category_id.map(|id| id.to_string()).unwrap_or_default())
                    class="border border-gray-300 rounded-lg px-4 py-2"
                >
                    <option value="">"All Categories"</option>
                    {move || categories.get().into_iter().map(|c| view! {
                        <option value=c.id.to_string()>{c.name}</option>
                    }).collect_view()}
                </select>
                <Show when=move || search.with(|s| s.is_filtered())>
                    <button
                        on:click=clear_filters
                        class="px-4 py-2 text-gray-600 hover:text-gray-900"
                    >
                        "Clear filters"
                    </button>
                </Show>
            </div>

            {move || {
                let term = search.with(|s| s.term.trim().to_string());
                (!term.is_empty() && !loading.get()).then(|| view! {
                    <p class="text-gray-600">{search.with(|s| s.summary(recipes.with(|r| r.len())))}</p>
                })
            }}

            {move || error.get().map(|e| view! { <ErrorMessage message=e /> })}

            <Show when=move || !loading.get() fallback=|| view! { <Loading /> }>
                <Show
                    when=move || recipes.with(|r| !r.is_empty())
                    fallback=|| view! {
                        <div class="text-center py-12 text-gray-500">"No recipes found."</div>
                    }
                >
                    <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                        <For
                            each=move || recipes.get()
                            key=|r| r.id
                            children=move |recipe| view! { <RecipeCard recipe=recipe /> }
                        />
                    </div>
                </Show>
            </Show>
        </div>
    }
}

#[component]
fn RecipeCard(recipe: Recipe) -> impl IntoView {
    let total = recipe.total_time();

    view! {
        <A href=format!("/recipes/{}", recipe.id) class="block bg-white rounded-lg shadow hover:shadow-md transition-shadow overflow-hidden">
            <RecipeImage stored=recipe.image_url.clone() alt=recipe.title.clone() />
            <div class="p-4 space-y-2">
                <h2 class="text-lg font-semibold">{recipe.title.clone()}</h2>
                {recipe.description.clone().map(|d| view! {
                    <p class="text-sm text-gray-600 line-clamp-2">{d}</p>
                })}
                <div class="flex items-center justify-between text-sm text-gray-500">
                    <span>{recipe.category.as_ref().map(|c| c.name.clone()).unwrap_or_default()}</span>
                    {(total > 0).then(|| view! { <span>{format_minutes(total)}</span> })}
                </div>
                <StarRating rating=recipe.rating size=recipe_manager::display::StarSize::Small />
            </div>
        </A>
    }
}
