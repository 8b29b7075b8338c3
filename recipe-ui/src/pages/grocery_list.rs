//! Grocery List Page
//!
//! Pick recipes, generate the combined list, then check items off.

use leptos::*;

use recipe_manager::grocery::{Checklist, RecipeSelection};
use recipe_manager::models::{GroceryList as GeneratedList, Recipe};

use crate::api;
use crate::components::{ErrorMessage, Loading};
use crate::state::{require_sign_in, use_global_state};

#[component]
pub fn GroceryList() -> impl IntoView {
    let state = use_global_state();
    require_sign_in(state);

    let (recipes, set_recipes) = create_signal(Vec::<Recipe>::new());
    let (loading, set_loading) = create_signal(true);
    let (error, set_error) = create_signal(None::<String>);
    let selection = create_rw_signal(RecipeSelection::new());
    let list = create_rw_signal(None::<GeneratedList>);
    let checklist = create_rw_signal(Checklist::new());
    let (generating, set_generating) = create_signal(false);

    create_effect(move |_| {
        spawn_local(async move {
            match api::fetch_recipes(None).await {
                Ok(all) => set_recipes.set(all),
                Err(e) => set_error.set(Some(e)),
            }
            set_loading.set(false);
        });
    });

    let available = move || recipes.with(|r| r.iter().map(|r| r.id).collect::<Vec<_>>());

    let on_generate = move |_: web_sys::MouseEvent| {
        let request = match selection.with_untracked(|s| s.to_request()) {
            Ok(request) => request,
            Err(e) => {
                state.show_error(&e.to_string());
                return;
            }
        };
        set_generating.set(true);
        spawn_local(async move {
            match api::generate_grocery_list(&request).await {
                Ok(generated) => {
                    checklist.update(|c| c.reset());
                    list.set(Some(generated));
                }
                Err(e) => state.show_error(&e),
            }
            set_generating.set(false);
        });
    };

    let start_over = Callback::new(move |_: ()| {
        list.set(None);
        checklist.update(|c| c.reset());
    });

    view! {
        <div class="max-w-3xl mx-auto space-y-6">
            <h1 class="text-3xl font-bold">"Grocery List"</h1>
            {move || error.get().map(|e| view! { <ErrorMessage message=e /> })}

            <Show when=move || !loading.get() fallback=|| view! { <Loading /> }>
                <Show
                    when=move || list.with(|l| l.is_none())
                    fallback=move || view! { <GeneratedItems list=list checklist=checklist on_reset=start_over /> }
                >
                    <div class="bg-white rounded-lg shadow p-6 space-y-4">
                        <div class="flex items-center justify-between">
                            <h2 class="text-lg font-semibold">
                                {move || format!("Select recipes ({} selected)", selection.with(|s| s.len()))}
                            </h2>
                            <button
                                on:click=move |_| {
                                    let ids = available();
                                    selection.update(|s| s.toggle_all(&ids));
                                }
                                class="text-sm text-primary-600 hover:underline"
                            >
                                {move || {
                                    let ids = available();
                                    selection.with(|s| s.toggle_all_label(&ids))
                                }}
                            </button>
                        </div>

                        <Show
                            when=move || recipes.with(|r| !r.is_empty())
                            fallback=|| view! { <p class="text-gray-500">"No recipes to choose from."</p> }
                        >
                            <ul class="divide-y">
                                <For
                                    each=move || recipes.get()
                                    key=|r| r.id
                                    children=move |recipe| {
                                        let id = recipe.id;
                                        view! {
                                            <li class="py-2">
                                                <label class="flex items-center space-x-3 cursor-pointer">
                                                    <input
                                                        type="checkbox"
                                                        prop:checked=move || selection.with(|s| s.contains(id))
                                                        on:change=move |_| selection.update(|s| s.toggle(id))
                                                    />
                                                    <span>{recipe.title.clone()}</span>
                                                </label>
                                            </li>
                                        }
                                    }
                                />
                            </ul>
                        </Show>

                        <button
                            on:click=on_generate
                            disabled=move || generating.get() || selection.with(|s| s.is_empty())
                            class="w-full px-4 py-2 bg-primary-600 hover:bg-primary-700 text-white rounded-lg disabled:bg-gray-400"
                        >
                            {move || if generating.get() { "Generating..." } else { "Generate Grocery List" }}
                        </button>
                    </div>
                </Show>
            </Show>
        </div>
    }
}

#[component]
fn GeneratedItems(
    list: RwSignal<Option<GeneratedList>>,
    checklist: RwSignal<Checklist>,
    on_reset: Callback<()>,
) -> impl IntoView {
    let total = move || list.with(|l| l.as_ref().map(|l| l.items.len()).unwrap_or(0));

    view! {
        <div class="bg-white rounded-lg shadow p-6 space-y-4">
            <div class="flex items-center justify-between">
                <div>
                    <h2 class="text-lg font-semibold">"Your Grocery List"</h2>
                    <p class="text-sm text-gray-600">
                        {move || list.with(|l| l.as_ref().map(|l| format!("For: {}", l.recipe_titles.join(", "))))}
                    </p>
                </div>
                <span class="text-sm text-gray-600">{move || checklist.with(|c| c.progress(total()))}</span>
            </div>

            {move || list.with(|l| {
                let items = l.as_ref().map(|l| l.items.clone()).unwrap_or_default();
                if items.is_empty() {
                    return view! { <p class="text-gray-500">"The selected recipes have no ingredients."</p> }.into_view();
                }
                view! {
                    <ul class="divide-y">
                        {items.into_iter().enumerate().map(|(index, item)| {
                            let shared = (item.recipe_count > 1).then(|| item.recipes.join(", "));
                            view! {
                                <li class="py-2">
                                    <label class="flex items-start space-x-3 cursor-pointer">
                                        <input
                                            type="checkbox"
                                            class="mt-1"
                                            prop:checked=move || checklist.with(|c| c.is_checked(index))
                                            on:change=move |_| checklist.update(|c| c.toggle(index))
                                        />
                                        <div class=move || if checklist.with(|c| c.is_checked(index)) {
                                            "line-through text-gray-400"
                                        } else {
                                            ""
                                        }>
                                            <div>{item.line()}</div>
                                            {shared.map(|names| view! {
                                                <div class="text-xs text-gray-500">{format!("Used in: {}", names)}</div>
                                            })}
                                        </div>
                                    </label>
                                </li>
                            }
                        }).collect_view()}
                    </ul>
                }.into_view()
            })}

            <div class="flex justify-end space-x-2">
                <button
                    on:click=move |_| checklist.update(|c| c.reset())
                    class="px-4 py-2 bg-gray-200 hover:bg-gray-300 rounded-lg"
                >
                    "Uncheck All"
                </button>
                <button
                    on:click=move |_| on_reset.call(())
                    class="px-4 py-2 bg-primary-600 hover:bg-primary-700 text-white rounded-lg"
                >
                    "New List"
                </button>
            </div>
        </div>
    }
}
