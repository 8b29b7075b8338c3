//! Categories Pages
//!
//! List, create, rename and delete recipe categories.

use leptos::*;
use leptos_router::*;

use recipe_manager::forms::CategoryForm;
use recipe_manager::models::Category;

use crate::api;
use crate::components::{ErrorMessage, Loading};
use crate::state::{require_sign_in, use_global_state};

#[component]
pub fn Categories() -> impl IntoView {
    let state = use_global_state();
    require_sign_in(state);

    let (categories, set_categories) = create_signal(Vec::<Category>::new());
    let (loading, set_loading) = create_signal(true);
    let (error, set_error) = create_signal(None::<String>);
    let form = create_rw_signal(CategoryForm::default());
    let (form_error, set_form_error) = create_signal(None::<String>);
    let (creating, set_creating) = create_signal(false);

    let load = move || {
        spawn_local(async move {
            match api::fetch_categories().await {
                Ok(list) => {
                    set_categories.set(list);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e)),
            }
            set_loading.set(false);
        });
    };

    create_effect(move |_| load());

    let on_create = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let input = match form.with_untracked(|f| f.to_input()) {
            Ok(input) => input,
            Err(e) => {
                set_form_error.set(Some(e.to_string()));
                return;
            }
        };
        set_form_error.set(None);
        set_creating.set(true);
        spawn_local(async move {
            match api::create_category(&input).await {
                Ok(category) => {
                    state.show_success(&format!("Category \"{}\" created", category.name));
                    form.set(CategoryForm::default());
                    load();
                }
                Err(e) => set_form_error.set(Some(e)),
            }
            set_creating.set(false);
        });
    };

    let on_delete = move |category: Category| {
        let confirmed = window()
            .confirm_with_message(&format!(
                "Delete category \"{}\"? Recipes in it will become uncategorized.",
                category.name
            ))
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            match api::delete_category(category.id).await {
                Ok(()) => {
                    state.show_success("Category deleted");
                    load();
                }
                Err(e) => state.show_error(&e),
            }
        });
    };

    view! {
        <div class="max-w-3xl mx-auto space-y-6">
            <h1 class="text-3xl font-bold">"Categories"</h1>

            <form on:submit=on_create class="bg-white rounded-lg shadow p-6 space-y-3">
                <h2 class="text-lg font-semibold">"New Category"</h2>
                {move || form_error.get().map(|e| view! { <ErrorMessage message=e /> })}
                <input
                    type="text"
                    placeholder="Name"
                    prop:value=move || form.with(|f| f.name.clone())
                    on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                    class="w-full border border-gray-300 rounded-lg px-3 py-2"
                />
                <input
                    type="text"
                    placeholder="Description (optional)"
                    prop:value=move || form.with(|f| f.description.clone())
                    on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                    class="w-full border border-gray-300 rounded-lg px-3 py-2"
                />
                <button
                    type="submit"
                    disabled=move || creating.get()
                    class="px-4 py-2 bg-primary-600 hover:bg-primary-700 text-white rounded-lg disabled:bg-gray-400"
                >
                    {move || if creating.get() { "Creating..." } else { "Create Category" }}
                </button>
            </form>

            {move || error.get().map(|e| view! { <ErrorMessage message=e /> })}

            <Show when=move || !loading.get() fallback=|| view! { <Loading /> }>
                <Show
                    when=move || categories.with(|c| !c.is_empty())
                    fallback=|| view! { <p class="text-gray-500">"No categories yet."</p> }
                >
                    <ul class="bg-white rounded-lg shadow divide-y">
                        <For
                            each=move || categories.get()
                            key=|c| (c.id, c.name.clone())
                            children=move |category| {
                                let edit_href = format!("/categories/{}/edit", category.id);
                                let to_delete = category.clone();
                                view! {
                                    <li class="flex items-center justify-between p-4">
                                        <div>
                                            <div class="font-medium">{category.name.clone()}</div>
                                            {category.description.clone().map(|d| view! {
                                                <div class="text-sm text-gray-600">{d}</div>
                                            })}
                                        </div>
                                        <div class="space-x-3">
                                            <A href=edit_href class="text-primary-600 hover:underline">"Edit"</A>
                                            <button
                                                on:click=move |_| on_delete(to_delete.clone())
                                                class="text-red-600 hover:underline"
                                            >
                                                "Delete"
                                            </button>
                                        </div>
                                    </li>
                                }
                            }
                        />
                    </ul>
                </Show>
            </Show>
        </div>
    }
}

#[component]
pub fn CategoryEdit() -> impl IntoView {
    let state = use_global_state();
    require_sign_in(state);

    let params = use_params_map();
    let navigate = use_navigate();
    let category_id = move || params.with(|p| p.get("id").and_then(|id| id.parse::<i64>().ok()));

    let form = create_rw_signal(CategoryForm::default());
    let (loading, set_loading) = create_signal(true);
    let (saving, set_saving) = create_signal(false);
    let (error, set_error) = create_signal(None::<String>);

    create_effect(move |_| {
        let Some(id) = category_id() else {
            set_error.set(Some("Category not found".to_string()));
            set_loading.set(false);
            return;
        };
        spawn_local(async move {
            match api::fetch_category(id).await {
                Ok(c) => form.set(CategoryForm {
                    name: c.name,
                    description: c.description.unwrap_or_default(),
                }),
                Err(e) => set_error.set(Some(e)),
            }
            set_loading.set(false);
        });
    });

    let on_save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(id) = category_id() else {
            return;
        };
        let input = match form.with_untracked(|f| f.to_input()) {
            Ok(input) => input,
            Err(e) => {
                set_error.set(Some(e.to_string()));
                return;
            }
        };
        set_saving.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::update_category(id, &input).await {
                Ok(_) => {
                    state.show_success("Category updated");
                    navigate("/categories", Default::default());
                }
                Err(e) => set_error.set(Some(e)),
            }
            set_saving.set(false);
        });
    };

    view! {
        <div class="max-w-xl mx-auto space-y-6">
            <h1 class="text-3xl font-bold">"Edit Category"</h1>
            {move || error.get().map(|e| view! { <ErrorMessage message=e /> })}
            <Show when=move || !loading.get() fallback=|| view! { <Loading /> }>
                <form on:submit=on_save class="bg-white rounded-lg shadow p-6 space-y-3">
                    <label class="block text-sm font-medium">"Name"</label>
                    <input
                        type="text"
                        prop:value=move || form.with(|f| f.name.clone())
                        on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                        class="w-full border border-gray-300 rounded-lg px-3 py-2"
                    />
                    <label class="block text-sm font-medium">"Description"</label>
                    <input
                        type="text"
                        prop:value=move || form.with(|f| f.description.clone())
                        on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                        class="w-full border border-gray-300 rounded-lg px-3 py-2"
                    />
                    <div class="flex justify-end space-x-3">
                        <A href="/categories" class="px-4 py-2 bg-gray-200 hover:bg-gray-300 rounded-lg">"Cancel"</A>
                        <button
                            type="submit"
                            disabled=move || saving.get()
                            class="px-4 py-2 bg-primary-600 hover:bg-primary-700 text-white rounded-lg disabled:bg-gray-400"
                        >
                            {move || if saving.get() { "Saving..." } else { "Save" }}
                        </button>
                    </div>
                </form>
            </Show>
        </div>
    }
}
