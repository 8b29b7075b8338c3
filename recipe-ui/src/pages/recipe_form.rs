//! Recipe Form Pages
//!
//! Create and edit recipes, including ingredient rows and image upload.

use leptos::*;
use leptos_router::*;
use wasm_bindgen::JsCast;

use recipe_manager::display::{image_url, StarSize};
use recipe_manager::forms::{upload_failure_message, FormMode, IngredientField, RecipeForm};
use recipe_manager::models::{Category, Recipe};

use crate::api;
use crate::components::{ErrorMessage, InlineLoading, Loading, StarRating};
use crate::state::{require_sign_in, use_global_state};

#[component]
pub fn NewRecipe() -> impl IntoView {
    let state = use_global_state();
    require_sign_in(state);

    let (categories, set_categories) = create_signal(Vec::<Category>::new());
    create_effect(move |_| {
        spawn_local(async move {
            if let Ok(list) = api::fetch_categories().await {
                set_categories.set(list);
            }
        });
    });

    view! {
        <div class="max-w-3xl mx-auto space-y-6">
            <h1 class="text-3xl font-bold">"Create Recipe"</h1>
            <RecipeEditor
                mode=FormMode::Create
                initial=RecipeForm::new()
                recipe_id=None
                categories=categories
            />
        </div>
    }
}

#[component]
pub fn EditRecipe() -> impl IntoView {
    let state = use_global_state();
    require_sign_in(state);

    let params = use_params_map();
    let recipe_id = move || params.with(|p| p.get("id").and_then(|id| id.parse::<i64>().ok()));

    let (recipe, set_recipe) = create_signal(None::<Recipe>);
    let (categories, set_categories) = create_signal(Vec::<Category>::new());
    let (loading, set_loading) = create_signal(true);
    let (error, set_error) = create_signal(None::<String>);

    create_effect(move |_| {
        let Some(id) = recipe_id() else {
            set_error.set(Some("Recipe not found".to_string()));
            set_loading.set(false);
            return;
        };
        spawn_local(async move {
            let (recipe, categories) =
                futures_util::join!(api::fetch_recipe(id), api::fetch_categories());
            match recipe {
                Ok(r) => set_recipe.set(Some(r)),
                Err(e) => set_error.set(Some(e)),
            }
            if let Ok(list) = categories {
                set_categories.set(list);
            }
            set_loading.set(false);
        });
    });

    view! {
        <div class="max-w-3xl mx-auto space-y-6">
            <h1 class="text-3xl font-bold">"Edit Recipe"</h1>
            {move || error.get().map(|e| view! { <ErrorMessage message=e /> })}
            <Show when=move || !loading.get() fallback=|| view! { <Loading /> }>
                {move || recipe.get().map(|r| view! {
                    <RecipeEditor
                        mode=FormMode::Edit
                        initial=RecipeForm::from_recipe(&r)
                        recipe_id=Some(r.id)
                        categories=categories
                    />
                })}
            </Show>
        </div>
    }
}

#[component]
fn RecipeEditor(
    mode: FormMode,
    initial: RecipeForm,
    recipe_id: Option<i64>,
    categories: ReadSignal<Vec<Category>>,
) -> impl IntoView {
    let state = use_global_state();
    let navigate = use_navigate();

    let form = create_rw_signal(initial);
    let picked_file = store_value(None::<web_sys::File>);
    let (error, set_error) = create_signal(None::<String>);
    let (saving, set_saving) = create_signal(false);

    let on_file = move |ev: web_sys::Event| {
        let file = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        let Some(file) = file else {
            form.update(|f| f.clear_image_file());
            picked_file.set_value(None);
            return;
        };
        let mut result = Ok(());
        form.update(|f| result = f.select_image_file(&file.name(), file.size() as u64));
        match result {
            Ok(()) => {
                picked_file.set_value(Some(file));
                set_error.set(None);
            }
            Err(e) => {
                picked_file.set_value(None);
                set_error.set(Some(e.to_string()));
            }
        }
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let input = match form.with_untracked(|f| f.to_input(mode)) {
            Ok(input) => input,
            Err(e) => {
                set_error.set(Some(e.to_string()));
                return;
            }
        };
        set_error.set(None);
        set_saving.set(true);

        let file = picked_file.get_value();
        let navigate = navigate.clone();
        spawn_local(async move {
            let saved = match recipe_id {
                Some(id) => api::update_recipe(id, &input).await,
                None => api::create_recipe(&input).await,
            };
            let recipe = match saved {
                Ok(r) => r,
                Err(e) => {
                    set_error.set(Some(e));
                    set_saving.set(false);
                    return;
                }
            };

            let uploaded = match file {
                Some(file) => api::upload_image(recipe.id, &file).await.map(|_| ()),
                None => Ok(()),
            };
            set_saving.set(false);
            match uploaded {
                Ok(()) => state.show_success("Recipe saved"),
                Err(e) => {
                    state.show_error(&upload_failure_message(mode, &e));
                    if !mode.leaves_form_on_upload_failure() {
                        return;
                    }
                }
            }
            navigate(&format!("/recipes/{}", recipe.id), Default::default());
        });
    };

    let cancel_href = match recipe_id {
        Some(id) => format!("/recipes/{}", id),
        None => "/".to_string(),
    };

    view! {
        <form on:submit=on_submit class="bg-white rounded-lg shadow p-6 space-y-6">
            {move || error.get().map(|e| view! { <ErrorMessage message=e /> })}

            {text_input(form, "Title *", "text", |f| &f.title, |f| &mut f.title)}

            <div>
                <label class="block text-sm font-medium mb-1">"Description"</label>
                <textarea
                    rows="2"
                    prop:value=move || form.with(|f| f.description.clone())
                    on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                    class="w-full border border-gray-300 rounded-lg px-3 py-2"
                />
            </div>

            <div>
                <label class="block text-sm font-medium mb-1">"Category"</label>
                <select
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| f.category_id = value.parse().ok());
                    }
                    prop:value=move || form.with(|f| f.category_id.map(|id| id.to_string()).unwrap_or_default())
                    class="w-full border border-gray-300 rounded-lg px-3 py-2"
                >
                    <option value="">"No category"</option>
                    {move || categories.get().into_iter().map(|c| view! {
                        <option value=c.id.to_string()>{c.name}</option>
                    }).collect_view()}
                </select>
            </div>

            <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                {text_input(form, "Prep time (min)", "number", |f| &f.prep_time, |f| &mut f.prep_time)}
                {text_input(form, "Cook time (min)", "number", |f| &f.cook_time, |f| &mut f.cook_time)}
                {text_input(form, "Servings", "number", |f| &f.servings, |f| &mut f.servings)}
            </div>

            <fieldset>
                <legend class="text-sm font-medium mb-2">"Nutrition per serving"</legend>
                <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                    {text_input(form, "Calories", "number", |f| &f.calories, |f| &mut f.calories)}
                    {text_input(form, "Protein (g)", "number", |f| &f.protein, |f| &mut f.protein)}
                    {text_input(form, "Carbs (g)", "number", |f| &f.carbohydrates, |f| &mut f.carbohydrates)}
                    {text_input(form, "Fat (g)", "number", |f| &f.fat, |f| &mut f.fat)}
                </div>
            </fieldset>

            <div>
                <label class="block text-sm font-medium mb-1">"Rating"</label>
                <div class="flex items-center space-x-3">
                    <StarRating
                        rating=Signal::derive(move || form.with(|f| f.rating))
                        size=StarSize::Large
                        on_change=Callback::new(move |n: f64| form.update(|f| f.rating = Some(n)))
                    />
                    <Show when=move || form.with(|f| f.rating.is_some())>
                        <button
                            type="button"
                            on:click=move |_| form.update(|f| f.rating = None)
                            class="text-sm text-gray-500 hover:text-gray-800"
                        >
                            "Clear"
                        </button>
                    </Show>
                </div>
            </div>

            <IngredientRows form=form />

            <div>
                <label class="block text-sm font-medium mb-1">"Instructions *"</label>
                <textarea
                    rows="8"
                    prop:value=move || form.with(|f| f.instructions.clone())
                    on:input=move |ev| form.update(|f| f.instructions = event_target_value(&ev))
                    class="w-full border border-gray-300 rounded-lg px-3 py-2"
                />
            </div>

            <fieldset class="space-y-3">
                <legend class="text-sm font-medium">"Image"</legend>
                {move || {
                    let stored = form.with(|f| f.image_url.clone());
                    image_url(&api::get_api_base(), Some(stored.as_str())).map(|src| view! {
                        <img src=src alt="Current image" class="h-32 rounded-lg object-cover" />
                    })
                }}
                {text_input(form, "Image URL", "url", |f| &f.image_url, |f| &mut f.image_url)}
                <div>
                    <label class="block text-sm text-gray-600 mb-1">"Or upload a file (max 5MB)"</label>
                    <input
                        type="file"
                        accept=".jpg,.jpeg,.png,.gif,.webp"
                        on:change=on_file
                    />
                    {move || form.with(|f| f.image_file.as_ref().map(|img| img.summary())).map(|summary| view! {
                        <p class="text-sm text-gray-600 mt-1">{summary}</p>
                    })}
                </div>
            </fieldset>

            <div class="flex justify-end space-x-3">
                <A href=cancel_href class="px-4 py-2 bg-gray-200 hover:bg-gray-300 rounded-lg">"Cancel"</A>
                <button
                    type="submit"
                    disabled=move || saving.get()
                    class="px-4 py-2 bg-primary-600 hover:bg-primary-700 text-white rounded-lg disabled:bg-gray-400 flex items-center space-x-2"
                >
                    <Show when=move || saving.get()>
                        <InlineLoading />
                    </Show>
                    <span>{move || match (saving.get(), mode) {
                        (true, _) => "Saving...",
                        (false, FormMode::Create) => "Create Recipe",
                        (false, FormMode::Edit) => "Save Changes",
                    }}</span>
                </button>
            </div>
        </form>
    }
}

fn text_input(
    form: RwSignal<RecipeForm>,
    label: &'static str,
    input_type: &'static str,
    get: fn(&RecipeForm) -> &String,
    set: fn(&mut RecipeForm) -> &mut String,
) -> impl IntoView {
    view! {
        <div>
            <label class="block text-sm font-medium mb-1">{label}</label>
            <input
                type=input_type
                prop:value=move || form.with(|f| get(f).clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    form.update(|f| *set(f) = value);
                }
                class="w-full border border-gray-300 rounded-lg px-3 py-2"
            />
        </div>
    }
}

#[component]
fn IngredientRows(form: RwSignal<RecipeForm>) -> impl IntoView {
    let row_count = create_memo(move |_| form.with(|f| f.ingredients.len()));

    let field_input = move |index: usize, field: IngredientField, placeholder: &'static str| {
        view! {
            <input
                type="text"
                placeholder=placeholder
                prop:value=move || form.with(|f| {
                    f.ingredients.get(index).map(|row| match field {
                        IngredientField::Name => row.name.clone(),
                        IngredientField::Amount => row.amount.clone(),
                        IngredientField::Unit => row.unit.clone(),
                    }).unwrap_or_default()
                })
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    form.update(|f| f.update_ingredient(index, field, &value));
                }
                class="border border-gray-300 rounded-lg px-3 py-2"
            />
        }
    };

    view! {
        <fieldset class="space-y-2">
            <legend class="text-sm font-medium">"Ingredients"</legend>
            {move || (0..row_count.get()).map(|index| view! {
                <div class="grid grid-cols-[2fr_1fr_1fr_auto] gap-2">
                    {field_input(index, IngredientField::Name, "Ingredient")}
                    {field_input(index, IngredientField::Amount, "Amount")}
                    {field_input(index, IngredientField::Unit, "Unit")}
                    <button
                        type="button"
                        on:click=move |_| form.update(|f| f.remove_ingredient(index))
                        class="px-3 text-red-600 hover:text-red-800"
                        aria-label="Remove ingredient"
                    >
                        "✕"
                    </button>
                </div>
            }).collect_view()}
            <button
                type="button"
                on:click=move |_| form.update(|f| f.add_ingredient())
                class="text-sm text-primary-600 hover:underline"
            >
                "+ Add ingredient"
            </button>
        </fieldset>
    }
}
