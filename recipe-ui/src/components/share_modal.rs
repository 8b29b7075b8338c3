//! Share Modal Component
//!
//! Public/private toggle and copyable share link for a recipe.

use leptos::*;
use wasm_bindgen::JsCast;

use recipe_manager::display::share_url;
use recipe_manager::models::Recipe;

use crate::api;

/// How long the copy button reads "Copied!"
const COPIED_RESET_MS: u32 = 2000;

#[component]
pub fn ShareModal(
    recipe: Recipe,
    #[prop(into)]
    on_close: Callback<()>,
    /// Receives the recipe after its sharing state changed
    #[prop(into)]
    on_update: Callback<Recipe>,
) -> impl IntoView {
    let recipe_id = recipe.id;
    let (is_public, set_is_public) = create_signal(recipe.is_public);
    let (token, set_token) = create_signal(recipe.share_token.clone());
    let (busy, set_busy) = create_signal(false);
    let (copied, set_copied) = create_signal(false);
    let (error, set_error) = create_signal(None::<String>);

    let link = move || {
        let origin = window().location().origin().ok()?;
        visible_link(is_public.get(), &origin, token.get().as_deref())
    };

    let toggle = move |_| {
        set_busy.set(true);
        set_error.set(None);
        let change = ShareChange::from_current(is_public.get_untracked());
        spawn_local(async move {
            let result = match change {
                ShareChange::MakePublic => api::share_recipe(recipe_id).await,
                ShareChange::MakePrivate => api::unshare_recipe(recipe_id).await,
            };
            match result {
                Ok(updated) => {
                    set_is_public.set(updated.is_public);
                    set_token.set(updated.share_token.clone());
                    on_update.call(updated);
                }
                Err(e) => set_error.set(Some(e)),
            }
            set_busy.set(false);
        });
    };

    let copy = move |_| {
        let Some(text) = link() else {
            return;
        };
        spawn_local(async move {
            match copy_to_clipboard(&text).await {
                Ok(()) => flash_copied(set_copied),
                Err(_) => set_error.set(Some("Failed to copy link".to_string())),
            }
        });
    };

    view! {
        <div class="fixed inset-0 bg-black/50 flex items-center justify-center z-50">
            <div class="bg-white rounded-lg shadow-xl p-6 w-full max-w-md">
                <div class="flex items-center justify-between mb-4">
                    <h2 class="text-xl font-bold">"Share Recipe"</h2>
                    <button on:click=move |_| on_close.call(()) class="text-gray-500 hover:text-gray-800">
                        "✕"
                    </button>
                </div>

                <div class="flex items-center justify-between mb-4">
                    <span class="text-gray-700">
                        {move || if is_public.get() { "This recipe is public" } else { "This recipe is private" }}
                    </span>
                    <button
                        on:click=toggle
                        disabled=move || busy.get()
                        class="px-4 py-2 rounded-lg bg-primary-600 hover:bg-primary-700 text-white disabled:bg-gray-400"
                    >
                        {move || ShareChange::from_current(is_public.get()).label()}
                    </button>
                </div>

                {move || link().map(|url| view! {
                    <div class="flex space-x-2">
                        <input
                            type="text"
                            readonly=true
                            value=url
                            class="flex-1 border border-gray-300 rounded-lg px-3 py-2 text-sm"
                        />
                        <button
                            on:click=copy
                            class="px-4 py-2 rounded-lg bg-gray-200 hover:bg-gray-300"
                        >
                            {move || copy_label(copied.get())}
                        </button>
                    </div>
                })}

                {move || error.get().map(|e| view! {
                    <p class="mt-3 text-sm text-red-600">{e}</p>
                })}
            </div>
        </div>
    }
}

/// The toggle button's effect for the recipe's current state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShareChange {
    MakePublic,
    MakePrivate,
}

impl ShareChange {
    fn from_current(is_public: bool) -> Self {
        if is_public {
            ShareChange::MakePrivate
        } else {
            ShareChange::MakePublic
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ShareChange::MakePublic => "Make Public",
            ShareChange::MakePrivate => "Make Private",
        }
    }
}

/// Share link to display; private recipes and missing tokens show none
fn visible_link(is_public: bool, origin: &str, token: Option<&str>) -> Option<String> {
    if !is_public {
        return None;
    }
    token.map(|t| share_url(origin, t))
}

fn copy_label(copied: bool) -> &'static str {
    if copied {
        "Copied!"
    } else {
        "Copy"
    }
}

/// Mark the link copied, then reset after `COPIED_RESET_MS`
fn flash_copied(set_copied: WriteSignal<bool>) {
    set_copied.set(true);
    gloo_timers::callback::Timeout::new(COPIED_RESET_MS, move || {
        set_copied.set(false);
    })
    .forget();
}

/// `navigator.clipboard.writeText`, looked up dynamically
async fn copy_to_clipboard(text: &str) -> Result<(), wasm_bindgen::JsValue> {
    let navigator = window().navigator();
    let clipboard = js_sys::Reflect::get(&navigator, &"clipboard".into())?;
    let write_text = js_sys::Reflect::get(&clipboard, &"writeText".into())?
        .dyn_into::<js_sys::Function>()?;
    let promise = write_text
        .call1(&clipboard, &text.into())?
        .dyn_into::<js_sys::Promise>()?;
    wasm_bindgen_futures::JsFuture::from(promise).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips_sharing() {
        assert_eq!(ShareChange::from_current(false), ShareChange::MakePublic);
        assert_eq!(ShareChange::from_current(true), ShareChange::MakePrivate);
        assert_eq!(ShareChange::from_current(false).label(), "Make Public");
        assert_eq!(ShareChange::from_current(true).label(), "Make Private");
    }

    #[test]
    fn test_link_only_for_public_recipes() {
        assert_eq!(
            visible_link(true, "https://recipes.example.com", Some("tok123")),
            Some("https://recipes.example.com/share/tok123".to_string())
        );
        assert_eq!(visible_link(false, "https://recipes.example.com", Some("tok123")), None);
        assert_eq!(visible_link(true, "https://recipes.example.com", None), None);
    }

    #[test]
    fn test_copy_label() {
        assert_eq!(copy_label(false), "Copy");
        assert_eq!(copy_label(true), "Copied!");
        assert_eq!(COPIED_RESET_MS, 2000);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use gloo_timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn copied_resets_after_two_seconds() {
        let runtime = create_runtime();
        let (copied, set_copied) = create_signal(false);

        flash_copied(set_copied);
        assert!(copied.get_untracked());

        TimeoutFuture::new(COPIED_RESET_MS / 2).await;
        assert!(copied.get_untracked());

        TimeoutFuture::new(COPIED_RESET_MS).await;
        assert!(!copied.get_untracked());

        runtime.dispose();
    }
}
