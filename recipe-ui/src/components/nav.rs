//! Navigation Component
//!
//! Header navigation bar with brand, links and account actions.

use leptos::*;
use leptos_router::*;

use crate::state::use_global_state;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let state = use_global_state();
    let navigate = use_navigate();

    let on_logout = move |_| {
        state.logout();
        navigate("/login", Default::default());
    };

    view! {
        <nav class="bg-white border-b border-gray-200 shadow-sm">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <A href="/" class="flex items-center space-x-3">
                        <span class="text-2xl">"🍳"</span>
                        <span class="text-xl font-bold text-gray-900">"Recipe Manager"</span>
                    </A>

                    <div class="flex items-center space-x-1">
                        <NavLink href="/" label="Recipes" />
                        <NavLink href="/categories" label="Categories" />
                        <NavLink href="/meal-plans" label="Meal Plans" />
                        <NavLink href="/grocery-list" label="Grocery List" />
                        <Show when=move || state.is_admin()>
                            <NavLink href="/admin" label="Admin" />
                        </Show>
                    </div>

                    <div class="flex items-center space-x-3">
                        <Show
                            when=move || state.is_authenticated()
                            fallback=|| view! {
                                <A href="/login" class="text-gray-700 hover:text-gray-900">"Sign In"</A>
                                <A
                                    href="/register"
                                    class="px-4 py-2 bg-primary-600 hover:bg-primary-700 text-white rounded-lg"
                                >
                                    "Sign Up"
                                </A>
                            }
                        >
                            <A
                                href="/recipes/new"
                                class="px-4 py-2 bg-primary-600 hover:bg-primary-700 text-white rounded-lg"
                            >
                                "+ Create Recipe"
                            </A>
                            <span class="text-sm text-gray-600">
                                {move || state.user.with(|u| u.as_ref().map(|u| u.email.clone()).unwrap_or_default())}
                            </span>
                            <button
                                on:click=on_logout.clone()
                                class="text-sm text-gray-600 hover:text-gray-900"
                            >
                                "Logout"
                            </button>
                        </Show>
                    </div>
                </div>
            </div>
        </nav>
    }
}

/// Individual navigation link
#[component]
fn NavLink(
    href: &'static str,
    label: &'static str,
) -> impl IntoView {
    view! {
        <A
            href=href
            class="px-4 py-2 rounded-lg text-gray-600 hover:text-gray-900 hover:bg-gray-100 transition-colors"
            active_class="bg-gray-100 text-gray-900"
            exact=true
        >
            {label}
        </A>
    }
}
