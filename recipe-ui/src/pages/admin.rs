//! Admin Dashboard
//!
//! Site statistics and user management, visible to admins only.

use leptos::*;
use leptos_router::*;

use recipe_manager::forms::validate_new_password;
use recipe_manager::models::{AdminStats, AdminUserUpdate, User};

use crate::api;
use crate::components::{ErrorMessage, Loading};
use crate::state::use_global_state;

#[component]
pub fn Admin() -> impl IntoView {
    let state = use_global_state();
    let navigate = use_navigate();

    let (stats, set_stats) = create_signal(None::<AdminStats>);
    let (users, set_users) = create_signal(Vec::<User>::new());
    let (loading, set_loading) = create_signal(true);
    let (error, set_error) = create_signal(None::<String>);

    let load = move || {
        spawn_local(async move {
            let (stats, users) = futures_util::join!(api::fetch_admin_stats(), api::fetch_admin_users());
            match (stats, users) {
                (Ok(s), Ok(u)) => {
                    set_stats.set(Some(s));
                    set_users.set(u);
                    set_error.set(None);
                }
                (Err(e), _) | (_, Err(e)) => set_error.set(Some(e)),
            }
            set_loading.set(false);
        });
    };

    // Wait for the session check, then bounce anyone who is not an admin
    create_effect(move |loaded: Option<bool>| {
        if loaded == Some(true) || state.auth_loading.get() {
            return loaded.unwrap_or(false);
        }
        if !state.is_admin() {
            navigate("/", Default::default());
            return false;
        }
        load();
        true
    });

    let apply_update = move |id: i64, update: AdminUserUpdate, done: &'static str| {
        spawn_local(async move {
            match api::update_user(id, &update).await {
                Ok(_) => {
                    state.show_success(done);
                    load();
                }
                Err(e) => state.show_error(&e),
            }
        });
    };

    let on_toggle_active = move |user: User| {
        let update = AdminUserUpdate {
            is_active: Some(!user.is_active),
            ..Default::default()
        };
        let done = if user.is_active { "User deactivated" } else { "User activated" };
        apply_update(user.id, update, done);
    };

    let on_toggle_admin = move |user: User| {
        let update = AdminUserUpdate {
            is_admin: Some(!user.is_admin),
            ..Default::default()
        };
        let done = if user.is_admin { "Admin rights removed" } else { "Admin rights granted" };
        apply_update(user.id, update, done);
    };

    let on_reset_password = move |user: User| {
        let entered = window()
            .prompt_with_message(&format!("New password for {}:", user.email))
            .ok()
            .flatten();
        let Some(password) = entered else {
            return;
        };
        if let Err(e) = validate_new_password(&password) {
            state.show_error(&e.to_string());
            return;
        }
        spawn_local(async move {
            match api::reset_user_password(user.id, &password).await {
                Ok(()) => state.show_success(&format!("Password reset for {}", user.email)),
                Err(e) => state.show_error(&e),
            }
        });
    };

    let on_delete = move |user: User| {
        let confirmed = window()
            .confirm_with_message(&format!(
                "Delete {} and all of their recipes? This cannot be undone.",
                user.email
            ))
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            match api::delete_user(user.id).await {
                Ok(()) => {
                    state.show_success("User deleted");
                    load();
                }
                Err(e) => state.show_error(&e),
            }
        });
    };

    view! {
        <div class="space-y-6">
            <h1 class="text-3xl font-bold">"Admin Dashboard"</h1>
            {move || error.get().map(|e| view! { <ErrorMessage message=e /> })}

            <Show when=move || !loading.get() fallback=|| view! { <Loading /> }>
                {move || stats.get().map(|s| view! { <StatsGrid stats=s /> })}

                <section class="bg-white rounded-lg shadow overflow-x-auto">
                    <h2 class="text-xl font-semibold p-4">"Users"</h2>
                    <table class="w-full text-sm">
                        <thead class="bg-gray-50 text-left">
                            <tr>
                                <th class="p-3">"Email"</th>
                                <th class="p-3">"Name"</th>
                                <th class="p-3">"Status"</th>
                                <th class="p-3">"Role"</th>
                                <th class="p-3">"Joined"</th>
                                <th class="p-3"></th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || users.get()
                                key=|u| (u.id, u.is_active, u.is_admin)
                                children=move |user| {
                                    let is_self = state.user.with_untracked(|me| me.as_ref().map(|me| me.id) == Some(user.id));
                                    let (u1, u2, u3, u4) = (user.clone(), user.clone(), user.clone(), user.clone());
                                    view! {
                                        <tr class="border-t">
                                            <td class="p-3">{user.email.clone()}</td>
                                            <td class="p-3">{user.full_name.clone().unwrap_or_default()}</td>
                                            <td class="p-3">
                                                {if user.is_active {
                                                    view! { <span class="text-green-700">"Active"</span> }
                                                } else {
                                                    view! { <span class="text-red-700">"Inactive"</span> }
                                                }}
                                            </td>
                                            <td class="p-3">{if user.is_admin { "Admin" } else { "User" }}</td>
                                            <td class="p-3">
                                                {user.created_at.map(|t| t.format("%Y-%m-%d").to_string()).unwrap_or_default()}
                                            </td>
                                            <td class="p-3 space-x-2 whitespace-nowrap">
                                                <button
                                                    on:click=move |_| on_toggle_active(u1.clone())
                                                    disabled=is_self
                                                    class="text-primary-600 hover:underline disabled:text-gray-400"
                                                >
                                                    {if user.is_active { "Deactivate" } else { "Activate" }}
                                                </button>
                                                <button
                                                    on:click=move |_| on_toggle_admin(u2.clone())
                                                    disabled=is_self
                                                    class="text-primary-600 hover:underline disabled:text-gray-400"
                                                >
                                                    {if user.is_admin { "Remove admin" } else { "Make admin" }}
                                                </button>
                                                <button
                                                    on:click=move |_| on_reset_password(u3.clone())
                                                    class="text-primary-600 hover:underline"
                                                >
                                                    "Reset password"
                                                </button>
                                                <button
                                                    on:click=move |_| on_delete(u4.clone())
                                                    disabled=is_self
                                                    class="text-red-600 hover:underline disabled:text-gray-400"
                                                >
                                                    "Delete"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </section>
            </Show>
        </div>
    }
}

#[component]
fn StatsGrid(stats: AdminStats) -> impl IntoView {
    let cards = [
        ("Total users", stats.total_users),
        ("Active users", stats.active_users),
        ("Admins", stats.admin_users),
        ("Recipes", stats.total_recipes),
        ("Public recipes", stats.public_recipes),
        ("Meal plans", stats.total_meal_plans),
        ("Categories", stats.total_categories),
    ];

    view! {
        <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
            {cards.into_iter().map(|(label, value)| view! {
                <div class="bg-white rounded-lg shadow p-4">
                    <div class="text-2xl font-bold">{value}</div>
                    <div class="text-sm text-gray-600">{label}</div>
                </div>
            }).collect_view()}
        </div>
    }
}
