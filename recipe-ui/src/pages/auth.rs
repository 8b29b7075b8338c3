//! Sign-in Pages
//!
//! Login and registration forms.

use leptos::*;
use leptos_router::*;

use recipe_manager::forms::{LoginForm, RegisterForm};

use crate::api;
use crate::components::ErrorMessage;
use crate::state::use_global_state;

#[component]
pub fn Login() -> impl IntoView {
    let state = use_global_state();
    let navigate = use_navigate();

    let form = create_rw_signal(LoginForm::default());
    let (error, set_error) = create_signal(None::<String>);
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let request = match form.with_untracked(|f| f.to_request()) {
            Ok(request) => request,
            Err(e) => {
                set_error.set(Some(e.to_string()));
                return;
            }
        };
        set_error.set(None);
        set_submitting.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            let result = match api::login(&request).await {
                Ok(token) => state.sign_in(&token.access_token).await,
                Err(e) => Err(e),
            };
            set_submitting.set(false);
            match result {
                Ok(user) => {
                    state.show_success(&format!("Welcome back, {}", user.display_name()));
                    navigate("/", Default::default());
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    view! {
        <div class="max-w-md mx-auto space-y-6">
            <h1 class="text-3xl font-bold text-center">"Sign In"</h1>
            <form on:submit=on_submit class="bg-white rounded-lg shadow p-6 space-y-4">
                {move || error.get().map(|e| view! { <ErrorMessage message=e /> })}
                <div>
                    <label class="block text-sm font-medium mb-1">"Email"</label>
                    <input
                        type="email"
                        autocomplete="email"
                        prop:value=move || form.with(|f| f.email.clone())
                        on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                        class="w-full border border-gray-300 rounded-lg px-3 py-2"
                    />
                </div>
                <div>
                    <label class="block text-sm font-medium mb-1">"Password"</label>
                    <input
                        type="password"
                        autocomplete="current-password"
                        prop:value=move || form.with(|f| f.password.clone())
                        on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                        class="w-full border border-gray-300 rounded-lg px-3 py-2"
                    />
                </div>
                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class="w-full px-4 py-2 bg-primary-600 hover:bg-primary-700 text-white rounded-lg disabled:bg-gray-400"
                >
                    {move || if submitting.get() { "Signing in..." } else { "Sign In" }}
                </button>
                <p class="text-sm text-center text-gray-600">
                    "No account yet? "
                    <A href="/register" class="text-primary-600 hover:underline">"Sign up"</A>
                </p>
            </form>
        </div>
    }
}

#[component]
pub fn Register() -> impl IntoView {
    let state = use_global_state();
    let navigate = use_navigate();

    let form = create_rw_signal(RegisterForm::default());
    let (error, set_error) = create_signal(None::<String>);
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let request = match form.with_untracked(|f| f.to_request()) {
            Ok(request) => request,
            Err(e) => {
                set_error.set(Some(e.to_string()));
                return;
            }
        };
        set_error.set(None);
        set_submitting.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            let result = match api::register(&request).await {
                Ok(auth) => state.sign_in(&auth.access_token).await,
                Err(e) => Err(e),
            };
            set_submitting.set(false);
            match result {
                Ok(_) => {
                    state.show_success("Account created");
                    navigate("/", Default::default());
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    view! {
        <div class="max-w-md mx-auto space-y-6">
            <h1 class="text-3xl font-bold text-center">"Create Account"</h1>
            <form on:submit=on_submit class="bg-white rounded-lg shadow p-6 space-y-4">
                {move || error.get().map(|e| view! { <ErrorMessage message=e /> })}
                {register_field(form, "Full name", "text", |f| &f.full_name, |f| &mut f.full_name)}
                {register_field(form, "Email", "email", |f| &f.email, |f| &mut f.email)}
                {register_field(form, "Password", "password", |f| &f.password, |f| &mut f.password)}
                {register_field(form, "Confirm password", "password", |f| &f.confirm_password, |f| &mut f.confirm_password)}
                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class="w-full px-4 py-2 bg-primary-600 hover:bg-primary-700 text-white rounded-lg disabled:bg-gray-400"
                >
                    {move || if submitting.get() { "Creating account..." } else { "Sign Up" }}
                </button>
                <p class="text-sm text-center text-gray-600">
                    "Already have an account? "
                    <A href="/login" class="text-primary-600 hover:underline">"Sign in"</A>
                </p>
            </form>
        </div>
    }
}

fn register_field(
    form: RwSignal<RegisterForm>,
    label: &'static str,
    input_type: &'static str,
    get: fn(&RegisterForm) -> &String,
    set: fn(&mut RegisterForm) -> &mut String,
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
