//! Global Application State
//!
//! Session and notifications, shared through Leptos context.

use leptos::*;
use leptos_router::use_navigate;

use recipe_manager::models::User;

use crate::api;

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Signed-in account, `None` when anonymous
    pub user: RwSignal<Option<User>>,
    /// True until the stored token has been checked
    pub auth_loading: RwSignal<bool>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        user: create_rw_signal(None),
        auth_loading: create_rw_signal(true),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
    state.restore_session();
}

/// Global state from context
pub fn use_global_state() -> GlobalState {
    expect_context::<GlobalState>()
}

/// Send anonymous visitors to the login page once the session check is done
pub fn require_sign_in(state: GlobalState) {
    let navigate = use_navigate();
    create_effect(move |_| {
        if !state.auth_loading.get() && !state.is_authenticated() {
            navigate("/login", Default::default());
        }
    });
}

/// What start-up does with the stored token
#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionRestore {
    /// Nothing stored, so the visitor is anonymous straight away
    Anonymous,
    /// Ask the backend who the token belongs to
    Verify(String),
}

impl SessionRestore {
    fn from_stored(token: Option<String>) -> Self {
        match token {
            Some(t) if !t.trim().is_empty() => SessionRestore::Verify(t),
            _ => SessionRestore::Anonymous,
        }
    }
}

/// Result of checking a token against the current-user endpoint
#[derive(Debug, Clone, PartialEq)]
enum SessionCheck {
    SignedIn(User),
    /// The token is no good and is forgotten
    Rejected(String),
}

impl From<Result<User, String>> for SessionCheck {
    fn from(result: Result<User, String>) -> Self {
        match result {
            Ok(user) => SessionCheck::SignedIn(user),
            Err(e) => SessionCheck::Rejected(e),
        }
    }
}

impl GlobalState {
    /// Resolve the stored token into an account; a rejected token is dropped
    fn restore_session(&self) {
        let state = *self;
        if SessionRestore::from_stored(api::get_token()) == SessionRestore::Anonymous {
            state.auth_loading.set(false);
            return;
        }
        spawn_local(async move {
            if let Err(e) = state.apply_check(api::fetch_me().await.into()) {
                logging::warn!("Stored session rejected: {}", e);
            }
            state.auth_loading.set(false);
        });
    }

    /// Keep the account or forget the token
    fn apply_check(&self, check: SessionCheck) -> Result<User, String> {
        match check {
            SessionCheck::SignedIn(user) => {
                self.user.set(Some(user.clone()));
                Ok(user)
            }
            SessionCheck::Rejected(e) => {
                api::clear_token();
                self.user.set(None);
                Err(e)
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.with(|u| u.is_some())
    }

    pub fn is_admin(&self) -> bool {
        self.user.with(|u| u.as_ref().map(|u| u.is_admin).unwrap_or(false))
    }

    /// Keep the token and fetch the account it belongs to
    pub async fn sign_in(&self, token: &str) -> Result<User, String> {
        api::set_token(token);
        self.apply_check(api::fetch_me().await.into())
    }

    pub fn logout(&self) {
        api::clear_token();
        self.user.set(None);
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cook() -> User {
        User {
            id: 3,
            email: "cook@example.com".to_string(),
            full_name: Some("Home Cook".to_string()),
            is_active: true,
            is_admin: false,
            created_at: None,
        }
    }

    #[test]
    fn test_restore_without_token() {
        assert_eq!(SessionRestore::from_stored(None), SessionRestore::Anonymous);
        assert_eq!(SessionRestore::from_stored(Some(String::new())), SessionRestore::Anonymous);
        assert_eq!(SessionRestore::from_stored(Some("  ".to_string())), SessionRestore::Anonymous);
    }

    #[test]
    fn test_restore_verifies_stored_token() {
        assert_eq!(
            SessionRestore::from_stored(Some("abc.def".to_string())),
            SessionRestore::Verify("abc.def".to_string())
        );
    }

    #[test]
    fn test_session_check_from_response() {
        assert_eq!(SessionCheck::from(Ok(cook())), SessionCheck::SignedIn(cook()));
        assert_eq!(
            SessionCheck::from(Err("Could not validate credentials".to_string())),
            SessionCheck::Rejected("Could not validate credentials".to_string())
        );
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn state() -> GlobalState {
        GlobalState {
            user: create_rw_signal(None),
            auth_loading: create_rw_signal(false),
            error: create_rw_signal(None),
            success: create_rw_signal(None),
        }
    }

    #[wasm_bindgen_test]
    fn rejected_token_is_cleared() {
        let runtime = create_runtime();
        let state = state();
        api::set_token("expired");

        let result = state.apply_check(SessionCheck::Rejected("Not authenticated".to_string()));

        assert_eq!(result, Err("Not authenticated".to_string()));
        assert_eq!(api::get_token(), None);
        assert!(!state.is_authenticated());
        runtime.dispose();
    }

    #[wasm_bindgen_test]
    fn accepted_token_is_kept() {
        let runtime = create_runtime();
        let state = state();
        api::set_token("fresh");
        let user = admin_user();

        let result = state.apply_check(SessionCheck::SignedIn(user.clone()));

        assert_eq!(result, Ok(user));
        assert_eq!(api::get_token().as_deref(), Some("fresh"));
        assert!(state.is_authenticated());

        state.logout();
        assert_eq!(api::get_token(), None);
        assert!(!state.is_authenticated());
        runtime.dispose();
    }

    fn admin_user() -> User {
        User {
            id: 1,
            email: "admin@example.com".to_string(),
            full_name: None,
            is_active: true,
            is_admin: true,
            created_at: None,
        }
    }
}
