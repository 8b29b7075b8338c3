//! # Recipe Manager
//!
//! Client side of a recipe-management application: recipes, categories, a
//! weekly meal planner, grocery lists, accounts, sharing and an admin
//! dashboard. The REST backend lives elsewhere.
//!
//! ## Modules
//!
//! - [`models`]: Records exchanged with the backend
//! - [`forms`]: Form state and validation
//! - [`planner`]: Sunday-based weeks and the meal plan grid
//! - [`search`]: Search box debounce and query resolution
//! - [`grocery`]: Recipe selection, check-off list and exports
//! - [`display`]: Star ratings, durations, image and share URLs
//!
//! With the `client` feature (on by default):
//!
//! - [`client`]: `reqwest` client for the REST backend
//! - [`config`]: TOML configuration with environment overrides
//! - [`session`]: Token persistence between runs
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use recipe_manager::{Config, RecipeClient, SearchState};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let client = RecipeClient::new(&config.api)?;
//!
//!     let search = SearchState {
//!         term: "pasta".to_string(),
//!         category_id: None,
//!     };
//!     let recipes = client.find_recipes(&search.query()).await?;
//!     println!("{}", search.summary(recipes.len()));
//!
//!     Ok(())
//! }
//! ```

pub mod display;
pub mod forms;
pub mod grocery;
pub mod models;
pub mod planner;
pub mod search;

#[cfg(feature = "client")]
pub mod client;
#[cfg(feature = "client")]
pub mod config;
#[cfg(feature = "client")]
pub mod error;
#[cfg(feature = "client")]
pub mod session;

// Re-export top-level types for convenience
pub use models::{
    AdminStats, AdminUserUpdate, AuthResponse, Category, CategoryInput, GroceryItem, GroceryList,
    Ingredient, IngredientInput, MealPlan, MealPlanInput, MealPlanUpdate, MealType, Recipe,
    RecipeInput, Token, User,
};

pub use forms::{
    CategoryForm, FormMode, ImageFile, IngredientField, IngredientRow, LoginForm, RecipeForm,
    RegisterForm, ValidationError,
};

pub use planner::{CellAction, Week, WeekGrid};

pub use search::{Debouncer, RecipeQuery, SearchState, SEARCH_DEBOUNCE_MS};

pub use grocery::{Checklist, RecipeSelection};

#[cfg(feature = "client")]
pub use client::{AdminDashboard, MealPlanFilter, RecipeClient};

#[cfg(feature = "client")]
pub use config::{ApiConfig, Config, ConfigError, LoggingConfig, SessionConfig};

#[cfg(feature = "client")]
pub use error::{ClientError, ClientResult};

#[cfg(feature = "client")]
pub use session::{SessionError, SessionStore};
