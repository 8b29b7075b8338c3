//! Pages
//!
//! Top-level page components for each route.

pub mod admin;
pub mod auth;
pub mod categories;
pub mod grocery_list;
pub mod home;
pub mod meal_plans;
pub mod recipe_detail;
pub mod recipe_form;
pub mod shared_recipe;

pub use admin::Admin;
pub use auth::{Login, Register};
pub use categories::{Categories, CategoryEdit};
pub use grocery_list::GroceryList;
pub use home::Home;
pub use meal_plans::MealPlans;
pub use recipe_detail::RecipeDetail;
pub use recipe_form::{EditRecipe, NewRecipe};
pub use shared_recipe::SharedRecipe;
