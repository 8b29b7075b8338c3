//! UI Components
//!
//! Reusable Leptos components shared by the pages.

pub mod loading;
pub mod nav;
pub mod recipe_image;
pub mod share_modal;
pub mod star_rating;
pub mod toast;

pub use loading::{ErrorMessage, InlineLoading, Loading};
pub use nav::Nav;
pub use recipe_image::RecipeImage;
pub use share_modal::ShareModal;
pub use star_rating::StarRating;
pub use toast::Toast;
