//! HTTP API Client
//!
//! Functions for communicating with the recipe REST API. Failures come back
//! as display-ready strings.

use chrono::NaiveDate;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use recipe_manager::models::*;
use recipe_manager::search::RecipeQuery;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

const API_URL_KEY: &str = "recipe_api_url";
const TOKEN_KEY: &str = "recipe_token";

fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    resolve_api_base(storage().and_then(|s| s.get_item(API_URL_KEY).ok().flatten()))
}

/// Base URL without a trailing slash; blank falls back to the default
fn resolve_api_base(stored: Option<String>) -> String {
    let url = stored
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    url.trim_end_matches('/').to_string()
}

/// Stored session token
pub fn get_token() -> Option<String> {
    usable_token(storage().and_then(|s| s.get_item(TOKEN_KEY).ok().flatten()))
}

fn usable_token(stored: Option<String>) -> Option<String> {
    stored.filter(|t| !t.trim().is_empty())
}

pub fn set_token(token: &str) {
    if let Some(storage) = storage() {
        let _ = storage.set_item(TOKEN_KEY, token);
    }
}

pub fn clear_token() {
    if let Some(storage) = storage() {
        let _ = storage.remove_item(TOKEN_KEY);
    }
}

fn url(path: &str) -> String {
    format!("{}{}", get_api_base(), path)
}

fn authorized(builder: RequestBuilder) -> RequestBuilder {
    match get_token() {
        Some(token) => builder.header("Authorization", &bearer(&token)),
        None => builder,
    }
}

fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Turn a non-2xx response into its `detail` message or the fallback
async fn check(response: Response, fallback: &str) -> Result<Response, String> {
    if response.ok() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(detail_message(&body).unwrap_or_else(|| fallback.to_string()))
}

async fn send_request(request: Request, fallback: &str) -> Result<Response, String> {
    let response = request
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;
    check(response, fallback).await
}

async fn send_builder(builder: RequestBuilder, fallback: &str) -> Result<Response, String> {
    let response = builder
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;
    check(response, fallback).await
}

async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

async fn get_json<T: DeserializeOwned>(path: &str, fallback: &str) -> Result<T, String> {
    let response = send_builder(authorized(Request::get(&url(path))), fallback).await?;
    parse(response).await
}

async fn send_json<B: Serialize, T: DeserializeOwned>(
    builder: RequestBuilder,
    body: &B,
    fallback: &str,
) -> Result<T, String> {
    let request = authorized(builder)
        .json(body)
        .map_err(|e| format!("Serialize error: {}", e))?;
    let response = send_request(request, fallback).await?;
    parse(response).await
}

async fn post_json<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
    fallback: &str,
) -> Result<T, String> {
    send_json(Request::post(&url(path)), body, fallback).await
}

async fn put_json<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
    fallback: &str,
) -> Result<T, String> {
    send_json(Request::put(&url(path)), body, fallback).await
}

async fn post_empty<T: DeserializeOwned>(path: &str, fallback: &str) -> Result<T, String> {
    let response = send_builder(authorized(Request::post(&url(path))), fallback).await?;
    parse(response).await
}

async fn delete(path: &str, fallback: &str) -> Result<(), String> {
    send_builder(authorized(Request::delete(&url(path))), fallback).await?;
    Ok(())
}

// ============ Recipes ============

pub async fn fetch_recipes(category_id: Option<i64>) -> Result<Vec<Recipe>, String> {
    let path = match category_id {
        Some(id) => format!("/api/recipes/?category_id={}", id),
        None => "/api/recipes/".to_string(),
    };
    get_json(&path, "Failed to fetch recipes").await
}

pub async fn search_recipes(term: &str) -> Result<Vec<Recipe>, String> {
    let builder = authorized(Request::get(&url("/api/recipes/search")).query([("q", term)]));
    let response = send_builder(builder, "Failed to search recipes").await?;
    parse(response).await
}

/// Resolve the home page's search state against the backend
pub async fn find_recipes(query: &RecipeQuery) -> Result<Vec<Recipe>, String> {
    let recipes = match query {
        RecipeQuery::List { category_id } => fetch_recipes(*category_id).await?,
        RecipeQuery::Search { term, .. } => search_recipes(term).await?,
    };
    Ok(query.filter_results(recipes))
}

pub async fn fetch_recipe(id: i64) -> Result<Recipe, String> {
    get_json(&format!("/api/recipes/{}", id), "Failed to fetch recipe").await
}

pub async fn create_recipe(input: &RecipeInput) -> Result<Recipe, String> {
    post_json("/api/recipes/", input, "Failed to create recipe").await
}

pub async fn update_recipe(id: i64, input: &RecipeInput) -> Result<Recipe, String> {
    put_json(&format!("/api/recipes/{}", id), input, "Failed to update recipe").await
}

pub async fn delete_recipe(id: i64) -> Result<(), String> {
    delete(&format!("/api/recipes/{}", id), "Failed to delete recipe").await
}

pub async fn share_recipe(id: i64) -> Result<Recipe, String> {
    post_empty(&format!("/api/recipes/{}/share", id), "Failed to share recipe").await
}

pub async fn unshare_recipe(id: i64) -> Result<Recipe, String> {
    post_empty(&format!("/api/recipes/{}/unshare", id), "Failed to unshare recipe").await
}

/// Multipart upload of the picked file under the `file` field
pub async fn upload_image(id: i64, file: &web_sys::File) -> Result<Recipe, String> {
    let form = web_sys::FormData::new().map_err(|_| "Failed to prepare upload".to_string())?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(|_| "Failed to prepare upload".to_string())?;

    let request = authorized(Request::post(&url(&format!("/api/recipes/{}/upload-image", id))))
        .body(form)
        .map_err(|e| format!("Failed to prepare upload: {}", e))?;
    let response = send_request(request, "Failed to upload image").await?;
    parse(response).await
}

/// Public recipe by share token, sent without credentials
pub async fn fetch_shared_recipe(token: &str) -> Result<Recipe, String> {
    let response = send_builder(
        Request::get(&url(&format!("/api/share/{}", token))),
        "Recipe not found or not shared",
    )
    .await?;
    parse(response).await
}

// ============ Categories ============

pub async fn fetch_categories() -> Result<Vec<Category>, String> {
    get_json("/api/categories/", "Failed to fetch categories").await
}

pub async fn fetch_category(id: i64) -> Result<Category, String> {
    get_json(&format!("/api/categories/{}", id), "Failed to fetch category").await
}

pub async fn create_category(input: &CategoryInput) -> Result<Category, String> {
    post_json("/api/categories/", input, "Failed to create category").await
}

pub async fn update_category(id: i64, input: &CategoryInput) -> Result<Category, String> {
    put_json(&format!("/api/categories/{}", id), input, "Failed to update category").await
}

pub async fn delete_category(id: i64) -> Result<(), String> {
    delete(&format!("/api/categories/{}", id), "Failed to delete category").await
}

// ============ Meal plans ============

pub async fn fetch_week(start_date: NaiveDate) -> Result<Vec<MealPlan>, String> {
    get_json(
        &format!("/api/meal-plans/week?start_date={}", start_date),
        "Failed to fetch meal plans",
    )
    .await
}

pub async fn create_meal_plan(input: &MealPlanInput) -> Result<MealPlan, String> {
    post_json("/api/meal-plans", input, "Failed to create meal plan").await
}

pub async fn update_meal_plan(id: i64, update: &MealPlanUpdate) -> Result<MealPlan, String> {
    put_json(&format!("/api/meal-plans/{}", id), update, "Failed to update meal plan").await
}

pub async fn delete_meal_plan(id: i64) -> Result<(), String> {
    delete(&format!("/api/meal-plans/{}", id), "Failed to delete meal plan").await
}

// ============ Grocery list ============

pub async fn generate_grocery_list(request: &GroceryListRequest) -> Result<GroceryList, String> {
    post_json("/api/grocery-list", request, "Failed to generate grocery list").await
}

// ============ Auth ============

pub async fn login(request: &LoginRequest) -> Result<Token, String> {
    post_json("/api/auth/login", request, "Login failed").await
}

pub async fn register(request: &RegisterRequest) -> Result<AuthResponse, String> {
    post_json("/api/auth/register", request, "Registration failed").await
}

pub async fn fetch_me() -> Result<User, String> {
    get_json("/api/auth/me", "Failed to fetch current user").await
}

// ============ Admin ============

pub async fn fetch_admin_stats() -> Result<AdminStats, String> {
    get_json("/api/admin/stats", "Failed to fetch statistics").await
}

pub async fn fetch_admin_users() -> Result<Vec<User>, String> {
    get_json("/api/admin/users?skip=0&limit=50", "Failed to fetch users").await
}

pub async fn update_user(id: i64, update: &AdminUserUpdate) -> Result<User, String> {
    put_json(&format!("/api/admin/users/{}", id), update, "Failed to update user").await
}

pub async fn reset_user_password(id: i64, new_password: &str) -> Result<(), String> {
    let body = PasswordReset {
        new_password: new_password.to_string(),
    };
    let request = authorized(Request::post(&url(&format!(
        "/api/admin/users/{}/reset-password",
        id
    ))))
    .json(&body)
    .map_err(|e| format!("Serialize error: {}", e))?;
    send_request(request, "Failed to reset password").await?;
    Ok(())
}

pub async fn delete_user(id: i64) -> Result<(), String> {
    delete(&format!("/api/admin/users/{}", id), "Failed to delete user").await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_base_default() {
        assert_eq!(resolve_api_base(None), "http://localhost:8000");
        assert_eq!(resolve_api_base(Some("  ".to_string())), "http://localhost:8000");
    }

    #[test]
    fn test_api_base_trailing_slash() {
        assert_eq!(
            resolve_api_base(Some("https://recipes.example.com/".to_string())),
            "https://recipes.example.com"
        );
        assert_eq!(
            resolve_api_base(Some(" http://10.0.0.2:9000// ".to_string())),
            "http://10.0.0.2:9000"
        );
    }

    #[test]
    fn test_blank_token_is_signed_out() {
        assert_eq!(usable_token(None), None);
        assert_eq!(usable_token(Some(String::new())), None);
        assert_eq!(usable_token(Some(" ".to_string())), None);
        assert_eq!(usable_token(Some("abc.def".to_string())).as_deref(), Some("abc.def"));
    }

    #[test]
    fn test_bearer_header() {
        assert_eq!(bearer("abc.def"), "Bearer abc.def");
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn token_survives_in_local_storage_until_cleared() {
        set_token("session-token");
        assert_eq!(get_token().as_deref(), Some("session-token"));

        clear_token();
        assert_eq!(get_token(), None);
    }

    #[wasm_bindgen_test]
    fn stored_api_url_is_normalized() {
        let Some(storage) = storage() else {
            return;
        };
        storage.set_item(API_URL_KEY, "http://api.test/").unwrap();
        assert_eq!(get_api_base(), "http://api.test");
        assert_eq!(url("/recipes/"), "http://api.test/recipes/");

        storage.remove_item(API_URL_KEY).unwrap();
        assert_eq!(get_api_base(), DEFAULT_API_BASE);
    }
}
