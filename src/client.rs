//! Recipe REST API Client
//!
//! Thin `reqwest` wrapper over the recipe backend. Each method issues one
//! request, except the `load_*` helpers which fetch independent resources
//! concurrently.

use chrono::NaiveDate;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;
use uuid::Uuid;

use crate::config::ApiConfig;
use crate::error::{ClientError, ClientResult};
use crate::forms::{check_image_file, validate_new_password};
use crate::grocery::RecipeSelection;
use crate::models::*;
use crate::planner::{Week, WeekGrid};
use crate::search::RecipeQuery;

/// Header carrying the per-request correlation id
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Page size the admin user table asks for
pub const ADMIN_USERS_PAGE: u32 = 50;

/// Optional filters of the meal plan listing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MealPlanFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub meal_type: Option<MealType>,
}

impl MealPlanFilter {
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(start) = self.start_date {
            params.push(("start_date", start.to_string()));
        }
        if let Some(end) = self.end_date {
            params.push(("end_date", end.to_string()));
        }
        if let Some(meal_type) = self.meal_type {
            params.push(("meal_type", meal_type.to_string()));
        }
        params
    }
}

/// Everything the admin dashboard shows on load
#[derive(Debug, Clone, PartialEq)]
pub struct AdminDashboard {
    pub stats: AdminStats,
    pub users: Vec<User>,
}

/// Recipe backend client
#[derive(Debug, Clone)]
pub struct RecipeClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl RecipeClient {
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request, turning transport failures and non-2xx responses
    /// into [`ClientError`]
    async fn send(&self, builder: RequestBuilder, fallback: &str) -> ClientResult<Response> {
        let request_id = Uuid::new_v4();

        let response = builder
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(request_id = %request_id, error = %e, "{}", fallback);
                if e.is_timeout() {
                    ClientError::Timeout
                } else if e.is_connect() {
                    ClientError::Unavailable(self.base_url.clone())
                } else {
                    ClientError::Request(e)
                }
            })?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(request_id = %request_id, status = status.as_u16(), url = %response.url(), "Request succeeded");
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = detail_message(&body).unwrap_or_else(|| fallback.to_string());
        tracing::warn!(
            request_id = %request_id,
            status = status.as_u16(),
            "{}",
            message
        );
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn call<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        fallback: &str,
    ) -> ClientResult<T> {
        let response = self.send(builder, fallback).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// For endpoints answering 204 or an acknowledgement nobody reads
    async fn call_empty(&self, builder: RequestBuilder, fallback: &str) -> ClientResult<()> {
        self.send(builder, fallback).await?;
        Ok(())
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, fallback: &str) -> ClientResult<T> {
        self.call(self.request(Method::GET, path), fallback).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> ClientResult<T> {
        self.call(self.request(Method::POST, path).json(body), fallback)
            .await
    }

    async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> ClientResult<T> {
        self.call(self.request(Method::PUT, path).json(body), fallback)
            .await
    }

    async fn delete(&self, path: &str, fallback: &str) -> ClientResult<()> {
        self.call_empty(self.request(Method::DELETE, path), fallback)
            .await
    }

    // ============================================
    // Health
    // ============================================

    pub async fn health(&self) -> ClientResult<HealthStatus> {
        self.get("/health", "Health check failed").await
    }

    // ============================================
    // Recipes
    // ============================================

    pub async fn list_recipes(
        &self,
        category_id: Option<i64>,
        skip: Option<u32>,
        limit: Option<u32>,
    ) -> ClientResult<Vec<Recipe>> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(id) = category_id {
            params.push(("category_id", id.to_string()));
        }
        if let Some(skip) = skip {
            params.push(("skip", skip.to_string()));
        }
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }
        let builder = self.request(Method::GET, "/api/recipes/").query(&params);
        self.call(builder, "Failed to fetch recipes").await
    }

    pub async fn search_recipes(&self, term: &str) -> ClientResult<Vec<Recipe>> {
        let builder = self
            .request(Method::GET, "/api/recipes/search")
            .query(&[("q", term)]);
        self.call(builder, "Failed to search recipes").await
    }

    /// Run a search-box query against the matching endpoint
    pub async fn find_recipes(&self, query: &RecipeQuery) -> ClientResult<Vec<Recipe>> {
        let recipes = match query {
            RecipeQuery::List { category_id } => {
                self.list_recipes(*category_id, None, None).await?
            }
            RecipeQuery::Search { term, .. } => self.search_recipes(term).await?,
        };
        Ok(query.filter_results(recipes))
    }

    pub async fn get_recipe(&self, id: i64) -> ClientResult<Recipe> {
        self.get(&format!("/api/recipes/{}", id), "Failed to fetch recipe")
            .await
    }

    /// Recipe plus the category list, as the edit form needs both
    pub async fn load_recipe_with_categories(
        &self,
        id: i64,
    ) -> ClientResult<(Recipe, Vec<Category>)> {
        tokio::try_join!(self.get_recipe(id), self.list_categories())
    }

    pub async fn create_recipe(&self, input: &RecipeInput) -> ClientResult<Recipe> {
        let recipe: Recipe = self
            .post("/api/recipes/", input, "Failed to create recipe")
            .await?;
        tracing::info!(recipe_id = recipe.id, title = %recipe.title, "Created recipe");
        Ok(recipe)
    }

    pub async fn update_recipe(&self, id: i64, input: &RecipeInput) -> ClientResult<Recipe> {
        self.put(
            &format!("/api/recipes/{}", id),
            input,
            "Failed to update recipe",
        )
        .await
    }

    pub async fn delete_recipe(&self, id: i64) -> ClientResult<()> {
        self.delete(&format!("/api/recipes/{}", id), "Failed to delete recipe")
            .await?;
        tracing::info!(recipe_id = id, "Deleted recipe");
        Ok(())
    }

    /// Make a recipe public; the response carries its share token
    pub async fn share_recipe(&self, id: i64) -> ClientResult<Recipe> {
        let builder = self.request(Method::POST, &format!("/api/recipes/{}/share", id));
        self.call(builder, "Failed to share recipe").await
    }

    pub async fn unshare_recipe(&self, id: i64) -> ClientResult<Recipe> {
        let builder = self.request(Method::POST, &format!("/api/recipes/{}/unshare", id));
        self.call(builder, "Failed to unshare recipe").await
    }

    /// Upload an image for a saved recipe
    pub async fn upload_image(
        &self,
        id: i64,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> ClientResult<Recipe> {
        check_image_file(file_name, bytes.len() as u64)?;

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(image_mime(file_name))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let builder = self
            .request(Method::POST, &format!("/api/recipes/{}/upload-image", id))
            .multipart(form);
        self.call(builder, "Failed to upload image").await
    }

    pub async fn upload_image_file(&self, id: i64, path: &Path) -> ClientResult<Recipe> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let metadata = tokio::fs::metadata(path).await?;
        check_image_file(&file_name, metadata.len())?;

        let bytes = tokio::fs::read(path).await?;
        self.upload_image(id, &file_name, bytes).await
    }

    /// Public recipe by share token; never sends credentials
    pub async fn get_shared_recipe(&self, token: &str) -> ClientResult<Recipe> {
        let builder = self.http.get(self.url(&format!("/api/share/{}", token)));
        self.call(builder, "Recipe not found or not shared").await
    }

    // ============================================
    // Categories
    // ============================================

    pub async fn list_categories(&self) -> ClientResult<Vec<Category>> {
        self.get("/api/categories/", "Failed to fetch categories")
            .await
    }

    pub async fn get_category(&self, id: i64) -> ClientResult<Category> {
        self.get(&format!("/api/categories/{}", id), "Failed to fetch category")
            .await
    }

    pub async fn create_category(&self, input: &CategoryInput) -> ClientResult<Category> {
        self.post("/api/categories/", input, "Failed to create category")
            .await
    }

    pub async fn update_category(&self, id: i64, input: &CategoryInput) -> ClientResult<Category> {
        self.put(
            &format!("/api/categories/{}", id),
            input,
            "Failed to update category",
        )
        .await
    }

    pub async fn delete_category(&self, id: i64) -> ClientResult<()> {
        self.delete(
            &format!("/api/categories/{}", id),
            "Failed to delete category",
        )
        .await
    }

    // ============================================
    // Meal plans
    // ============================================

    pub async fn list_meal_plans(&self, filter: &MealPlanFilter) -> ClientResult<Vec<MealPlan>> {
        let builder = self
            .request(Method::GET, "/api/meal-plans")
            .query(&filter.params());
        self.call(builder, "Failed to fetch meal plans").await
    }

    pub async fn get_week(&self, start_date: NaiveDate) -> ClientResult<Vec<MealPlan>> {
        let builder = self
            .request(Method::GET, "/api/meal-plans/week")
            .query(&[("start_date", start_date.to_string())]);
        self.call(builder, "Failed to fetch meal plans").await
    }

    /// Week grid plus the recipes offered in the add dialog
    pub async fn load_planner(&self, week: Week) -> ClientResult<(WeekGrid, Vec<Recipe>)> {
        let (plans, recipes) =
            tokio::try_join!(self.get_week(week.start()), self.list_recipes(None, None, None))?;
        Ok((WeekGrid::build(week, &plans), recipes))
    }

    pub async fn get_meal_plan(&self, id: i64) -> ClientResult<MealPlan> {
        self.get(&format!("/api/meal-plans/{}", id), "Failed to fetch meal plan")
            .await
    }

    pub async fn create_meal_plan(&self, input: &MealPlanInput) -> ClientResult<MealPlan> {
        self.post("/api/meal-plans", input, "Failed to create meal plan")
            .await
    }

    pub async fn update_meal_plan(&self, id: i64, update: &MealPlanUpdate) -> ClientResult<MealPlan> {
        self.put(
            &format!("/api/meal-plans/{}", id),
            update,
            "Failed to update meal plan",
        )
        .await
    }

    pub async fn delete_meal_plan(&self, id: i64) -> ClientResult<()> {
        self.delete(
            &format!("/api/meal-plans/{}", id),
            "Failed to delete meal plan",
        )
        .await
    }

    // ============================================
    // Grocery list
    // ============================================

    pub async fn generate_grocery_list(
        &self,
        selection: &RecipeSelection,
    ) -> ClientResult<GroceryList> {
        let request = selection.to_request()?;
        self.post(
            "/api/grocery-list",
            &request,
            "Failed to generate grocery list",
        )
        .await
    }

    // ============================================
    // Auth
    // ============================================

    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<AuthResponse> {
        self.post("/api/auth/register", request, "Registration failed")
            .await
    }

    pub async fn login(&self, request: &LoginRequest) -> ClientResult<Token> {
        let token: Token = self.post("/api/auth/login", request, "Login failed").await?;
        tracing::info!(email = %request.email, "Logged in");
        Ok(token)
    }

    pub async fn me(&self) -> ClientResult<User> {
        self.get("/api/auth/me", "Failed to fetch current user")
            .await
    }

    pub async fn change_password(&self, change: &PasswordChange) -> ClientResult<String> {
        validate_new_password(&change.new_password)?;
        let response: MessageResponse = self
            .post(
                "/api/auth/change-password",
                change,
                "Failed to change password",
            )
            .await?;
        Ok(response.message)
    }

    // ============================================
    // Admin
    // ============================================

    pub async fn admin_stats(&self) -> ClientResult<AdminStats> {
        self.get("/api/admin/stats", "Failed to fetch statistics")
            .await
    }

    pub async fn admin_users(&self, skip: u32, limit: u32) -> ClientResult<Vec<User>> {
        let builder = self
            .request(Method::GET, "/api/admin/users")
            .query(&[("skip", skip), ("limit", limit)]);
        self.call(builder, "Failed to fetch users").await
    }

    pub async fn admin_dashboard(&self) -> ClientResult<AdminDashboard> {
        let (stats, users) =
            tokio::try_join!(self.admin_stats(), self.admin_users(0, ADMIN_USERS_PAGE))?;
        Ok(AdminDashboard { stats, users })
    }

    pub async fn admin_update_user(&self, id: i64, update: &AdminUserUpdate) -> ClientResult<User> {
        self.put(
            &format!("/api/admin/users/{}", id),
            update,
            "Failed to update user",
        )
        .await
    }

    pub async fn admin_toggle_active(&self, user: &User) -> ClientResult<User> {
        let update = AdminUserUpdate {
            is_active: Some(!user.is_active),
            ..Default::default()
        };
        self.admin_update_user(user.id, &update).await
    }

    pub async fn admin_toggle_admin(&self, user: &User) -> ClientResult<User> {
        let update = AdminUserUpdate {
            is_admin: Some(!user.is_admin),
            ..Default::default()
        };
        self.admin_update_user(user.id, &update).await
    }

    pub async fn admin_reset_password(&self, id: i64, new_password: &str) -> ClientResult<()> {
        validate_new_password(new_password)?;
        let body = PasswordReset {
            new_password: new_password.to_string(),
        };
        let builder = self
            .request(
                Method::POST,
                &format!("/api/admin/users/{}/reset-password", id),
            )
            .json(&body);
        self.call_empty(builder, "Failed to reset password").await
    }

    pub async fn admin_delete_user(&self, id: i64) -> ClientResult<()> {
        self.delete(&format!("/api/admin/users/{}", id), "Failed to delete user")
            .await
    }

    pub async fn admin_recipes(&self) -> ClientResult<Vec<Recipe>> {
        self.get("/api/admin/recipes", "Failed to fetch recipes")
            .await
    }

    pub async fn admin_delete_recipe(&self, id: i64) -> ClientResult<()> {
        self.delete(
            &format!("/api/admin/recipes/{}", id),
            "Failed to delete recipe",
        )
        .await
    }

    pub async fn admin_meal_plans(&self) -> ClientResult<Vec<MealPlan>> {
        self.get("/api/admin/meal-plans", "Failed to fetch meal plans")
            .await
    }

    pub async fn admin_delete_meal_plan(&self, id: i64) -> ClientResult<()> {
        self.delete(
            &format!("/api/admin/meal-plans/{}", id),
            "Failed to delete meal plan",
        )
        .await
    }
}

fn image_mime(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        let config = ApiConfig {
            url: "http://localhost:8000/".to_string(),
            request_timeout_secs: 5,
        };
        let client = RecipeClient::new(&config).unwrap();
        assert_eq!(client.url("/health"), "http://localhost:8000/health");
        assert_eq!(client.token(), None);
    }

    #[test]
    fn test_meal_plan_filter_params() {
        let filter = MealPlanFilter {
            start_date: NaiveDate::from_ymd_opt(2024, 3, 3),
            end_date: None,
            meal_type: Some(MealType::Dinner),
        };
        assert_eq!(
            filter.params(),
            vec![
                ("start_date", "2024-03-03".to_string()),
                ("meal_type", "dinner".to_string())
            ]
        );
    }

    #[test]
    fn test_image_mime() {
        assert_eq!(image_mime("photo.PNG"), "image/png");
        assert_eq!(image_mime("photo.jpeg"), "image/jpeg");
    }
}
