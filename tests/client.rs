//! Client tests against a mock backend

use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use recipe_manager::{
    ApiConfig, ClientError, MealType, RecipeClient, RecipeSelection, SearchState, ValidationError,
    Week,
};

fn client_for(server: &MockServer) -> RecipeClient {
    let config = ApiConfig {
        url: server.uri(),
        request_timeout_secs: 5,
    };
    RecipeClient::new(&config).unwrap()
}

fn recipe(id: i64, title: &str, category_id: Option<i64>) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "instructions": "Cook it",
        "is_public": false,
        "category_id": category_id,
        "ingredients": [],
        "created_at": "2024-03-01T10:00:00Z"
    })
}

#[tokio::test]
async fn test_detail_message_becomes_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/recipes/42"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Recipe not found"})))
        .mount(&server)
        .await;

    let err = client_for(&server).get_recipe(42).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Recipe not found");
}

#[tokio::test]
async fn test_fallback_message_without_detail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/categories/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let err = client_for(&server).list_categories().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "Failed to fetch categories");
}

#[tokio::test]
async fn test_bearer_token_and_request_id_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("Authorization", "Bearer secret-token"))
        .and(header_exists("X-Request-Id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "email": "cook@example.com",
            "full_name": "Home Cook",
            "is_active": true,
            "is_admin": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).with_token(Some("secret-token".to_string()));
    let user = client.me().await.unwrap();
    assert_eq!(user.display_name(), "Home Cook");
}

#[tokio::test]
async fn test_shared_recipe_never_sends_token() {
    let server = MockServer::start().await;
    // Mounted first, so it wins whenever credentials leak
    Mock::given(method("GET"))
        .and(path("/api/share/abc-123"))
        .and(header_exists("Authorization"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "credentials sent"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/share/abc-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(recipe(3, "Soup", None)))
        .mount(&server)
        .await;

    let client = client_for(&server).with_token(Some("secret-token".to_string()));
    let shared = client.get_shared_recipe("abc-123").await.unwrap();
    assert_eq!(shared.title, "Soup");
}

#[tokio::test]
async fn test_search_filters_category_locally() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/recipes/search"))
        .and(query_param("q", "pasta"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            recipe(1, "Pasta Bake", Some(2)),
            recipe(2, "Pasta Salad", Some(5)),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let state = SearchState {
        term: "  pasta ".to_string(),
        category_id: Some(2),
    };
    let recipes = client_for(&server).find_recipes(&state.query()).await.unwrap();
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0].title, "Pasta Bake");
}

#[tokio::test]
async fn test_empty_search_lists_by_category() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/recipes/"))
        .and(query_param("category_id", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([recipe(2, "Pasta Salad", Some(5))])))
        .expect(1)
        .mount(&server)
        .await;

    let state = SearchState {
        term: "   ".to_string(),
        category_id: Some(5),
    };
    let recipes = client_for(&server).find_recipes(&state.query()).await.unwrap();
    assert_eq!(recipes.len(), 1);
}

#[tokio::test]
async fn test_planner_loads_week_and_recipes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/meal-plans/week"))
        .and(query_param("start_date", "2024-03-03"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 10, "date": "2024-03-05", "meal_type": "dinner", "recipe_id": 1},
            {"id": 11, "date": "2024-03-12", "meal_type": "lunch", "recipe_id": 1}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/recipes/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([recipe(1, "Stew", None)])))
        .mount(&server)
        .await;

    let week = Week::containing(NaiveDate::from_ymd_opt(2024, 3, 6).unwrap());
    let (grid, recipes) = client_for(&server).load_planner(week).await.unwrap();

    assert_eq!(recipes.len(), 1);
    assert_eq!(grid.planned_count(), 1);
    let tuesday = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
    assert_eq!(grid.get(tuesday, MealType::Dinner).map(|p| p.id), Some(10));
}

#[tokio::test]
async fn test_grocery_list_posts_selection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/grocery-list"))
        .and(body_json(json!({"recipe_ids": [3, 1]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"name": "Flour", "amount": "3", "unit": "cups", "recipe_count": 2, "recipes": ["Bread", "Pancakes"]}
            ],
            "total_items": 1,
            "recipe_count": 2,
            "recipe_titles": ["Bread", "Pancakes"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut selection = RecipeSelection::new();
    selection.toggle(3);
    selection.toggle(1);

    let list = client_for(&server)
        .generate_grocery_list(&selection)
        .await
        .unwrap();
    assert_eq!(list.items[0].line(), "3 cups Flour");
}

#[tokio::test]
async fn test_empty_selection_makes_no_request() {
    let server = MockServer::start().await;

    let err = client_for(&server)
        .generate_grocery_list(&RecipeSelection::new())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ClientError::Validation(ValidationError::NoRecipesSelected)
    ));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_share_and_delete() {
    let server = MockServer::start().await;
    let mut shared = recipe(7, "Pie", None);
    shared["is_public"] = json!(true);
    shared["share_token"] = json!("tok-7");

    Mock::given(method("POST"))
        .and(path("/api/recipes/7/share"))
        .respond_with(ResponseTemplate::new(200).set_body_json(shared))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/recipes/7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let recipe = client.share_recipe(7).await.unwrap();
    assert_eq!(recipe.active_share_token(), Some("tok-7"));

    client.delete_recipe(7).await.unwrap();
}

#[tokio::test]
async fn test_admin_reset_password_validates_first() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/users/4/reset-password"))
        .and(body_json(json!({"new_password": "longenough"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Password reset"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.admin_reset_password(4, "short").await.unwrap_err();
    assert_eq!(err.to_string(), "Password must be at least 8 characters");

    client.admin_reset_password(4, "longenough").await.unwrap();
}

#[tokio::test]
async fn test_admin_dashboard_requests_first_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_users": 2, "active_users": 2, "admin_users": 1,
            "total_recipes": 5, "public_recipes": 1,
            "total_meal_plans": 3, "total_categories": 4
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/users"))
        .and(query_param("skip", "0"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "email": "admin@example.com", "is_active": true, "is_admin": true}
        ])))
        .mount(&server)
        .await;

    let dashboard = client_for(&server).admin_dashboard().await.unwrap();
    assert_eq!(dashboard.stats.total_recipes, 5);
    assert_eq!(dashboard.users.len(), 1);
}

#[tokio::test]
async fn test_connection_refused_is_unavailable() {
    let config = ApiConfig {
        url: "http://127.0.0.1:9".to_string(),
        request_timeout_secs: 5,
    };
    let err = RecipeClient::new(&config).unwrap().health().await.unwrap_err();
    assert!(matches!(err, ClientError::Unavailable(_)));
}
