//! Domain Records
//!
//! Plain records mirroring the backend's JSON resources. The backend owns
//! every entity; these are request-scoped copies.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================
// Recipes
// ============================================

/// Ingredient line of a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<i64>,
    pub name: String,
    /// Free-text amount ("2", "1/2", "2-3")
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
}

/// Ingredient payload for create/update requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl From<&Ingredient> for IngredientInput {
    fn from(ingredient: &Ingredient) -> Self {
        Self {
            name: ingredient.name.clone(),
            amount: ingredient.amount.clone(),
            unit: ingredient.unit.clone(),
        }
    }
}

/// Recipe category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Category payload for create/update requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A recipe as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub instructions: String,
    /// Minutes
    #[serde(default)]
    pub prep_time: Option<u32>,
    /// Minutes
    #[serde(default)]
    pub cook_time: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
    /// Per serving
    #[serde(default)]
    pub calories: Option<u32>,
    /// Grams per serving
    #[serde(default)]
    pub protein: Option<f64>,
    #[serde(default)]
    pub carbohydrates: Option<f64>,
    #[serde(default)]
    pub fat: Option<f64>,
    /// 0-5 stars
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub share_token: Option<String>,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Recipe {
    /// Prep plus cook time, missing values count as zero
    pub fn total_time(&self) -> u32 {
        self.prep_time.unwrap_or(0) + self.cook_time.unwrap_or(0)
    }

    /// Whether any nutrition fact is present
    pub fn has_nutrition(&self) -> bool {
        self.calories.is_some()
            || self.protein.is_some()
            || self.carbohydrates.is_some()
            || self.fat.is_some()
    }

    /// Share token, only when the recipe is public
    pub fn active_share_token(&self) -> Option<&str> {
        if self.is_public {
            self.share_token.as_deref()
        } else {
            None
        }
    }
}

/// Recipe payload for create/update requests
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeInput {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cook_time: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbohydrates: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    pub ingredients: Vec<IngredientInput>,
}

// ============================================
// Meal planning
// ============================================

/// Meal slot within a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    /// Display order of the planner rows
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
            MealType::Snack => "Snack",
        }
    }

    /// Row index in the planner grid
    pub fn index(&self) -> usize {
        match self {
            MealType::Breakfast => 0,
            MealType::Lunch => 1,
            MealType::Dinner => 2,
            MealType::Snack => 3,
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown meal type name
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Invalid meal type '{0}'. Must be one of: breakfast, lunch, dinner, snack")]
pub struct ParseMealTypeError(pub String);

impl FromStr for MealType {
    type Err = ParseMealTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "snack" => Ok(MealType::Snack),
            _ => Err(ParseMealTypeError(s.to_string())),
        }
    }
}

/// Assignment of a recipe to a date and meal slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlan {
    pub id: i64,
    pub date: NaiveDate,
    pub meal_type: MealType,
    pub recipe_id: i64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub recipe: Option<Recipe>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl MealPlan {
    /// Recipe title if the backend embedded the recipe
    pub fn recipe_title(&self) -> Option<&str> {
        self.recipe.as_ref().map(|r| r.title.as_str())
    }
}

/// Meal plan creation payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlanInput {
    pub date: NaiveDate,
    pub meal_type: MealType,
    pub recipe_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Partial meal plan update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealPlanUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<MealType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// ============================================
// Grocery list
// ============================================

/// Backend-aggregated ingredient line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroceryItem {
    pub name: String,
    pub amount: String,
    #[serde(default)]
    pub unit: String,
    pub recipe_count: u32,
    #[serde(default)]
    pub recipes: Vec<String>,
}

impl GroceryItem {
    /// "2 cups Flour", skipping empty parts
    pub fn line(&self) -> String {
        crate::display::ingredient_line(&self.name, Some(&self.amount), Some(&self.unit))
    }
}

/// Grocery list generated from a set of recipes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroceryList {
    pub items: Vec<GroceryItem>,
    pub total_items: usize,
    pub recipe_count: usize,
    #[serde(default)]
    pub recipe_titles: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroceryListRequest {
    pub recipe_ids: Vec<i64>,
}

// ============================================
// Users and auth
// ============================================

/// Account as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

impl User {
    /// Full name when present, email otherwise
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.email)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// Bearer token issued on login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Registration response: the new account plus its token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

/// Generic `{"message": ...}` acknowledgement
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

// ============================================
// Admin
// ============================================

/// Platform-wide counters for the admin dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminStats {
    pub total_users: u64,
    pub active_users: u64,
    pub admin_users: u64,
    pub total_recipes: u64,
    pub public_recipes: u64,
    pub total_meal_plans: u64,
    pub total_categories: u64,
}

/// Partial user update issued by an admin
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminUserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PasswordReset {
    pub new_password: String,
}

/// Backend health check
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

// ============================================
// Error bodies
// ============================================

#[derive(Deserialize)]
struct ErrorBody {
    detail: Detail,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Detail {
    Message(String),
    Validation(Vec<ValidationIssue>),
}

#[derive(Deserialize)]
struct ValidationIssue {
    #[serde(default)]
    loc: Vec<serde_json::Value>,
    msg: String,
}

impl ValidationIssue {
    fn describe(&self) -> String {
        // loc is ["body", "field", ...]; the field is the last element
        match self.loc.last().and_then(|v| v.as_str()) {
            Some(field) if field != "body" => format!("{}: {}", field, self.msg),
            _ => self.msg.clone(),
        }
    }
}

/// Human-readable message of an error response body (`{"detail": ...}`)
pub fn detail_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    let message = match parsed.detail {
        Detail::Message(message) => message,
        Detail::Validation(issues) => issues
            .iter()
            .map(ValidationIssue::describe)
            .collect::<Vec<_>>()
            .join("; "),
    };
    (!message.trim().is_empty()).then_some(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe_json() -> serde_json::Value {
        serde_json::json!({
            "id": 7,
            "title": "Pancakes",
            "instructions": "Mix and fry",
            "prep_time": 10,
            "cook_time": 15,
            "is_public": false,
            "ingredients": [
                {"id": 1, "recipe_id": 7, "name": "Flour", "amount": "2", "unit": "cups"}
            ],
            "created_at": "2024-03-01T10:00:00Z"
        })
    }

    #[test]
    fn test_recipe_deserializes_with_missing_optionals() {
        let recipe: Recipe = serde_json::from_value(recipe_json()).unwrap();
        assert_eq!(recipe.title, "Pancakes");
        assert_eq!(recipe.total_time(), 25);
        assert!(!recipe.has_nutrition());
        assert_eq!(recipe.ingredients[0].amount.as_deref(), Some("2"));
        assert!(recipe.category.is_none());
    }

    #[test]
    fn test_share_token_hidden_when_private() {
        let mut recipe: Recipe = serde_json::from_value(recipe_json()).unwrap();
        recipe.share_token = Some("abc".to_string());
        assert_eq!(recipe.active_share_token(), None);
        recipe.is_public = true;
        assert_eq!(recipe.active_share_token(), Some("abc"));
    }

    #[test]
    fn test_recipe_input_omits_absent_fields() {
        let input = RecipeInput {
            title: "Toast".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json, serde_json::json!({"title": "Toast", "ingredients": []}));
    }

    #[test]
    fn test_meal_type_parse_is_case_insensitive() {
        assert_eq!("Dinner".parse::<MealType>().unwrap(), MealType::Dinner);
        assert_eq!(" SNACK ".parse::<MealType>().unwrap(), MealType::Snack);
        let err = "brunch".parse::<MealType>().unwrap_err();
        assert!(err.to_string().contains("brunch"));
    }

    #[test]
    fn test_meal_plan_wire_format() {
        let plan: MealPlan = serde_json::from_value(serde_json::json!({
            "id": 3,
            "date": "2024-03-05",
            "meal_type": "lunch",
            "recipe_id": 7,
            "notes": null
        }))
        .unwrap();
        assert_eq!(plan.meal_type, MealType::Lunch);
        assert_eq!(plan.date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(plan.recipe_title(), None);
    }

    #[test]
    fn test_grocery_item_line() {
        let item = GroceryItem {
            name: "Eggs".to_string(),
            amount: "3".to_string(),
            unit: String::new(),
            recipe_count: 1,
            recipes: vec!["Pancakes".to_string()],
        };
        assert_eq!(item.line(), "3 Eggs");
    }

    #[test]
    fn test_user_display_name_falls_back_to_email() {
        let user = User {
            id: 1,
            email: "cook@example.com".to_string(),
            full_name: Some("  ".to_string()),
            is_active: true,
            is_admin: false,
            created_at: None,
        };
        assert_eq!(user.display_name(), "cook@example.com");
    }

    #[test]
    fn test_string_detail() {
        assert_eq!(
            detail_message(r#"{"detail": "Recipe not found"}"#).as_deref(),
            Some("Recipe not found")
        );
    }

    #[test]
    fn test_validation_detail() {
        let body = r#"{"detail": [
            {"loc": ["body", "title"], "msg": "field required", "type": "value_error.missing"},
            {"loc": ["body"], "msg": "invalid payload", "type": "value_error"}
        ]}"#;
        assert_eq!(
            detail_message(body).as_deref(),
            Some("title: field required; invalid payload")
        );
    }

    #[test]
    fn test_unrecognized_error_body() {
        assert_eq!(detail_message("<html>Bad Gateway</html>"), None);
        assert_eq!(detail_message(r#"{"detail": ""}"#), None);
        assert_eq!(detail_message(r#"{"error": "nope"}"#), None);
    }
}
