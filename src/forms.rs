//! Form State and Validation
//!
//! Text-input state for the recipe, category and account forms, and the
//! conversion of that state into request payloads. Validation is limited to
//! required fields and simple ranges; the backend remains authoritative.

use thiserror::Error;

use crate::models::{
    CategoryInput, IngredientInput, LoginRequest, Recipe, RecipeInput, RegisterRequest,
};

/// Largest accepted image upload (5 MiB)
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Image extensions the backend accepts
pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// Minimum password length for login, registration and resets
pub const MIN_PASSWORD_LEN: usize = 8;

/// Longest category name
pub const MAX_CATEGORY_NAME_LEN: usize = 100;

/// Form validation failures, displayed inline as-is
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{0} must be a number")]
    NotANumber(&'static str),

    #[error("{field} must be at least {min}")]
    BelowMinimum { field: &'static str, min: f64 },

    #[error("Rating must be between 0 and 5")]
    RatingOutOfRange,

    #[error("Image file too large. Maximum size is 5MB.")]
    ImageTooLarge,

    #[error("Invalid file type. Allowed types: .jpg, .jpeg, .png, .gif, .webp")]
    ImageType,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Password must be at least 8 characters")]
    PasswordTooShort,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Category name must be at most 100 characters")]
    NameTooLong,

    #[error("Please select at least one recipe")]
    NoRecipesSelected,
}

/// Whether a recipe form creates or edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

impl FormMode {
    fn past_tense(&self) -> &'static str {
        match self {
            FormMode::Create => "created",
            FormMode::Edit => "updated",
        }
    }

    /// Whether the form still moves on to the saved recipe when its image
    /// upload fails. A new recipe leaves the form; an edit stays for a retry.
    pub fn leaves_form_on_upload_failure(&self) -> bool {
        matches!(self, FormMode::Create)
    }
}

/// One editable ingredient row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngredientRow {
    pub name: String,
    pub amount: String,
    pub unit: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngredientField {
    Name,
    Amount,
    Unit,
}

/// Local image picked for upload
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFile {
    pub name: String,
    pub size: u64,
}

impl ImageFile {
    /// "photo.jpg (1.5 MB)"
    pub fn summary(&self) -> String {
        format!(
            "{} ({:.1} MB)",
            self.name,
            self.size as f64 / (1024.0 * 1024.0)
        )
    }
}

/// Check an image's size and extension before accepting it
pub fn check_image_file(name: &str, size: u64) -> Result<(), ValidationError> {
    if size > MAX_IMAGE_BYTES {
        return Err(ValidationError::ImageTooLarge);
    }
    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    if !ALLOWED_IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        return Err(ValidationError::ImageType);
    }
    Ok(())
}

/// Message shown when the recipe saved but its image did not
pub fn upload_failure_message(mode: FormMode, error: &str) -> String {
    format!(
        "Recipe {}, but image upload failed: {}",
        mode.past_tense(),
        error
    )
}

/// Recipe create/edit form state
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeForm {
    pub title: String,
    pub description: String,
    pub instructions: String,
    pub prep_time: String,
    pub cook_time: String,
    pub servings: String,
    pub calories: String,
    pub protein: String,
    pub carbohydrates: String,
    pub fat: String,
    pub rating: Option<f64>,
    pub image_url: String,
    pub image_file: Option<ImageFile>,
    pub category_id: Option<i64>,
    pub ingredients: Vec<IngredientRow>,
}

impl Default for RecipeForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            instructions: String::new(),
            prep_time: String::new(),
            cook_time: String::new(),
            servings: String::new(),
            calories: String::new(),
            protein: String::new(),
            carbohydrates: String::new(),
            fat: String::new(),
            rating: None,
            image_url: String::new(),
            image_file: None,
            category_id: None,
            ingredients: vec![IngredientRow::default()],
        }
    }
}

fn opt_to_text<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl RecipeForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate the form from an existing recipe for editing
    pub fn from_recipe(recipe: &Recipe) -> Self {
        let ingredients = if recipe.ingredients.is_empty() {
            vec![IngredientRow::default()]
        } else {
            recipe
                .ingredients
                .iter()
                .map(|ing| IngredientRow {
                    name: ing.name.clone(),
                    amount: ing.amount.clone().unwrap_or_default(),
                    unit: ing.unit.clone().unwrap_or_default(),
                })
                .collect()
        };

        Self {
            title: recipe.title.clone(),
            description: recipe.description.clone().unwrap_or_default(),
            instructions: recipe.instructions.clone(),
            prep_time: opt_to_text(recipe.prep_time),
            cook_time: opt_to_text(recipe.cook_time),
            servings: opt_to_text(recipe.servings),
            calories: opt_to_text(recipe.calories),
            protein: opt_to_text(recipe.protein),
            carbohydrates: opt_to_text(recipe.carbohydrates),
            fat: opt_to_text(recipe.fat),
            rating: recipe.rating,
            image_url: recipe.image_url.clone().unwrap_or_default(),
            image_file: None,
            category_id: recipe.category_id,
            ingredients,
        }
    }

    pub fn add_ingredient(&mut self) {
        self.ingredients.push(IngredientRow::default());
    }

    /// Remove a row; the last remaining row is cleared instead
    pub fn remove_ingredient(&mut self, index: usize) {
        if index >= self.ingredients.len() {
            return;
        }
        self.ingredients.remove(index);
        if self.ingredients.is_empty() {
            self.ingredients.push(IngredientRow::default());
        }
    }

    pub fn update_ingredient(&mut self, index: usize, field: IngredientField, value: &str) {
        if let Some(row) = self.ingredients.get_mut(index) {
            let target = match field {
                IngredientField::Name => &mut row.name,
                IngredientField::Amount => &mut row.amount,
                IngredientField::Unit => &mut row.unit,
            };
            *target = value.to_string();
        }
    }

    /// Accept a local image; a rejected file leaves no file selected
    pub fn select_image_file(&mut self, name: &str, size: u64) -> Result<(), ValidationError> {
        match check_image_file(name, size) {
            Ok(()) => {
                self.image_file = Some(ImageFile {
                    name: name.to_string(),
                    size,
                });
                Ok(())
            }
            Err(e) => {
                self.image_file = None;
                Err(e)
            }
        }
    }

    pub fn clear_image_file(&mut self) {
        self.image_file = None;
    }

    /// Whether an upload must follow the save
    pub fn has_pending_upload(&self) -> bool {
        self.image_file.is_some()
    }

    /// Ingredient rows that will be submitted
    pub fn valid_ingredients(&self) -> Vec<IngredientInput> {
        self.ingredients
            .iter()
            .filter(|row| !row.name.trim().is_empty())
            .map(|row| IngredientInput {
                name: row.name.trim().to_string(),
                amount: non_blank(&row.amount),
                unit: non_blank(&row.unit),
            })
            .collect()
    }

    /// Validate and build the request payload
    pub fn to_input(&self, mode: FormMode) -> Result<RecipeInput, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::Required("Recipe title"));
        }

        let instructions = non_blank(&self.instructions);
        if mode == FormMode::Create && instructions.is_none() {
            return Err(ValidationError::Required("Instructions"));
        }

        if let Some(rating) = self.rating {
            if !(0.0..=5.0).contains(&rating) {
                return Err(ValidationError::RatingOutOfRange);
            }
        }

        // A chosen file replaces any URL; the upload sets it afterwards
        let image_url = if self.image_file.is_some() {
            None
        } else {
            non_blank(&self.image_url)
        };

        Ok(RecipeInput {
            title: title.to_string(),
            description: non_blank(&self.description),
            instructions,
            prep_time: parse_whole("Prep time", &self.prep_time, 0)?,
            cook_time: parse_whole("Cook time", &self.cook_time, 0)?,
            servings: parse_whole("Servings", &self.servings, 1)?,
            calories: parse_whole("Calories", &self.calories, 0)?,
            protein: parse_amount("Protein", &self.protein)?,
            carbohydrates: parse_amount("Carbohydrates", &self.carbohydrates)?,
            fat: parse_amount("Fat", &self.fat)?,
            rating: self.rating,
            image_url,
            category_id: self.category_id,
            ingredients: self.valid_ingredients(),
        })
    }
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_whole(field: &'static str, text: &str, min: u32) -> Result<Option<u32>, ValidationError> {
    let Some(text) = non_blank(text) else {
        return Ok(None);
    };
    let value: i64 = text
        .parse()
        .map_err(|_| ValidationError::NotANumber(field))?;
    if value < min as i64 {
        return Err(ValidationError::BelowMinimum {
            field,
            min: min as f64,
        });
    }
    u32::try_from(value)
        .map(Some)
        .map_err(|_| ValidationError::NotANumber(field))
}

fn parse_amount(field: &'static str, text: &str) -> Result<Option<f64>, ValidationError> {
    let Some(text) = non_blank(text) else {
        return Ok(None);
    };
    let value: f64 = text
        .parse()
        .map_err(|_| ValidationError::NotANumber(field))?;
    if !value.is_finite() {
        return Err(ValidationError::NotANumber(field));
    }
    if value < 0.0 {
        return Err(ValidationError::BelowMinimum { field, min: 0.0 });
    }
    Ok(Some(value))
}

// ============================================
// Category form
// ============================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryForm {
    pub name: String,
    pub description: String,
}

impl CategoryForm {
    pub fn to_input(&self) -> Result<CategoryInput, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::Required("Category name"));
        }
        if name.chars().count() > MAX_CATEGORY_NAME_LEN {
            return Err(ValidationError::NameTooLong);
        }
        Ok(CategoryInput {
            name: name.to_string(),
            description: non_blank(&self.description),
        })
    }
}

// ============================================
// Account forms
// ============================================

/// Loose `local@domain.tld` check
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let re = regex::Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
        .map_err(|_| ValidationError::InvalidEmail)?;
    if re.is_match(email.trim()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

pub fn validate_new_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn to_request(&self) -> Result<LoginRequest, ValidationError> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(ValidationError::Required("Email"));
        }
        if self.password.is_empty() {
            return Err(ValidationError::Required("Password"));
        }
        validate_new_password(&self.password)?;
        Ok(LoginRequest {
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn to_request(&self) -> Result<RegisterRequest, ValidationError> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(ValidationError::Required("Email"));
        }
        validate_email(email)?;
        validate_new_password(&self.password)?;
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(RegisterRequest {
            email: email.to_string(),
            password: self.password.clone(),
            full_name: non_blank(&self.full_name),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> RecipeForm {
        RecipeForm {
            title: "  Pancakes ".to_string(),
            instructions: "Mix and fry".to_string(),
            prep_time: "10".to_string(),
            servings: "4".to_string(),
            protein: "6.5".to_string(),
            ..RecipeForm::new()
        }
    }

    #[test]
    fn test_title_is_required() {
        let form = RecipeForm {
            title: "   ".to_string(),
            ..filled_form()
        };
        let err = form.to_input(FormMode::Create).unwrap_err();
        assert_eq!(err.to_string(), "Recipe title is required");
    }

    #[test]
    fn test_instructions_required_only_on_create() {
        let form = RecipeForm {
            instructions: String::new(),
            ..filled_form()
        };
        assert_eq!(
            form.to_input(FormMode::Create).unwrap_err(),
            ValidationError::Required("Instructions")
        );
        assert!(form.to_input(FormMode::Edit).is_ok());
    }

    #[test]
    fn test_numeric_fields_parse_and_blank_is_absent() {
        let input = filled_form().to_input(FormMode::Create).unwrap();
        assert_eq!(input.title, "Pancakes");
        assert_eq!(input.prep_time, Some(10));
        assert_eq!(input.cook_time, None);
        assert_eq!(input.servings, Some(4));
        assert_eq!(input.protein, Some(6.5));
    }

    #[test]
    fn test_numeric_field_errors() {
        let form = RecipeForm {
            cook_time: "soon".to_string(),
            ..filled_form()
        };
        assert_eq!(
            form.to_input(FormMode::Create).unwrap_err().to_string(),
            "Cook time must be a number"
        );

        let form = RecipeForm {
            servings: "0".to_string(),
            ..filled_form()
        };
        assert_eq!(
            form.to_input(FormMode::Create).unwrap_err().to_string(),
            "Servings must be at least 1"
        );
    }

    #[test]
    fn test_blank_ingredient_rows_are_dropped() {
        let mut form = filled_form();
        form.update_ingredient(0, IngredientField::Name, "Flour");
        form.update_ingredient(0, IngredientField::Amount, " 2 ");
        form.add_ingredient();
        form.add_ingredient();
        form.update_ingredient(2, IngredientField::Name, "Salt");

        let input = form.to_input(FormMode::Create).unwrap();
        assert_eq!(input.ingredients.len(), 2);
        assert_eq!(input.ingredients[0].amount.as_deref(), Some("2"));
        assert_eq!(input.ingredients[0].unit, None);
        assert_eq!(input.ingredients[1].name, "Salt");
    }

    #[test]
    fn test_removing_last_row_keeps_an_empty_row() {
        let mut form = RecipeForm::new();
        form.update_ingredient(0, IngredientField::Name, "Milk");
        form.remove_ingredient(0);
        assert_eq!(form.ingredients, vec![IngredientRow::default()]);
        form.remove_ingredient(5);
        assert_eq!(form.ingredients.len(), 1);
    }

    #[test]
    fn test_large_image_is_rejected() {
        let mut form = filled_form();
        let err = form
            .select_image_file("large-image.jpg", 6 * 1024 * 1024)
            .unwrap_err();
        assert_eq!(err.to_string(), "Image file too large. Maximum size is 5MB.");
        assert!(!form.has_pending_upload());
    }

    #[test]
    fn test_image_extension_is_checked() {
        assert_eq!(
            check_image_file("notes.txt", 10),
            Err(ValidationError::ImageType)
        );
        assert!(check_image_file("Photo.JPEG", 10).is_ok());
    }

    #[test]
    fn test_file_takes_priority_over_url() {
        let mut form = filled_form();
        form.image_url = "https://example.com/a.jpg".to_string();
        form.select_image_file("photo.png", 1024).unwrap();

        let input = form.to_input(FormMode::Create).unwrap();
        assert_eq!(input.image_url, None);
        assert!(form.has_pending_upload());
    }

    #[test]
    fn test_edit_form_round_trips_recipe() {
        let recipe: Recipe = serde_json::from_value(serde_json::json!({
            "id": 1,
            "title": "Soup",
            "instructions": "Boil",
            "servings": 2,
            "rating": 4.5,
            "category_id": 3,
            "ingredients": [{"name": "Water", "amount": "1", "unit": "l"}],
            "created_at": "2024-01-01T00:00:00Z"
        }))
        .unwrap();

        let form = RecipeForm::from_recipe(&recipe);
        assert_eq!(form.servings, "2");
        assert_eq!(form.prep_time, "");
        assert_eq!(form.ingredients[0].unit, "l");

        let input = form.to_input(FormMode::Edit).unwrap();
        assert_eq!(input.rating, Some(4.5));
        assert_eq!(input.category_id, Some(3));
        assert_eq!(input.ingredients.len(), 1);
    }

    #[test]
    fn test_upload_failure_message() {
        assert_eq!(
            upload_failure_message(FormMode::Edit, "File too large"),
            "Recipe updated, but image upload failed: File too large"
        );
    }

    #[test]
    fn test_only_create_leaves_form_on_upload_failure() {
        assert!(FormMode::Create.leaves_form_on_upload_failure());
        assert!(!FormMode::Edit.leaves_form_on_upload_failure());
    }

    #[test]
    fn test_category_form() {
        let form = CategoryForm {
            name: "  Desserts ".to_string(),
            description: " ".to_string(),
        };
        let input = form.to_input().unwrap();
        assert_eq!(input.name, "Desserts");
        assert_eq!(input.description, None);

        let long = CategoryForm {
            name: "x".repeat(101),
            ..Default::default()
        };
        assert_eq!(long.to_input().unwrap_err(), ValidationError::NameTooLong);
    }

    #[test]
    fn test_login_requires_eight_character_password() {
        let form = LoginForm {
            email: "cook@example.com".to_string(),
            password: "short".to_string(),
        };
        assert_eq!(
            form.to_request().unwrap_err(),
            ValidationError::PasswordTooShort
        );
    }

    #[test]
    fn test_register_form() {
        let mut form = RegisterForm {
            full_name: String::new(),
            email: "john@example.com".to_string(),
            password: "password123".to_string(),
            confirm_password: "password124".to_string(),
        };
        assert_eq!(
            form.to_request().unwrap_err().to_string(),
            "Passwords do not match"
        );

        form.confirm_password = "password123".to_string();
        let request = form.to_request().unwrap();
        assert_eq!(request.full_name, None);

        form.email = "not-an-email".to_string();
        assert_eq!(form.to_request().unwrap_err(), ValidationError::InvalidEmail);
    }
}
