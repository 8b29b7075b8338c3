//! Recipe Manager CLI
//!
//! Command-line front end for the recipe backend:
//! - Browse, create and share recipes
//! - Plan meals by week
//! - Generate grocery lists
//! - Account and admin operations

use anyhow::{bail, Context};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recipe_manager::client::MealPlanFilter;
use recipe_manager::config::{generate_default_config, LoggingConfig};
use recipe_manager::display::{format_minutes, image_url, rating_text, share_url};
use recipe_manager::forms::{upload_failure_message, CategoryForm, IngredientRow};
use recipe_manager::grocery::{to_text, write_csv, Checklist};
use recipe_manager::models::{MealPlanInput, MealPlanUpdate, PasswordChange};
use recipe_manager::planner::{day_name, short_label};
use recipe_manager::{
    Category, ClientError, Config, FormMode, LoginForm, MealPlan, MealType, Recipe, RecipeClient,
    RecipeForm, RecipeSelection, RegisterForm, SearchState, SessionStore, User, Week,
};

#[derive(Parser)]
#[command(name = "recipe-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Recipes, meal plans and grocery lists from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    /// Config file (default: search standard locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Recipe operations
    #[command(subcommand)]
    Recipes(RecipeCommand),

    /// Show a recipe shared by token
    Shared {
        token: String,
    },

    /// Category operations
    #[command(subcommand)]
    Categories(CategoryCommand),

    /// Weekly meal planning
    #[command(subcommand)]
    Plan(PlanCommand),

    /// Generate a grocery list from recipes
    Grocery {
        /// Recipe ids
        recipe_ids: Vec<i64>,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Sign in and remember the token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Create an account and sign in
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        name: Option<String>,
    },

    /// Forget the stored token
    Logout,

    /// Show the signed-in account
    Me,

    /// Change the signed-in account's password
    ChangePassword {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
    },

    /// Administration (admin accounts only)
    #[command(subcommand)]
    Admin(AdminCommand),

    /// Check backend health
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Fields shared by recipe create and update
#[derive(clap::Args, Default)]
pub struct RecipeFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub instructions: Option<String>,
    /// Minutes
    #[arg(long)]
    pub prep: Option<String>,
    /// Minutes
    #[arg(long)]
    pub cook: Option<String>,
    #[arg(long)]
    pub servings: Option<String>,
    #[arg(long)]
    pub calories: Option<String>,
    /// Grams per serving
    #[arg(long)]
    pub protein: Option<String>,
    /// Grams per serving
    #[arg(long)]
    pub carbohydrates: Option<String>,
    /// Grams per serving
    #[arg(long)]
    pub fat: Option<String>,
    #[arg(long)]
    pub rating: Option<f64>,
    #[arg(long)]
    pub image_url: Option<String>,
    #[arg(long)]
    pub category: Option<i64>,
    /// Ingredient as name|amount|unit (repeatable, replaces the list)
    #[arg(short, long = "ingredient")]
    pub ingredients: Vec<String>,
    /// Local image to upload after saving
    #[arg(long)]
    pub image: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum RecipeCommand {
    /// List recipes, optionally searching
    List {
        /// Search term
        #[arg(short, long)]
        search: Option<String>,
        #[arg(short, long)]
        category: Option<i64>,
    },
    /// Show one recipe
    Show { id: i64 },
    /// Create a recipe
    Create(RecipeFields),
    /// Update a recipe
    Update {
        id: i64,
        #[command(flatten)]
        fields: RecipeFields,
    },
    /// Delete a recipe
    Delete { id: i64 },
    /// Make a recipe public and print its link
    Share {
        id: i64,
        /// Frontend origin used to build the link
        #[arg(long, default_value = "http://localhost:3000")]
        origin: String,
    },
    /// Make a recipe private again
    Unshare { id: i64 },
    /// Upload an image for a recipe
    UploadImage { id: i64, path: PathBuf },
}

#[derive(Subcommand)]
pub enum CategoryCommand {
    List,
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    Update {
        id: i64,
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    Delete {
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum PlanCommand {
    /// Show the week containing a date (default: today)
    Week {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Plan a recipe for a meal
    Add {
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        meal: MealType,
        #[arg(long)]
        recipe: i64,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Change a planned meal
    Update {
        id: i64,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        meal: Option<MealType>,
        #[arg(long)]
        recipe: Option<i64>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Remove a planned meal
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum AdminCommand {
    Stats,
    Users,
    ToggleActive { user_id: i64 },
    ToggleAdmin { user_id: i64 },
    ResetPassword {
        user_id: i64,
        #[arg(long)]
        password: String,
    },
    DeleteUser { user_id: i64 },
    Recipes,
    DeleteRecipe { id: i64 },
    MealPlans,
    DeleteMealPlan { id: i64 },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match Config::load_with_env(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        },
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.url = url.clone();
    }

    init_logging(&config.logging);

    if let Err(e) = run(cli, config).await {
        eprintln!("Error: {}", e);
        if let Some(ClientError::Api { status: 401, .. }) = e.downcast_ref::<ClientError>() {
            eprintln!();
            eprintln!("Sign in first with:");
            eprintln!("  recipe-cli login --email <EMAIL> --password <PASSWORD>");
        }
        std::process::exit(1);
    }
}

fn init_logging(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("recipe_manager={}", config.level)));

    let registry = tracing_subscriber::registry().with(filter);
    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    let session = SessionStore::new(&config.session.file);
    let client = RecipeClient::new(&config.api)?.with_token(session.load()?);
    let format = cli.format;

    match cli.command {
        Commands::Recipes(command) => run_recipes(&client, command, format).await?,

        Commands::Shared { token } => {
            let recipe = client.get_shared_recipe(&token).await?;
            print_recipe(&client, &recipe, format)?;
        }

        Commands::Categories(command) => match command {
            CategoryCommand::List => {
                let categories = client.list_categories().await?;
                print_categories(&categories, format)?;
            }
            CategoryCommand::Create { name, description } => {
                let form = CategoryForm {
                    name,
                    description: description.unwrap_or_default(),
                };
                let category = client.create_category(&form.to_input()?).await?;
                println!("Created category {} ({})", category.name, category.id);
            }
            CategoryCommand::Update {
                id,
                name,
                description,
            } => {
                let form = CategoryForm {
                    name,
                    description: description.unwrap_or_default(),
                };
                let category = client.update_category(id, &form.to_input()?).await?;
                println!("Updated category {} ({})", category.name, category.id);
            }
            CategoryCommand::Delete { id } => {
                client.delete_category(id).await?;
                println!("Deleted category {}", id);
            }
        },

        Commands::Plan(command) => run_plan(&client, command, format).await?,

        Commands::Grocery { recipe_ids, output } => {
            let mut selection = RecipeSelection::new();
            for id in recipe_ids {
                if !selection.contains(id) {
                    selection.toggle(id);
                }
            }
            let list = client.generate_grocery_list(&selection).await?;

            let mut rendered = Vec::new();
            match format {
                OutputFormat::Json => {
                    rendered = serde_json::to_vec_pretty(&list)?;
                    rendered.push(b'\n');
                }
                OutputFormat::Csv => write_csv(&list, &mut rendered)?,
                OutputFormat::Table => {
                    rendered = to_text(&list, &Checklist::new()).into_bytes();
                }
            }

            match output {
                Some(path) => {
                    std::fs::write(&path, &rendered)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!("Grocery list written to {:?}", path);
                }
                None => print!("{}", String::from_utf8_lossy(&rendered)),
            }
        }

        Commands::Login { email, password } => {
            let form = LoginForm { email, password };
            let token = client.login(&form.to_request()?).await?;
            session.save(&token.access_token)?;
            let user = client
                .clone()
                .with_token(Some(token.access_token))
                .me()
                .await?;
            println!("Signed in as {}", user.display_name());
        }

        Commands::Register {
            email,
            password,
            name,
        } => {
            let form = RegisterForm {
                full_name: name.unwrap_or_default(),
                email,
                confirm_password: password.clone(),
                password,
            };
            let auth = client.register(&form.to_request()?).await?;
            session.save(&auth.access_token)?;
            println!("Registered and signed in as {}", auth.user.display_name());
        }

        Commands::Logout => {
            session.clear()?;
            println!("Signed out");
        }

        Commands::Me => {
            let user = client.me().await?;
            print_users(&[user], format)?;
        }

        Commands::ChangePassword { current, new } => {
            let change = PasswordChange {
                current_password: current,
                new_password: new,
            };
            let message = client.change_password(&change).await?;
            if message.is_empty() {
                println!("Password changed");
            } else {
                println!("{}", message);
            }
        }

        Commands::Admin(command) => run_admin(&client, command, format).await?,

        Commands::Status => match client.health().await {
            Ok(health) => {
                println!("Recipe Manager v{}", env!("CARGO_PKG_VERSION"));
                println!();
                println!("API: {}", client.base_url());
                println!("Status: {}", health.status);
                println!(
                    "Session: {}",
                    if client.token().is_some() {
                        "signed in"
                    } else {
                        "signed out"
                    }
                );
            }
            Err(e) => {
                eprintln!("Cannot connect to the recipe API at {}", client.base_url());
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },

        Commands::Config { output } => {
            let config = generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

async fn run_recipes(
    client: &RecipeClient,
    command: RecipeCommand,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match command {
        RecipeCommand::List { search, category } => {
            let state = SearchState {
                term: search.unwrap_or_default(),
                category_id: category,
            };
            let recipes = client.find_recipes(&state.query()).await?;
            if format == OutputFormat::Table && state.is_filtered() && !state.term.trim().is_empty() {
                println!("{}", state.summary(recipes.len()));
                println!();
            }
            print_recipes(&recipes, format)?;
        }

        RecipeCommand::Show { id } => {
            let recipe = client.get_recipe(id).await?;
            print_recipe(client, &recipe, format)?;
        }

        RecipeCommand::Create(fields) => {
            let mut form = RecipeForm::new();
            apply_fields(&mut form, &fields)?;
            let input = form.to_input(FormMode::Create)?;
            let recipe = client.create_recipe(&input).await?;
            println!("Created recipe {} ({})", recipe.title, recipe.id);
            upload_after_save(client, recipe.id, fields.image.as_ref(), FormMode::Create).await;
        }

        RecipeCommand::Update { id, fields } => {
            let recipe = client.get_recipe(id).await?;
            let mut form = RecipeForm::from_recipe(&recipe);
            apply_fields(&mut form, &fields)?;
            let input = form.to_input(FormMode::Edit)?;
            let recipe = client.update_recipe(id, &input).await?;
            println!("Updated recipe {} ({})", recipe.title, recipe.id);
            upload_after_save(client, recipe.id, fields.image.as_ref(), FormMode::Edit).await;
        }

        RecipeCommand::Delete { id } => {
            client.delete_recipe(id).await?;
            println!("Deleted recipe {}", id);
        }

        RecipeCommand::Share { id, origin } => {
            let recipe = client.share_recipe(id).await?;
            match recipe.active_share_token() {
                Some(token) => println!("{}", share_url(&origin, token)),
                None => bail!("The server did not return a share token"),
            }
        }

        RecipeCommand::Unshare { id } => {
            client.unshare_recipe(id).await?;
            println!("Recipe {} is private", id);
        }

        RecipeCommand::UploadImage { id, path } => {
            let recipe = client.upload_image_file(id, &path).await?;
            println!(
                "Uploaded image: {}",
                image_url(client.base_url(), recipe.image_url.as_deref()).unwrap_or_default()
            );
        }
    }
    Ok(())
}

/// Copy the given flags onto the form, leaving absent ones untouched
fn apply_fields(form: &mut RecipeForm, fields: &RecipeFields) -> anyhow::Result<()> {
    let text_fields = [
        (&fields.title, &mut form.title),
        (&fields.description, &mut form.description),
        (&fields.instructions, &mut form.instructions),
        (&fields.prep, &mut form.prep_time),
        (&fields.cook, &mut form.cook_time),
        (&fields.servings, &mut form.servings),
        (&fields.calories, &mut form.calories),
        (&fields.protein, &mut form.protein),
        (&fields.carbohydrates, &mut form.carbohydrates),
        (&fields.fat, &mut form.fat),
        (&fields.image_url, &mut form.image_url),
    ];
    for (value, target) in text_fields {
        if let Some(value) = value {
            *target = value.clone();
        }
    }
    if fields.rating.is_some() {
        form.rating = fields.rating;
    }
    if fields.category.is_some() {
        form.category_id = fields.category;
    }
    if !fields.ingredients.is_empty() {
        form.ingredients = fields
            .ingredients
            .iter()
            .map(|raw| parse_ingredient(raw))
            .collect();
    }
    if let Some(path) = &fields.image {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let size = std::fs::metadata(path)
            .with_context(|| format!("Cannot read {:?}", path))?
            .len();
        form.select_image_file(&name, size)?;
    }
    Ok(())
}

/// "Flour|2|cups" into an ingredient row
fn parse_ingredient(raw: &str) -> IngredientRow {
    let mut parts = raw.splitn(3, '|').map(str::trim);
    IngredientRow {
        name: parts.next().unwrap_or_default().to_string(),
        amount: parts.next().unwrap_or_default().to_string(),
        unit: parts.next().unwrap_or_default().to_string(),
    }
}

async fn upload_after_save(
    client: &RecipeClient,
    recipe_id: i64,
    image: Option<&PathBuf>,
    mode: FormMode,
) {
    let Some(path) = image else {
        return;
    };
    match client.upload_image_file(recipe_id, path).await {
        Ok(_) => println!("Uploaded image {:?}", path),
        Err(e) => eprintln!("{}", upload_failure_message(mode, &e.to_string())),
    }
}

async fn run_plan(
    client: &RecipeClient,
    command: PlanCommand,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match command {
        PlanCommand::Week { date } => {
            let week = Week::containing(date.unwrap_or_else(|| Local::now().date_naive()));
            if format == OutputFormat::Table {
                let (grid, _) = client.load_planner(week).await?;
                print_week(&grid);
            } else {
                let plans = client
                    .list_meal_plans(&MealPlanFilter {
                        start_date: Some(week.start()),
                        end_date: Some(week.end()),
                        meal_type: None,
                    })
                    .await?;
                print_meal_plans(&plans, format)?;
            }
        }

        PlanCommand::Add {
            date,
            meal,
            recipe,
            notes,
        } => {
            let plan = client
                .create_meal_plan(&MealPlanInput {
                    date,
                    meal_type: meal,
                    recipe_id: recipe,
                    notes: notes.filter(|n| !n.trim().is_empty()),
                })
                .await?;
            println!(
                "Planned {} for {} on {} ({})",
                plan.recipe_title().unwrap_or("recipe"),
                plan.meal_type.label(),
                plan.date,
                plan.id
            );
        }

        PlanCommand::Update {
            id,
            date,
            meal,
            recipe,
            notes,
        } => {
            let update = MealPlanUpdate {
                date,
                meal_type: meal,
                recipe_id: recipe,
                notes,
            };
            let plan = client.update_meal_plan(id, &update).await?;
            println!("Updated meal plan {}", plan.id);
        }

        PlanCommand::Delete { id } => {
            client.delete_meal_plan(id).await?;
            println!("Deleted meal plan {}", id);
        }
    }
    Ok(())
}

async fn run_admin(
    client: &RecipeClient,
    command: AdminCommand,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match command {
        AdminCommand::Stats => {
            let stats = client.admin_stats().await?;
            if format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Users:       {} ({} active, {} admins)", stats.total_users, stats.active_users, stats.admin_users);
                println!("Recipes:     {} ({} public)", stats.total_recipes, stats.public_recipes);
                println!("Meal plans:  {}", stats.total_meal_plans);
                println!("Categories:  {}", stats.total_categories);
            }
        }
        AdminCommand::Users => {
            let dashboard = client.admin_dashboard().await?;
            print_users(&dashboard.users, format)?;
        }
        AdminCommand::ToggleActive { user_id } => {
            let user = find_user(client, user_id).await?;
            let user = client.admin_toggle_active(&user).await?;
            println!(
                "{} is now {}",
                user.email,
                if user.is_active { "active" } else { "inactive" }
            );
        }
        AdminCommand::ToggleAdmin { user_id } => {
            let user = find_user(client, user_id).await?;
            let user = client.admin_toggle_admin(&user).await?;
            println!(
                "{} is {}",
                user.email,
                if user.is_admin { "now an admin" } else { "no longer an admin" }
            );
        }
        AdminCommand::ResetPassword { user_id, password } => {
            client.admin_reset_password(user_id, &password).await?;
            println!("Password reset for user {}", user_id);
        }
        AdminCommand::DeleteUser { user_id } => {
            client.admin_delete_user(user_id).await?;
            println!("Deleted user {}", user_id);
        }
        AdminCommand::Recipes => {
            let recipes = client.admin_recipes().await?;
            print_recipes(&recipes, format)?;
        }
        AdminCommand::DeleteRecipe { id } => {
            client.admin_delete_recipe(id).await?;
            println!("Deleted recipe {}", id);
        }
        AdminCommand::MealPlans => {
            let plans = client.admin_meal_plans().await?;
            print_meal_plans(&plans, format)?;
        }
        AdminCommand::DeleteMealPlan { id } => {
            client.admin_delete_meal_plan(id).await?;
            println!("Deleted meal plan {}", id);
        }
    }
    Ok(())
}

async fn find_user(client: &RecipeClient, user_id: i64) -> anyhow::Result<User> {
    let users = client
        .admin_users(0, recipe_manager::client::ADMIN_USERS_PAGE)
        .await?;
    users
        .into_iter()
        .find(|u| u.id == user_id)
        .with_context(|| format!("User {} not found", user_id))
}

// ============================================
// Output
// ============================================

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_csv_rows(header: &[&str], rows: Vec<Vec<String>>) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    wtr.write_record(header)?;
    for row in rows {
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let cut: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

fn print_recipes(recipes: &[Recipe], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(recipes)?,
        OutputFormat::Csv => print_csv_rows(
            &["id", "title", "category", "total_minutes", "rating", "public"],
            recipes
                .iter()
                .map(|r| {
                    vec![
                        r.id.to_string(),
                        r.title.clone(),
                        r.category.as_ref().map(|c| c.name.clone()).unwrap_or_default(),
                        r.total_time().to_string(),
                        r.rating.map(|v| v.to_string()).unwrap_or_default(),
                        r.is_public.to_string(),
                    ]
                })
                .collect(),
        )?,
        OutputFormat::Table => {
            if recipes.is_empty() {
                println!("No recipes found.");
                return Ok(());
            }
            println!("{:<6} {:<32} {:<16} {:<12} {}", "ID", "Title", "Category", "Time", "Rating");
            println!("{}", "-".repeat(76));
            for recipe in recipes {
                let time = match recipe.total_time() {
                    0 => "-".to_string(),
                    minutes => format_minutes(minutes),
                };
                println!(
                    "{:<6} {:<32} {:<16} {:<12} {}",
                    recipe.id,
                    truncate(&recipe.title, 32),
                    truncate(recipe.category.as_ref().map(|c| c.name.as_str()).unwrap_or("-"), 16),
                    time,
                    rating_text(recipe.rating).unwrap_or_else(|| "-".to_string())
                );
            }
        }
    }
    Ok(())
}

fn print_recipe(client: &RecipeClient, recipe: &Recipe, format: OutputFormat) -> anyhow::Result<()> {
    if format != OutputFormat::Table {
        return print_json(recipe);
    }

    println!("{}", recipe.title);
    println!("{}", "=".repeat(recipe.title.chars().count()));
    if let Some(description) = &recipe.description {
        println!("{}", description);
    }
    println!();

    if let Some(category) = &recipe.category {
        println!("Category:  {}", category.name);
    }
    if let Some(prep) = recipe.prep_time {
        println!("Prep:      {}", format_minutes(prep));
    }
    if let Some(cook) = recipe.cook_time {
        println!("Cook:      {}", format_minutes(cook));
    }
    if let Some(servings) = recipe.servings {
        println!("Servings:  {}", servings);
    }
    if let Some(rating) = rating_text(recipe.rating) {
        println!("Rating:    {} / 5", rating);
    }
    if let Some(url) = image_url(client.base_url(), recipe.image_url.as_deref()) {
        println!("Image:     {}", url);
    }

    if recipe.has_nutrition() {
        println!();
        println!("Nutrition (per serving):");
        if let Some(calories) = recipe.calories {
            println!("  Calories:       {}", calories);
        }
        for (label, value) in [
            ("Protein", recipe.protein),
            ("Carbohydrates", recipe.carbohydrates),
            ("Fat", recipe.fat),
        ] {
            if let Some(grams) = value {
                println!("  {:<15} {}g", format!("{}:", label), grams);
            }
        }
    }

    if !recipe.ingredients.is_empty() {
        println!();
        println!("Ingredients:");
        for ingredient in &recipe.ingredients {
            println!(
                "  - {}",
                recipe_manager::display::ingredient_line(
                    &ingredient.name,
                    ingredient.amount.as_deref(),
                    ingredient.unit.as_deref()
                )
            );
        }
    }

    if !recipe.instructions.trim().is_empty() {
        println!();
        println!("Instructions:");
        for line in recipe.instructions.lines() {
            println!("  {}", line);
        }
    }
    Ok(())
}

fn print_categories(categories: &[Category], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(categories)?,
        OutputFormat::Csv => print_csv_rows(
            &["id", "name", "description"],
            categories
                .iter()
                .map(|c| {
                    vec![
                        c.id.to_string(),
                        c.name.clone(),
                        c.description.clone().unwrap_or_default(),
                    ]
                })
                .collect(),
        )?,
        OutputFormat::Table => {
            if categories.is_empty() {
                println!("No categories yet.");
                return Ok(());
            }
            println!("{:<6} {:<24} {}", "ID", "Name", "Description");
            println!("{}", "-".repeat(60));
            for category in categories {
                println!(
                    "{:<6} {:<24} {}",
                    category.id,
                    truncate(&category.name, 24),
                    category.description.as_deref().unwrap_or("-")
                );
            }
        }
    }
    Ok(())
}

fn print_meal_plans(plans: &[MealPlan], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(plans)?,
        OutputFormat::Csv => print_csv_rows(
            &["id", "date", "meal_type", "recipe_id", "recipe", "notes"],
            plans
                .iter()
                .map(|p| {
                    vec![
                        p.id.to_string(),
                        p.date.to_string(),
                        p.meal_type.to_string(),
                        p.recipe_id.to_string(),
                        p.recipe_title().unwrap_or_default().to_string(),
                        p.notes.clone().unwrap_or_default(),
                    ]
                })
                .collect(),
        )?,
        OutputFormat::Table => {
            if plans.is_empty() {
                println!("No meals planned.");
                return Ok(());
            }
            println!("{:<6} {:<12} {:<10} {:<32} {}", "ID", "Date", "Meal", "Recipe", "Notes");
            println!("{}", "-".repeat(76));
            for plan in plans {
                println!(
                    "{:<6} {:<12} {:<10} {:<32} {}",
                    plan.id,
                    plan.date,
                    plan.meal_type.label(),
                    truncate(plan.recipe_title().unwrap_or("-"), 32),
                    plan.notes.as_deref().unwrap_or("")
                );
            }
        }
    }
    Ok(())
}

fn print_week(grid: &recipe_manager::WeekGrid) {
    const CELL: usize = 14;
    let week = grid.week();
    println!("{}", week.range_label());
    println!();

    print!("{:<10}", "");
    for day in week.days() {
        print!(" | {:<width$}", format!("{} {}", &day_name(day)[..3], short_label(day)), width = CELL);
    }
    println!();
    println!("{}", "-".repeat(10 + 7 * (CELL + 3)));

    for (meal_type, cells) in grid.rows() {
        print!("{:<10}", meal_type.label());
        for (_, plan) in cells {
            let text = plan
                .map(|p| p.recipe_title().map(str::to_string).unwrap_or_else(|| format!("#{}", p.recipe_id)))
                .unwrap_or_else(|| "-".to_string());
            print!(" | {:<width$}", truncate(&text, CELL), width = CELL);
        }
        println!();
    }

    println!();
    println!("{} meals planned", grid.planned_count());
}

fn print_users(users: &[User], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(users)?,
        OutputFormat::Csv => print_csv_rows(
            &["id", "email", "full_name", "is_active", "is_admin"],
            users
                .iter()
                .map(|u| {
                    vec![
                        u.id.to_string(),
                        u.email.clone(),
                        u.full_name.clone().unwrap_or_default(),
                        u.is_active.to_string(),
                        u.is_admin.to_string(),
                    ]
                })
                .collect(),
        )?,
        OutputFormat::Table => {
            println!("{:<6} {:<32} {:<24} {:<8} {}", "ID", "Email", "Name", "Active", "Admin");
            println!("{}", "-".repeat(80));
            for user in users {
                println!(
                    "{:<6} {:<32} {:<24} {:<8} {}",
                    user.id,
                    truncate(&user.email, 32),
                    truncate(user.full_name.as_deref().unwrap_or("-"), 24),
                    if user.is_active { "yes" } else { "no" },
                    if user.is_admin { "yes" } else { "no" }
                );
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ingredient() {
        let row = parse_ingredient("Flour | 2 | cups");
        assert_eq!(row.name, "Flour");
        assert_eq!(row.amount, "2");
        assert_eq!(row.unit, "cups");

        let row = parse_ingredient("Salt");
        assert_eq!(row.amount, "");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Pancakes", 10), "Pancakes");
        assert_eq!(truncate("Spaghetti Carbonara", 10), "Spaghetti…");
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "recipe-cli",
            "--format",
            "csv",
            "plan",
            "add",
            "--date",
            "2024-03-05",
            "--meal",
            "Dinner",
            "--recipe",
            "7",
        ])
        .unwrap();
        assert!(cli.format == OutputFormat::Csv);
        assert!(matches!(
            cli.command,
            Commands::Plan(PlanCommand::Add { meal: MealType::Dinner, recipe: 7, .. })
        ));
    }

    #[test]
    fn test_nutrition_flags_reach_the_payload() {
        let cli = Cli::try_parse_from([
            "recipe-cli",
            "recipes",
            "create",
            "--title",
            "Omelette",
            "--instructions",
            "Whisk and fry",
            "--calories",
            "320",
            "--protein",
            "21.5",
            "--carbohydrates",
            "2",
            "--fat",
            "24",
        ])
        .unwrap();
        let Commands::Recipes(RecipeCommand::Create(fields)) = cli.command else {
            panic!("expected recipes create");
        };

        let mut form = RecipeForm::new();
        apply_fields(&mut form, &fields).unwrap();
        let input = form.to_input(FormMode::Create).unwrap();
        assert_eq!(input.calories, Some(320));
        assert_eq!(input.protein, Some(21.5));
        assert_eq!(input.carbohydrates, Some(2.0));
        assert_eq!(input.fat, Some(24.0));
    }
}
