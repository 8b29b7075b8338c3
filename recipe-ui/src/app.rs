//! App Root Component
//!
//! Router, navigation and global providers.

use leptos::*;
use leptos_router::*;

use crate::components::{Nav, Toast};
use crate::pages::{
    Admin, Categories, CategoryEdit, EditRecipe, GroceryList, Home, Login, MealPlans, NewRecipe,
    RecipeDetail, Register, SharedRecipe,
};
use crate::state::provide_global_state;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();

    view! {
        <Router>
            <div class="min-h-screen bg-gray-50 text-gray-900 flex flex-col">
                <Nav />

                <main class="flex-1 container mx-auto px-4 py-8">
                    <Routes>
                        <Route path="/" view=Home />
                        <Route path="/recipes/new" view=NewRecipe />
                        <Route path="/recipes/:id" view=RecipeDetail />
                        <Route path="/recipes/:id/edit" view=EditRecipe />
                        <Route path="/categories" view=Categories />
                        <Route path="/categories/:id/edit" view=CategoryEdit />
                        <Route path="/meal-plans" view=MealPlans />
                        <Route path="/grocery-list" view=GroceryList />
                        <Route path="/login" view=Login />
                        <Route path="/register" view=Register />
                        <Route path="/share/:token" view=SharedRecipe />
                        <Route path="/admin" view=Admin />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                <Toast />
            </div>
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-600 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href="/"
                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 text-white rounded-lg font-medium transition-colors"
            >
                "Back to Recipes"
            </A>
        </div>
    }
}
