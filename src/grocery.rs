//! Grocery List Selection
//!
//! Recipe selection before generation and the check-off list afterwards.
//! Aggregation itself happens on the backend.

use std::collections::BTreeSet;

use crate::forms::ValidationError;
use crate::models::{GroceryList, GroceryListRequest};

/// Recipes chosen for the next grocery list, in selection order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeSelection {
    selected: Vec<i64>,
}

impl RecipeSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, recipe_id: i64) {
        if let Some(pos) = self.selected.iter().position(|id| *id == recipe_id) {
            self.selected.remove(pos);
        } else {
            self.selected.push(recipe_id);
        }
    }

    pub fn contains(&self, recipe_id: i64) -> bool {
        self.selected.contains(&recipe_id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn ids(&self) -> &[i64] {
        &self.selected
    }

    /// Whether every available recipe is selected
    pub fn all_selected(&self, available: &[i64]) -> bool {
        !available.is_empty() && available.iter().all(|id| self.contains(*id))
    }

    /// Select everything, or clear when everything is already selected
    pub fn toggle_all(&mut self, available: &[i64]) {
        if self.all_selected(available) {
            self.selected.clear();
        } else {
            self.selected = available.to_vec();
        }
    }

    /// Label of the select-all button
    pub fn toggle_all_label(&self, available: &[i64]) -> &'static str {
        if self.all_selected(available) {
            "Deselect All"
        } else {
            "Select All"
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn to_request(&self) -> Result<GroceryListRequest, ValidationError> {
        if self.selected.is_empty() {
            return Err(ValidationError::NoRecipesSelected);
        }
        Ok(GroceryListRequest {
            recipe_ids: self.selected.clone(),
        })
    }
}

/// Checked-off state of a generated list, keyed by item index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Checklist {
    checked: BTreeSet<usize>,
}

impl Checklist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, index: usize) {
        if !self.checked.remove(&index) {
            self.checked.insert(index);
        }
    }

    pub fn is_checked(&self, index: usize) -> bool {
        self.checked.contains(&index)
    }

    pub fn checked_count(&self) -> usize {
        self.checked.len()
    }

    pub fn reset(&mut self) {
        self.checked.clear();
    }

    /// "2 of 5 items checked"
    pub fn progress(&self, total: usize) -> String {
        format!("{} of {} items checked", self.checked.len(), total)
    }
}

/// Printable plain-text rendering
pub fn to_text(list: &GroceryList, checklist: &Checklist) -> String {
    let mut out = String::new();
    out.push_str("Grocery List\n");
    if !list.recipe_titles.is_empty() {
        out.push_str(&format!("For: {}\n", list.recipe_titles.join(", ")));
    }
    out.push('\n');
    for (i, item) in list.items.iter().enumerate() {
        let mark = if checklist.is_checked(i) { "[x]" } else { "[ ]" };
        out.push_str(&format!("{} {}", mark, item.line()));
        if item.recipe_count > 1 {
            out.push_str(&format!(" (used in {} recipes)", item.recipe_count));
        }
        out.push('\n');
    }
    out
}

/// CSV export: name, amount, unit, recipe_count, recipes
#[cfg(feature = "client")]
pub fn write_csv<W: std::io::Write>(list: &GroceryList, writer: W) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["name", "amount", "unit", "recipe_count", "recipes"])?;
    for item in &list.items {
        let count = item.recipe_count.to_string();
        let recipes = item.recipes.join("; ");
        wtr.write_record([
            item.name.as_str(),
            item.amount.as_str(),
            item.unit.as_str(),
            count.as_str(),
            recipes.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GroceryItem;

    fn sample_list() -> GroceryList {
        GroceryList {
            items: vec![
                GroceryItem {
                    name: "Flour".to_string(),
                    amount: "2 1/2".to_string(),
                    unit: "cups".to_string(),
                    recipe_count: 2,
                    recipes: vec!["Pancakes".to_string(), "Bread".to_string()],
                },
                GroceryItem {
                    name: "Eggs".to_string(),
                    amount: "3".to_string(),
                    unit: String::new(),
                    recipe_count: 1,
                    recipes: vec!["Pancakes".to_string()],
                },
            ],
            total_items: 2,
            recipe_count: 2,
            recipe_titles: vec!["Pancakes".to_string(), "Bread".to_string()],
        }
    }

    #[test]
    fn test_toggle_selection() {
        let mut selection = RecipeSelection::new();
        selection.toggle(1);
        selection.toggle(2);
        selection.toggle(1);
        assert_eq!(selection.ids(), &[2]);
    }

    #[test]
    fn test_toggle_all() {
        let available = [1, 2, 3];
        let mut selection = RecipeSelection::new();
        selection.toggle(2);
        assert_eq!(selection.toggle_all_label(&available), "Select All");

        selection.toggle_all(&available);
        assert!(selection.all_selected(&available));
        assert_eq!(selection.toggle_all_label(&available), "Deselect All");

        selection.toggle_all(&available);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_empty_selection_is_rejected() {
        let selection = RecipeSelection::new();
        assert_eq!(
            selection.to_request().unwrap_err().to_string(),
            "Please select at least one recipe"
        );
    }

    #[test]
    fn test_checklist_progress() {
        let mut checklist = Checklist::new();
        checklist.toggle(0);
        checklist.toggle(1);
        checklist.toggle(0);
        assert!(checklist.is_checked(1));
        assert_eq!(checklist.progress(2), "1 of 2 items checked");
        checklist.reset();
        assert_eq!(checklist.checked_count(), 0);
    }

    #[test]
    fn test_text_rendering() {
        let mut checklist = Checklist::new();
        checklist.toggle(1);
        let text = to_text(&sample_list(), &checklist);
        assert!(text.contains("For: Pancakes, Bread"));
        assert!(text.contains("[ ] 2 1/2 cups Flour (used in 2 recipes)"));
        assert!(text.contains("[x] 3 Eggs\n"));
    }

    #[cfg(feature = "client")]
    #[test]
    fn test_csv_export() {
        let mut buf = Vec::new();
        write_csv(&sample_list(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("name,amount,unit,recipe_count,recipes"));
        assert_eq!(lines.next(), Some("Flour,2 1/2,cups,2,Pancakes; Bread"));
    }
}
