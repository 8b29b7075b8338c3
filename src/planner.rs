//! Meal Planner Week Grid
//!
//! Reshapes a flat list of meal plans into a 7-day by 4-meal lookup table
//! and provides Sunday-based week navigation.

use chrono::{Datelike, Duration, NaiveDate};

use crate::models::{MealPlan, MealType};

pub const DAYS_PER_WEEK: usize = 7;

/// First day (Sunday) of the week containing `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// Format a date the way the backend expects it (YYYY-MM-DD)
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Weekday name ("Sunday")
pub fn day_name(date: NaiveDate) -> String {
    date.format("%A").to_string()
}

/// Column header date ("Mar 3")
pub fn short_label(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// Currently displayed week
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Week {
    start: NaiveDate,
}

impl Week {
    /// Week containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            start: week_start(date),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day (Saturday)
    pub fn end(&self) -> NaiveDate {
        self.start + Duration::days(DAYS_PER_WEEK as i64 - 1)
    }

    pub fn next(&self) -> Self {
        Self {
            start: self.start + Duration::days(DAYS_PER_WEEK as i64),
        }
    }

    pub fn prev(&self) -> Self {
        Self {
            start: self.start - Duration::days(DAYS_PER_WEEK as i64),
        }
    }

    pub fn days(&self) -> [NaiveDate; DAYS_PER_WEEK] {
        std::array::from_fn(|i| self.start + Duration::days(i as i64))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end()
    }

    /// "March 3, 2024 - March 9, 2024"
    pub fn range_label(&self) -> String {
        format!(
            "{} - {}",
            self.start.format("%B %-d, %Y"),
            self.end().format("%B %-d, %Y")
        )
    }
}

/// What a click on a grid cell should open
#[derive(Debug, Clone, PartialEq)]
pub enum CellAction {
    /// Empty slot: pick a recipe for this date and meal
    Add { date: NaiveDate, meal_type: MealType },
    /// Occupied slot: edit notes, change recipe or delete
    Edit(MealPlan),
}

/// Meal plans of one week arranged by day and meal type
#[derive(Debug, Clone, PartialEq)]
pub struct WeekGrid {
    week: Week,
    cells: [[Option<MealPlan>; 4]; DAYS_PER_WEEK],
}

impl WeekGrid {
    /// Build the grid; plans outside the week are ignored and a later plan
    /// for the same slot replaces an earlier one
    pub fn build(week: Week, plans: &[MealPlan]) -> Self {
        let mut cells: [[Option<MealPlan>; 4]; DAYS_PER_WEEK] = Default::default();
        let mut skipped = 0usize;

        for plan in plans {
            if !week.contains(plan.date) {
                skipped += 1;
                continue;
            }
            let day = (plan.date - week.start()).num_days() as usize;
            cells[day][plan.meal_type.index()] = Some(plan.clone());
        }

        if skipped > 0 {
            tracing::debug!(skipped, week = %format_date(week.start()), "Ignored meal plans outside week");
        }

        Self { week, cells }
    }

    pub fn week(&self) -> Week {
        self.week
    }

    /// Plan in a slot, if any
    pub fn get(&self, date: NaiveDate, meal_type: MealType) -> Option<&MealPlan> {
        if !self.week.contains(date) {
            return None;
        }
        let day = (date - self.week.start()).num_days() as usize;
        self.cells[day][meal_type.index()].as_ref()
    }

    /// Rows in display order: one per meal type, seven cells each
    pub fn rows(&self) -> Vec<(MealType, Vec<(NaiveDate, Option<&MealPlan>)>)> {
        let days = self.week.days();
        MealType::ALL
            .iter()
            .map(|meal| {
                let cells = days
                    .iter()
                    .enumerate()
                    .map(|(i, date)| (*date, self.cells[i][meal.index()].as_ref()))
                    .collect();
                (*meal, cells)
            })
            .collect()
    }

    /// Number of filled slots
    pub fn planned_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    pub fn action_for(&self, date: NaiveDate, meal_type: MealType) -> CellAction {
        match self.get(date, meal_type) {
            Some(plan) => CellAction::Edit(plan.clone()),
            None => CellAction::Add { date, meal_type },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn plan(id: i64, day: NaiveDate, meal_type: MealType) -> MealPlan {
        MealPlan {
            id,
            date: day,
            meal_type,
            recipe_id: id * 10,
            notes: None,
            recipe: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_week_starts_on_sunday() {
        // 2024-03-06 is a Wednesday
        assert_eq!(week_start(date(2024, 3, 6)), date(2024, 3, 3));
        assert_eq!(week_start(date(2024, 3, 3)), date(2024, 3, 3));
        assert_eq!(week_start(date(2024, 3, 9)), date(2024, 3, 3));
    }

    #[test]
    fn test_week_navigation() {
        let week = Week::containing(date(2024, 3, 6));
        assert_eq!(week.next().start(), date(2024, 3, 10));
        assert_eq!(week.prev().start(), date(2024, 2, 25));
        assert_eq!(week.next().prev(), week);
        assert_eq!(week.end(), date(2024, 3, 9));
    }

    #[test]
    fn test_labels() {
        let week = Week::containing(date(2024, 3, 6));
        assert_eq!(week.range_label(), "March 3, 2024 - March 9, 2024");
        assert_eq!(day_name(week.start()), "Sunday");
        assert_eq!(short_label(week.start()), "Mar 3");
        assert_eq!(format_date(week.start()), "2024-03-03");
    }

    #[test]
    fn test_grid_places_plans_by_day_and_meal() {
        let week = Week::containing(date(2024, 3, 6));
        let plans = vec![
            plan(1, date(2024, 3, 3), MealType::Breakfast),
            plan(2, date(2024, 3, 6), MealType::Dinner),
            plan(3, date(2024, 3, 12), MealType::Lunch),
        ];
        let grid = WeekGrid::build(week, &plans);

        assert_eq!(grid.planned_count(), 2);
        assert_eq!(grid.get(date(2024, 3, 6), MealType::Dinner).unwrap().id, 2);
        assert!(grid.get(date(2024, 3, 6), MealType::Lunch).is_none());
        assert!(grid.get(date(2024, 3, 12), MealType::Lunch).is_none());

        let rows = grid.rows();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].0, MealType::Breakfast);
        assert!(rows.iter().all(|(_, cells)| cells.len() == 7));
        assert_eq!(rows[0].1[0].1.map(|p| p.id), Some(1));
    }

    #[test]
    fn test_later_plan_replaces_earlier_in_same_slot() {
        let week = Week::containing(date(2024, 3, 6));
        let plans = vec![
            plan(1, date(2024, 3, 4), MealType::Snack),
            plan(2, date(2024, 3, 4), MealType::Snack),
        ];
        let grid = WeekGrid::build(week, &plans);
        assert_eq!(grid.planned_count(), 1);
        assert_eq!(grid.get(date(2024, 3, 4), MealType::Snack).unwrap().id, 2);
    }

    #[test]
    fn test_cell_actions() {
        let week = Week::containing(date(2024, 3, 6));
        let existing = plan(5, date(2024, 3, 5), MealType::Lunch);
        let grid = WeekGrid::build(week, std::slice::from_ref(&existing));

        assert_eq!(
            grid.action_for(date(2024, 3, 5), MealType::Lunch),
            CellAction::Edit(existing)
        );
        assert_eq!(
            grid.action_for(date(2024, 3, 5), MealType::Dinner),
            CellAction::Add {
                date: date(2024, 3, 5),
                meal_type: MealType::Dinner
            }
        );
    }
}
