//! Meal Plans Page
//!
//! Weekly planner grid: days across, meal types down.

use chrono::Local;
use leptos::*;

use recipe_manager::models::{MealPlan, MealPlanInput, MealPlanUpdate, Recipe};
use recipe_manager::planner::{day_name, short_label, CellAction, Week, WeekGrid};

use crate::api;
use crate::components::{ErrorMessage, Loading};
use crate::state::{require_sign_in, use_global_state};

#[component]
pub fn MealPlans() -> impl IntoView {
    let state = use_global_state();
    require_sign_in(state);

    let today = Local::now().date_naive();
    let week = create_rw_signal(Week::containing(today));
    let grid = create_rw_signal(WeekGrid::build(Week::containing(today), &[]));
    let (recipes, set_recipes) = create_signal(Vec::<Recipe>::new());
    let (loading, set_loading) = create_signal(true);
    let (error, set_error) = create_signal(None::<String>);
    let active = create_rw_signal(None::<CellAction>);

    let reload = move || {
        let requested = week.get_untracked();
        set_loading.set(true);
        spawn_local(async move {
            let result = api::fetch_week(requested.start()).await;
            let Some(outcome) = week_outcome(week.get_untracked(), requested, result) else {
                return;
            };
            match outcome {
                Ok(built) => {
                    grid.set(built);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e)),
            }
            set_loading.set(false);
        });
    };

    create_effect(move |_| {
        let _ = week.get();
        reload();
    });

    create_effect(move |_| {
        spawn_local(async move {
            if let Ok(list) = api::fetch_recipes(None).await {
                set_recipes.set(list);
            }
        });
    });

    let on_saved = Callback::new(move |_: ()| {
        active.set(None);
        reload();
    });

    view! {
        <div class="space-y-6">
            <div class="flex flex-wrap items-center justify-between gap-3">
                <h1 class="text-3xl font-bold">"Meal Plans"</h1>
                <div class="flex items-center space-x-2">
                    <button
                        on:click=move |_| week.update(|w| *w = w.prev())
                        class="px-3 py-2 bg-gray-200 hover:bg-gray-300 rounded-lg"
                    >
                        "← Previous"
                    </button>
                    <button
                        on:click=move |_| week.set(Week::containing(Local::now().date_naive()))
                        class="px-3 py-2 bg-gray-200 hover:bg-gray-300 rounded-lg"
                    >
                        "This Week"
                    </button>
                    <button
                        on:click=move |_| week.update(|w| *w = w.next())
                        class="px-3 py-2 bg-gray-200 hover:bg-gray-300 rounded-lg"
                    >
                        "Next →"
                    </button>
                </div>
            </div>

            <p class="text-gray-600">{move || week.get().range_label()}</p>

            {move || error.get().map(|e| view! { <ErrorMessage message=e /> })}

            <Show when=move || !loading.get() fallback=|| view! { <Loading /> }>
                <div class="overflow-x-auto">
                    <table class="w-full bg-white rounded-lg shadow text-sm">
                        <thead>
                            <tr>
                                <th class="p-2"></th>
                                {move || grid.with(|g| g.week().days().into_iter().map(|day| {
                                    let today_class = if day == today { "bg-primary-50" } else { "" };
                                    view! {
                                        <th class=format!("p-2 text-center {}", today_class)>
                                            <div class="font-semibold">{day_name(day)}</div>
                                            <div class="text-gray-500">{short_label(day)}</div>
                                        </th>
                                    }
                                }).collect_view())}
                            </tr>
                        </thead>
                        <tbody>
                            {move || grid.with(|g| g.rows().into_iter().map(|(meal, cells)| view! {
                                <tr class="border-t">
                                    <th class="p-2 text-left font-medium">{meal.label()}</th>
                                    {cells.into_iter().map(|(date, plan)| {
                                        let title = plan.map(|p| {
                                            p.recipe_title()
                                                .map(str::to_string)
                                                .unwrap_or_else(|| format!("Recipe #{}", p.recipe_id))
                                        });
                                        let notes = plan.and_then(|p| p.notes.clone());
                                        let filled = title.is_some();
                                        view! {
                                            <td class="p-1 align-top">
                                                <button
                                                    on:click=move |_| active.set(Some(grid.with_untracked(|g| g.action_for(date, meal))))
                                                    class=if filled {
                                                        "w-full min-h-[4rem] p-2 rounded bg-primary-100 hover:bg-primary-200 text-left"
                                                    } else {
                                                        "w-full min-h-[4rem] p-2 rounded border border-dashed border-gray-300 hover:bg-gray-50 text-gray-400"
                                                    }
                                                >
                                                    {match title {
                                                        Some(t) => view! {
                                                            <div class="font-medium">{t}</div>
                                                            {notes.map(|n| view! { <div class="text-xs text-gray-600">{n}</div> })}
                                                        }.into_view(),
                                                        None => view! { "+" }.into_view(),
                                                    }}
                                                </button>
                                            </td>
                                        }
                                    }).collect_view()}
                                </tr>
                            }).collect_view())}
                        </tbody>
                    </table>
                </div>
                <p class="text-sm text-gray-500">
                    {move || format!("{} meals planned this week", grid.with(|g| g.planned_count()))}
                </p>
            </Show>

            {move || active.get().map(|action| view! {
                <MealPlanModal
                    action=action
                    recipes=recipes
                    on_close=Callback::new(move |_| active.set(None))
                    on_saved=on_saved
                />
            })}
        </div>
    }
}

/// What a finished week fetch should apply, or `None` once the user has moved
/// to another week
fn week_outcome(
    shown: Week,
    requested: Week,
    result: Result<Vec<MealPlan>, String>,
) -> Option<Result<WeekGrid, String>> {
    if shown != requested {
        return None;
    }
    Some(result.map(|plans| WeekGrid::build(requested, &plans)))
}

#[component]
fn MealPlanModal(
    action: CellAction,
    recipes: ReadSignal<Vec<Recipe>>,
    on_close: Callback<()>,
    on_saved: Callback<()>,
) -> impl IntoView {
    let state = use_global_state();

    let (date, meal_type, existing) = match &action {
        CellAction::Add { date, meal_type } => (*date, *meal_type, None),
        CellAction::Edit(plan) => (plan.date, plan.meal_type, Some(plan.id)),
    };
    let (initial_recipe, initial_notes) = match &action {
        CellAction::Add { .. } => (None, String::new()),
        CellAction::Edit(plan) => (Some(plan.recipe_id), plan.notes.clone().unwrap_or_default()),
    };

    let recipe_id = create_rw_signal(initial_recipe);
    let notes = create_rw_signal(initial_notes);
    let (error, set_error) = create_signal(None::<String>);
    let (busy, set_busy) = create_signal(false);

    let on_save = move |_: web_sys::MouseEvent| {
        let Some(chosen) = recipe_id.get_untracked() else {
            set_error.set(Some("Please select a recipe".to_string()));
            return;
        };
        let text = notes.get_untracked().trim().to_string();
        let text = (!text.is_empty()).then_some(text);
        set_busy.set(true);
        spawn_local(async move {
            let result = match existing {
                Some(id) => {
                    let update = MealPlanUpdate {
                        recipe_id: Some(chosen),
                        notes: Some(text.unwrap_or_default()),
                        ..Default::default()
                    };
                    api::update_meal_plan(id, &update).await.map(|_| "Meal plan updated")
                }
                None => {
                    let input = MealPlanInput {
                        date,
                        meal_type,
                        recipe_id: chosen,
                        notes: text,
                    };
                    api::create_meal_plan(&input).await.map(|_| "Meal added")
                }
            };
            set_busy.set(false);
            match result {
                Ok(message) => {
                    state.show_success(message);
                    on_saved.call(());
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let on_delete = move |_: web_sys::MouseEvent| {
        let Some(id) = existing else {
            return;
        };
        let confirmed = window()
            .confirm_with_message("Remove this meal from the plan?")
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        set_busy.set(true);
        spawn_local(async move {
            let result = api::delete_meal_plan(id).await;
            set_busy.set(false);
            match result {
                Ok(()) => {
                    state.show_success("Meal removed");
                    on_saved.call(());
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let heading = format!(
        "{} · {}, {}",
        meal_type.label(),
        day_name(date),
        short_label(date)
    );

    view! {
        <div class="fixed inset-0 bg-black/50 flex items-center justify-center z-40">
            <div class="bg-white rounded-lg shadow-xl w-full max-w-md p-6 space-y-4">
                <h2 class="text-xl font-semibold">{heading}</h2>
                {move || error.get().map(|e| view! { <ErrorMessage message=e /> })}

                <div>
                    <label class="block text-sm font-medium mb-1">"Recipe"</label>
                    <select
                        on:change=move |ev| recipe_id.set(event_target_value(&ev).parse().ok())
                        prop:value=move || recipe_id.get().map(|id| id.to_string()).unwrap_or_default()
                        class="w-full border border-gray-300 rounded-lg px-3 py-2"
                    >
                        <option value="">"Select a recipe"</option>
                        {move || recipes.get().into_iter().map(|r| view! {
                            <option value=r.id.to_string()>{r.title}</option>
                        }).collect_view()}
                    </select>
                </div>

                <div>
                    <label class="block text-sm font-medium mb-1">"Notes"</label>
                    <textarea
                        rows="2"
                        prop:value=move || notes.get()
                        on:input=move |ev| notes.set(event_target_value(&ev))
                        class="w-full border border-gray-300 rounded-lg px-3 py-2"
                    />
                </div>

                <div class="flex justify-between">
                    <div>
                        {existing.map(|_| view! {
                            <button
                                on:click=on_delete
                                disabled=move || busy.get()
                                class="px-4 py-2 text-red-600 hover:text-red-800"
                            >
                                "Delete"
                            </button>
                        })}
                    </div>
                    <div class="space-x-2">
                        <button
                            on:click=move |_| on_close.call(())
                            class="px-4 py-2 bg-gray-200 hover:bg-gray-300 rounded-lg"
                        >
                            "Cancel"
                        </button>
                        <button
                            on:click=on_save
                            disabled=move || busy.get()
                            class="px-4 py-2 bg-primary-600 hover:bg-primary-700 text-white rounded-lg disabled:bg-gray-400"
                        >
                            {if existing.is_some() { "Save" } else { "Add" }}
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use recipe_manager::models::MealType;

    fn this_week() -> Week {
        Week::containing(NaiveDate::from_ymd_opt(2024, 3, 13).unwrap())
    }

    fn dinner(date: NaiveDate) -> MealPlan {
        MealPlan {
            id: 1,
            date,
            meal_type: MealType::Dinner,
            recipe_id: 7,
            notes: None,
            recipe: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_stale_week_response_is_dropped() {
        let requested = this_week();
        let shown = requested.next();
        let plans = vec![dinner(requested.start())];

        assert_eq!(week_outcome(shown, requested, Ok(plans)), None);
    }

    #[test]
    fn test_stale_week_error_is_dropped() {
        let requested = this_week();
        let shown = requested.prev();

        assert_eq!(week_outcome(shown, requested, Err("Network error".to_string())), None);
    }

    #[test]
    fn test_current_week_builds_grid() {
        let week = this_week();
        let plans = vec![dinner(week.start())];

        let grid = week_outcome(week, week, Ok(plans)).unwrap().unwrap();
        assert_eq!(grid.week(), week);
        assert_eq!(grid.planned_count(), 1);
    }

    #[test]
    fn test_current_week_error_is_kept() {
        let week = this_week();

        let outcome = week_outcome(week, week, Err("Network error".to_string()));
        assert_eq!(outcome, Some(Err("Network error".to_string())));
    }
}
