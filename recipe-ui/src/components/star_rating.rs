//! Star Rating Component
//!
//! Read-only or clickable 0-5 star display with half stars.

use leptos::*;

use recipe_manager::display::{
    rating_text, star_fills, star_label, StarFill, StarSize, DEFAULT_MAX_STARS,
};

#[component]
pub fn StarRating(
    #[prop(into)]
    rating: MaybeSignal<Option<f64>>,
    #[prop(default = DEFAULT_MAX_STARS)]
    max: u32,
    #[prop(default = StarSize::Medium)]
    size: StarSize,
    #[prop(default = true)]
    show_text: bool,
    /// Called with the clicked star when editable
    #[prop(optional)]
    on_change: Option<Callback<f64>>,
) -> impl IntoView {
    let editable = on_change.is_some();
    let rating = Signal::derive(move || rating.get());

    view! {
        <div class="flex items-center space-x-1">
            {move || {
                star_fills(rating.get(), max)
                    .into_iter()
                    .enumerate()
                    .map(|(i, fill)| {
                        let n = i as u32 + 1;
                        let (glyph, color) = match fill {
                            StarFill::Full => ("★", "text-yellow-400"),
                            StarFill::Half => ("⯪", "text-yellow-400"),
                            StarFill::Empty => ("☆", "text-gray-300"),
                        };
                        let class = format!(
                            "{} {} {}",
                            size.class(),
                            color,
                            if editable { "cursor-pointer hover:scale-110" } else { "" }
                        );
                        view! {
                            <button
                                type="button"
                                class=class
                                aria-label=star_label(n)
                                disabled=!editable
                                on:click=move |_| {
                                    if let Some(cb) = on_change {
                                        cb.call(n as f64);
                                    }
                                }
                            >
                                {glyph}
                            </button>
                        }
                    })
                    .collect_view()
            }}
            {move || {
                if show_text {
                    rating_text(rating.get()).map(|text| view! {
                        <span class="ml-2 text-sm text-gray-600">{text}</span>
                    })
                } else {
                    None
                }
            }}
        </div>
    }
}
