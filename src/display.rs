//! Display Helpers
//!
//! Pure presentation rules shared by the frontend components and the CLI:
//! star ratings, durations, image and share URLs.

/// Fill level of a single star
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarFill {
    Full,
    Half,
    Empty,
}

/// Star widget size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StarSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl StarSize {
    pub fn class(&self) -> &'static str {
        match self {
            StarSize::Small => "w-4 h-4",
            StarSize::Medium => "w-5 h-5",
            StarSize::Large => "w-6 h-6",
        }
    }
}

pub const DEFAULT_MAX_STARS: u32 = 5;

/// Fill of each star for a rating; absent rating shows all empty
pub fn star_fills(rating: Option<f64>, max: u32) -> Vec<StarFill> {
    let rating = rating.unwrap_or(0.0);
    (1..=max)
        .map(|star| {
            let star = star as f64;
            if rating >= star {
                StarFill::Full
            } else if rating >= star - 0.5 {
                StarFill::Half
            } else {
                StarFill::Empty
            }
        })
        .collect()
}

/// Text next to the stars: "0" for zero, one decimal otherwise
pub fn rating_text(rating: Option<f64>) -> Option<String> {
    match rating {
        None => None,
        Some(r) if r == 0.0 => Some("0".to_string()),
        Some(r) => Some(format!("{:.1}", r)),
    }
}

/// Accessible label of the n-th star
pub fn star_label(n: u32) -> String {
    if n == 1 {
        "1 star".to_string()
    } else {
        format!("{} stars", n)
    }
}

/// "25 min", or hours and minutes past an hour
pub fn format_minutes(minutes: u32) -> String {
    if minutes < 60 {
        return format!("{} min", minutes);
    }
    let hours = minutes / 60;
    let rest = minutes % 60;
    if rest == 0 {
        format!("{} hr", hours)
    } else {
        format!("{} hr {} min", hours, rest)
    }
}

/// Resolve a stored image reference against the API base.
///
/// Absolute URLs pass through, paths are joined to the base, blank is none.
pub fn image_url(api_base: &str, stored: Option<&str>) -> Option<String> {
    let stored = stored.map(str::trim).filter(|s| !s.is_empty())?;
    if stored.starts_with("http://") || stored.starts_with("https://") {
        return Some(stored.to_string());
    }
    let base = api_base.trim_end_matches('/');
    if stored.starts_with('/') {
        Some(format!("{}{}", base, stored))
    } else {
        Some(format!("{}/{}", base, stored))
    }
}

/// Public link for a share token
pub fn share_url(origin: &str, token: &str) -> String {
    format!("{}/share/{}", origin.trim_end_matches('/'), token)
}

/// Ingredient line: "2 cups Flour"
pub fn ingredient_line(name: &str, amount: Option<&str>, unit: Option<&str>) -> String {
    [amount.unwrap_or(""), unit.unwrap_or(""), name]
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_fills() {
        use StarFill::*;
        assert_eq!(star_fills(None, 5), vec![Empty; 5]);
        assert_eq!(star_fills(Some(4.0), 5), vec![Full, Full, Full, Full, Empty]);
        assert_eq!(star_fills(Some(3.5), 5), vec![Full, Full, Full, Half, Empty]);
        assert_eq!(star_fills(Some(3.0), 10).len(), 10);
    }

    #[test]
    fn test_rating_text() {
        assert_eq!(rating_text(None), None);
        assert_eq!(rating_text(Some(0.0)).as_deref(), Some("0"));
        assert_eq!(rating_text(Some(5.0)).as_deref(), Some("5.0"));
        assert_eq!(rating_text(Some(4.5)).as_deref(), Some("4.5"));
        assert_eq!(rating_text(Some(0.1)).as_deref(), Some("0.1"));
    }

    #[test]
    fn test_star_labels() {
        assert_eq!(star_label(1), "1 star");
        assert_eq!(star_label(3), "3 stars");
        assert_eq!(StarSize::default().class(), "w-5 h-5");
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(25), "25 min");
        assert_eq!(format_minutes(60), "1 hr");
        assert_eq!(format_minutes(95), "1 hr 35 min");
    }

    #[test]
    fn test_image_url() {
        let base = "http://localhost:8000/";
        assert_eq!(
            image_url(base, Some("https://example.com/recipe.jpg")).as_deref(),
            Some("https://example.com/recipe.jpg")
        );
        assert_eq!(
            image_url(base, Some("/uploads/a.png")).as_deref(),
            Some("http://localhost:8000/uploads/a.png")
        );
        assert_eq!(image_url(base, Some("  ")), None);
        assert_eq!(image_url(base, None), None);
    }

    #[test]
    fn test_share_url_and_ingredient_line() {
        assert_eq!(
            share_url("http://localhost:3000/", "abc-123"),
            "http://localhost:3000/share/abc-123"
        );
        assert_eq!(ingredient_line("Salt", None, Some("pinch")), "pinch Salt");
    }
}
