//! Deterministic itinerary generation.
//!
//! Content is picked once per trip from the preferences text and repeated for
//! every day; only the day number changes from block to block.

use serde::Serialize;
use std::fmt::{self, Display};

/// Activity theme chosen from the traveler's preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Temple,
    Adventure,
    Food,
    General,
}

/// Ordered dispatch table. The first entry with a matching keyword wins;
/// `General` is the fallback and has no keywords.
const CATEGORY_RULES: &[(Category, &[&str])] = &[
    (Category::Temple, &["temple", "spiritual"]),
    (Category::Adventure, &["adventure"]),
    (Category::Food, &["food"]),
];

impl Category {
    pub fn from_preferences(preferences: &str) -> Self {
        let preferences = preferences.to_lowercase();
        CATEGORY_RULES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| preferences.contains(k)))
            .map(|(category, _)| *category)
            .unwrap_or(Category::General)
    }

    pub fn activities(self) -> &'static [&'static str] {
        match self {
            Category::Temple => &[
                "Morning temple visit and darshan",
                "Attend a local ritual or aarti ceremony",
                "Evening meditation and spiritual walk",
            ],
            Category::Adventure => &[
                "Morning trek or hiking trail",
                "Afternoon adventure activity (rafting, paragliding or ziplining)",
                "Evening campfire and rest",
            ],
            Category::Food => &[
                "Breakfast at a popular local eatery",
                "Guided street food tour",
                "Dinner at a signature regional restaurant",
            ],
            Category::General => &[
                "Morning sightseeing",
                "Local food exploration",
                "Evening leisure time",
            ],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Temple => "temple",
            Category::Adventure => "adventure",
            Category::Food => "food",
            Category::General => "general",
        }
    }
}

/// One numbered day of an itinerary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Day {
    pub day_number: u32,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Itinerary {
    pub category: Category,
    pub header: String,
    pub days: Vec<Day>,
    pub footer: String,
}

impl Itinerary {
    /// Builds the structured itinerary. Never fails; `num_days` is not
    /// range-checked here.
    pub fn generate(
        destination: &str,
        num_days: u32,
        preferences: &str,
        budget: u64,
        currency: &str,
    ) -> Self {
        let category = Category::from_preferences(preferences);

        let header = format!(
            "Trip to {destination}\n\n\
             Duration: {num_days} days\n\
             Budget: {budget} {currency}\n\n\
             Preferences considered:\n\
             {preferences}\n\n\
             Day-wise plan:\n"
        );

        let content = category
            .activities()
            .iter()
            .map(|activity| format!("- {activity}"))
            .collect::<Vec<_>>()
            .join("\n");
        let days = (1..=num_days)
            .map(|day_number| Day {
                day_number,
                content: content.clone(),
            })
            .collect();

        let mut footer = String::new();
        if let Some(per_day) = budget.checked_div(u64::from(num_days)) {
            footer.push_str(&format!(
                "Budget guidance: about {per_day} {currency} per day. \
                 Keep around 10% aside for transport and emergencies.\n"
            ));
        }
        footer.push_str("Enjoy your journey! 🌍✈️\n");

        Self {
            category,
            header,
            days,
            footer,
        }
    }
}

impl Display for Itinerary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header)?;
        for day in &self.days {
            write!(f, "\nDay {}:\n{}\n", day.day_number, day.content)?;
        }
        write!(f, "\n{}", self.footer)
    }
}

/// Text form of [`Itinerary::generate`].
pub fn generate_itinerary_text(
    destination: &str,
    num_days: u32,
    preferences: &str,
    budget: u64,
    currency: &str,
) -> String {
    Itinerary::generate(destination, num_days, preferences, budget, currency).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_selection_is_case_insensitive() {
        assert_eq!(Category::from_preferences("Temple tour"), Category::Temple);
        assert_eq!(Category::from_preferences("TEMPLE"), Category::Temple);
        assert_eq!(
            Category::from_preferences("spiritual journey"),
            Category::Temple
        );
        assert_eq!(
            Category::from_preferences("I love ADVENTURE sports"),
            Category::Adventure
        );
        assert_eq!(
            Category::from_preferences("street food and markets"),
            Category::Food
        );
        assert_eq!(
            Category::from_preferences("relaxing by the pool"),
            Category::General
        );
        assert_eq!(Category::from_preferences(""), Category::General);
    }

    #[test]
    fn test_category_priority_order() {
        // temple outranks adventure, which outranks food
        assert_eq!(
            Category::from_preferences("adventure, food and a temple"),
            Category::Temple
        );
        assert_eq!(
            Category::from_preferences("food then adventure"),
            Category::Adventure
        );
    }

    #[test]
    fn test_day_blocks_are_numbered_without_gaps() {
        for num_days in [1, 2, 7, 30] {
            let itinerary = Itinerary::generate("Lisbon", num_days, "", 1000, "EUR");
            let numbers: Vec<u32> = itinerary.days.iter().map(|d| d.day_number).collect();
            assert_eq!(numbers, (1..=num_days).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_every_day_uses_the_same_block() {
        let itinerary = Itinerary::generate("Varanasi", 4, "spiritual", 20000, "INR");
        assert_eq!(itinerary.category, Category::Temple);
        assert!(
            itinerary
                .days
                .iter()
                .all(|d| d.content == itinerary.days[0].content)
        );
        assert!(itinerary.days[0].content.contains("temple visit"));
    }

    #[test]
    fn test_text_layout() {
        let text = generate_itinerary_text("Paris", 2, "art museums", 900, "EUR");
        assert!(text.starts_with("Trip to Paris\n"));
        assert!(text.contains("Duration: 2 days"));
        assert!(text.contains("Budget: 900 EUR"));
        assert!(text.contains("Preferences considered:\nart museums\n"));
        assert!(text.contains("Day 1:\n- Morning sightseeing\n"));
        assert!(text.contains("Budget guidance: about 450 EUR per day."));
        assert!(text.trim_end().ends_with("Enjoy your journey! 🌍✈️"));

        let day1 = text.find("Day 1:").unwrap();
        let day2 = text.find("Day 2:").unwrap();
        assert!(day1 < day2);
        assert!(!text.contains("Day 3:"));
    }

    #[test]
    fn test_zero_days_does_not_panic() {
        let itinerary = Itinerary::generate("Nowhere", 0, "", 100, "USD");
        assert!(itinerary.days.is_empty());
        assert!(!itinerary.footer.contains("per day"));
        assert!(itinerary.to_string().contains("Enjoy your journey!"));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = generate_itinerary_text("Cusco", 3, "Adventure", 2000, "USD");
        let b = generate_itinerary_text("Cusco", 3, "Adventure", 2000, "USD");
        assert_eq!(a, b);
    }
}
