//! Prompt template for itinerary generation

use crate::models::TravelRequest;

/// Render the instruction sent to the provider.
///
/// The output depends only on the three arguments, which are embedded as-is.
pub fn render_prompt(location: &str, budget: f64, days: i64) -> String {
    format!(
        "Create a detailed day-by-day travel itinerary for {location} for {days} days with a budget of ${budget}.\n\
         For each day, please include:\n\
         - Morning activities with estimated costs\n\
         - Afternoon activities with estimated costs\n\
         - Evening activities with estimated costs\n\
         - Recommended restaurants for meals with price ranges\n\
         - Local transportation tips\n\
         Please ensure all suggestions fit within the total budget of ${budget}.\n\
         Format the response in a clear, easy-to-read structure."
    )
}

impl TravelRequest {
    /// Prompt for this request, see [`render_prompt`]
    pub fn to_prompt(&self) -> String {
        render_prompt(&self.location, self.budget, self.days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Paris", 1500.0, 3, "$1500")]
    #[case("Kyoto", 2250.5, 7, "$2250.5")]
    #[case("Reykjavík", 800.0, 1, "$800")]
    #[case("New York City", 99.99, 14, "$99.99")]
    fn test_prompt_embeds_fields(
        #[case] location: &str,
        #[case] budget: f64,
        #[case] days: i64,
        #[case] expected_budget: &str,
    ) {
        let prompt = render_prompt(location, budget, days);
        assert!(prompt.contains(location));
        assert!(prompt.contains(&format!("for {days} days")));
        assert!(prompt.contains(expected_budget));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(
            render_prompt("Lisbon", 1200.0, 4),
            render_prompt("Lisbon", 1200.0, 4)
        );
    }

    #[test]
    fn test_prompt_mentions_budget_twice() {
        let prompt = render_prompt("Rome", 900.0, 2);
        assert_eq!(prompt.matches("$900").count(), 2);
    }

    #[test]
    fn test_nonsensical_values_pass_through() {
        let prompt = render_prompt("", -50.0, 0);
        assert!(prompt.contains("for 0 days"));
        assert!(prompt.contains("$-50"));
    }

    #[test]
    fn test_request_to_prompt() {
        let request = TravelRequest {
            location: "Paris".to_string(),
            budget: 1500.0,
            days: 3,
        };
        assert_eq!(request.to_prompt(), render_prompt("Paris", 1500.0, 3));
    }
}
