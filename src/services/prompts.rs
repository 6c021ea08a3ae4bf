use crate::{
    core::generator::ChatMessage,
    types::{plan_response_schema, TravelPreferences},
};

const PLAN_SYSTEM_PROMPT: &str = "You are an expert travel agent. Provide detailed, practical, and budget-conscious travel plans in valid JSON format.";
const TIPS_SYSTEM_PROMPT: &str =
    "You are a knowledgeable travel expert providing practical advice.";

/// Join a tag list for the prompt, substituting `fallback` when it is empty
fn join_or(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join(", ")
    }
}

/// Generate the user prompt describing the trip and the expected JSON shape
pub fn generate_plan_prompt(preferences: &TravelPreferences, duration_days: i64) -> String {
    format!(
        "Create a detailed travel plan for the following trip:\n\n\
         Destination: {destination}\n\
         Departure: {departure}\n\
         Return: {return_date}\n\
         Duration: {duration_days} days\n\
         Budget: ${budget} USD\n\
         Travelers: {travelers}\n\
         Accommodation Type: {accommodation}\n\
         Preferred Activities: {activities}\n\
         Dietary Restrictions: {dietary}\n\n\
         Respond with a single JSON object and nothing else. The object must conform to this JSON Schema:\n\
         {schema:#}\n\n\
         Include one itinerary entry per day with its activities, meals (breakfast, lunch and dinner locations) \
         and estimated cost, then accommodation suggestions, flight suggestions, the estimated total cost and \
         practical recommendations.\n\
         Make sure all suggestions fit within the specified budget and preferences.",
        destination = preferences.destination.trim(),
        departure = preferences.departure_date,
        return_date = preferences.return_date,
        budget = preferences.budget,
        travelers = preferences.travelers,
        accommodation = preferences.accommodation_type,
        activities = join_or(&preferences.activities, "Any"),
        dietary = join_or(&preferences.dietary_restrictions, "None"),
        schema = plan_response_schema(),
    )
}

pub fn plan_messages(preferences: &TravelPreferences, duration_days: i64) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(PLAN_SYSTEM_PROMPT),
        ChatMessage::user(generate_plan_prompt(preferences, duration_days)),
    ]
}

/// Generate the prompt asking for ten categorized destination tips
pub fn generate_tips_prompt(destination: &str) -> String {
    format!(
        "Provide 10 essential travel tips for visiting {}.\n\
         Include practical advice about:\n\
         - Local customs and etiquette\n\
         - Safety considerations\n\
         - Money and payments\n\
         - Transportation\n\
         - Best time to visit\n\
         - What to pack\n\
         - Local cuisine recommendations\n\
         - Cultural attractions\n\
         - Language tips\n\
         - Emergency contacts\n\n\
         Format as a simple list of tips.",
        destination.trim()
    )
}

pub fn tips_messages(destination: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(TIPS_SYSTEM_PROMPT),
        ChatMessage::user(generate_tips_prompt(destination)),
    ]
}

/// Split free-text tips into one entry per non-empty line, without bullet markers
pub fn parse_tips(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| {
            line.trim()
                .trim_start_matches(|c: char| matches!(c, '-' | '*' | '•') || c.is_whitespace())
                .trim_end()
                .to_string()
        })
        .filter(|tip| !tip.is_empty())
        .collect()
}
