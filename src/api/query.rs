//! Search query and prompt construction.
//!
//! Pure functions of the design config; nothing here touches the network.

use crate::design::{DesignConfig, HomeStyle};

/// Fixed search phrase for floor-plan imagery.
///
/// The photo index has few technical drawings, so the terms are broad and
/// the query ignores the house parameters entirely.
pub const BLUEPRINT_QUERY: &str = "architectural floor plan blueprint sketch drawing white background";

/// Number of selected features that make it into the exterior query.
pub const EXTERIOR_FEATURE_LIMIT: usize = 3;

pub fn blueprint_query(_config: &DesignConfig) -> String {
    BLUEPRINT_QUERY.to_string()
}

/// Search term for a style; some labels photograph poorly and are mapped to
/// terms the index knows better.
pub fn style_search_term(style: HomeStyle) -> &'static str {
    match style {
        HomeStyle::Modern => "Modern Architecture",
        HomeStyle::Traditional => "Traditional House",
        HomeStyle::Urban => "Urban Modern House",
        other => other.label(),
    }
}

pub fn exterior_query(config: &DesignConfig) -> String {
    let features = config
        .features()
        .iter()
        .take(EXTERIOR_FEATURE_LIMIT)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "{} exterior house architecture {} {}",
        style_search_term(config.style()),
        features,
        config.custom_instructions()
    )
}

/// Prompt asking the text model whether `instructions` are on-topic.
pub fn validation_prompt(instructions: &str) -> String {
    format!(
        r#"
You are a content safety filter for an architecture generation app.

User Input: "{}"

Task: Determine if this input describes a house, building, architectural feature, design style, interior design, or landscape element.

Rules:
1. If the input is about food, animals (as subjects), people, politics, violence, coding, or random gibberish -> Return INVALID.
2. If the input is about a house style, room, material, color, landscape, or architectural detail -> Return VALID.

Response Format: strictly just the word "VALID" or "INVALID".
"#,
        instructions
    )
}

/// Interpret the model's reply.
///
/// Models sometimes echo both words, so `INVALID` anywhere wins.
pub fn is_valid_verdict(reply: &str) -> bool {
    let reply = reply.trim().to_uppercase();
    reply.contains("VALID") && !reply.contains("INVALID")
}
