//! Canned prompt and message text for the relief assistant
//!
//! The system directive steers the model toward location-grounded answers,
//! and the remaining constants are the fixed user-facing strings the chat
//! surface relies on (welcome seed, degraded-mode fallback, citation title
//! defaults).

/// System directive sent with every model request.
pub const SYSTEM_DIRECTIVE: &str = "\
You are Sahaay AI, an emergency relief assistant for India.
Your mission is to find shelters, hospitals, and aid centers using the Google Maps tool.

1. Always provide immediate safety advice first (move to higher ground, stay away from water).
2. Use the Google Maps tool for every location-based request.
3. Provide the user with the names and addresses of locations found.
4. Direct map links are automatically rendered below your text.";

/// First assistant turn seeded into every new session.
pub const WELCOME_MESSAGE: &str = "Namaste. I am Sahaay's Relief Support AI. I've automatically detected your location to help you find the closest shelters and aid points faster. \n\nHow can I help you today?";

/// Reply text used when the model cannot be reached or returns garbage.
pub const FALLBACK_MESSAGE: &str = "I'm having difficulty accessing live map data. If you are in immediate danger, please move to higher ground and call 112 for emergency rescue services.";

/// Reply text used when the model answers with no text at all.
pub const SEARCHING_PLACEHOLDER: &str = "Please stay safe. I am searching for help near you.";

/// Title substituted for map citations that arrive without one.
pub const DEFAULT_MAP_TITLE: &str = "Nearby Resource";

/// Title substituted for web citations that arrive without one.
pub const DEFAULT_WEB_TITLE: &str = "Resource Link";

/// Starter questions offered while a conversation is still short.
pub const SUGGESTED_QUESTIONS: [&str; 4] = [
    "Where are relief camps near me?",
    "Safety tips for current situation",
    "Is there a flood risk here?",
    "Nearby emergency hospitals",
];

/// Footer reminder printed under the chat banner.
pub const EMERGENCY_FOOTER: &str =
    "Sahaay AI uses localized data. For immediate medical emergencies, please dial 112.";
