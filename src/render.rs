//! Terminal presentation of the relief chat
//!
//! Pure presentation: the session hands over finished turns, this module
//! prints them. Assistant grounding renders as a map preview link for the
//! primary result, a "Nearby Resources" list, and a "Sources" list, so the
//! sections mirror exactly which citation fields are set on the turn.

use colored::Colorize;

use crate::location::Coordinates;
use crate::prompts;
use crate::transcript::{Speaker, Turn};

/// Base URL the map preview link is built on
const MAP_PREVIEW_BASE: &str = "https://maps.google.com/maps";

/// Zoom level for the map preview, street scale
const MAP_PREVIEW_ZOOM: &str = "14";

/// Colored tag identifying who spoke
pub fn speaker_tag(speaker: Speaker) -> String {
    match speaker {
        Speaker::User => format!("[{}]", "YOU".green()),
        Speaker::Assistant => format!("[{}]", "SAHAAY".cyan()),
        Speaker::System => format!("[{}]", "NOTICE".yellow()),
    }
}

/// Builds the map search link previewing the primary result
///
/// The first map citation's title doubles as the search query.
///
/// # Examples
///
/// ```
/// use sahaay::render::map_preview_url;
///
/// let url = map_preview_url("Relief Camp A");
/// assert_eq!(url, "https://maps.google.com/maps?q=Relief+Camp+A&z=14");
/// ```
pub fn map_preview_url(title: &str) -> String {
    let query: String = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("q", title)
        .append_pair("z", MAP_PREVIEW_ZOOM)
        .finish();
    format!("{}?{}", MAP_PREVIEW_BASE, query)
}

/// Renders a turn's grounding sections as plain text
///
/// Returns an empty string for turns without citations so callers can print
/// the result unconditionally. The first map citation additionally yields
/// the map preview line above the list.
pub fn format_citations(turn: &Turn) -> String {
    let mut out = String::new();

    if let Some(maps) = &turn.map_citations {
        if let Some(primary) = maps.first() {
            out.push_str(&format!(
                "Map: {} {}\n",
                primary.title,
                map_preview_url(&primary.title)
            ));
        }
        out.push_str("Nearby Resources:\n");
        for (i, citation) in maps.iter().enumerate() {
            out.push_str(&format!("  {}. {} ({})\n", i + 1, citation.title, citation.uri));
        }
    }

    if let Some(webs) = &turn.web_citations {
        out.push_str("Sources:\n");
        for (i, citation) in webs.iter().enumerate() {
            out.push_str(&format!("  {}. {} ({})\n", i + 1, citation.title, citation.uri));
        }
    }

    out
}

/// Prints one turn: speaker tag, HH:MM timestamp, text, grounding sections
pub fn print_turn(turn: &Turn) {
    let stamp = turn
        .created_at
        .with_timezone(&chrono::Local)
        .format("%H:%M")
        .to_string();
    println!("{} {}", speaker_tag(turn.speaker), stamp.dimmed());
    println!("{}", turn.text);

    let citations = format_citations(turn);
    if !citations.is_empty() {
        println!("\n{}", citations.trim_end());
    }
    println!();
}

/// Prints the chat banner with the location badge and emergency footer
pub fn print_banner(model: &str, coords: Option<Coordinates>) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                  Sahaay - Relief Support AI                  ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    println!("Model:    {}", model);
    match coords {
        Some(coords) => println!("Location: {} ({})", "GPS active".green(), coords),
        None => println!("Location: {}", "not set".yellow()),
    }
    println!("\nType '/help' for available commands, 'exit' to quit");
    println!("{}\n", prompts::EMERGENCY_FOOTER.dimmed());
}

/// Prints the quick-start questions
pub fn print_suggestions() {
    println!("{}", "Try asking:".bold());
    for question in prompts::SUGGESTED_QUESTIONS {
        println!("  - {}", question);
    }
    println!();
}

/// Prints session status: model, recorded turns, and location state
pub fn print_status(model: &str, turns: usize, coords: Option<Coordinates>) {
    println!("\n{}", "Session Status".bold());
    println!("Model:    {}", model);
    println!("Turns:    {}", turns);
    match coords {
        Some(coords) => println!("Location: GPS active ({})", coords),
        None => println!("Location: no location"),
    }
    println!();
}
