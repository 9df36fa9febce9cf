//! Special commands parser for interactive chat mode
//!
//! This module parses and handles special commands that can be entered during
//! interactive relief chat sessions. Special commands allow users to:
//! - View session status (model, turn count, location)
//! - Show quick-start question suggestions
//! - Clear the conversation and start fresh
//! - Display help information
//! - Exit the session
//!
//! Commands are prefixed with `/` and are case-insensitive.

use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command was given an unsupported argument
    #[error("Unsupported argument for {command}: {arg}\n\nType '/help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },
}

/// Special commands that can be executed during interactive chat
///
/// These commands inspect or reset the session state rather than being
/// sent to the assistant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Display help information
    ///
    /// Shows all available special commands and their usage.
    Help,

    /// Display session status
    ///
    /// Shows the active model, the number of recorded turns, and whether
    /// a location is set for grounding.
    Status,

    /// Display quick-start question suggestions
    ///
    /// Shows common relief questions to get the conversation going.
    Suggest,

    /// Clear the conversation and start fresh
    ///
    /// Resets the transcript to a new welcome message.
    New,

    /// Exit the interactive session
    ///
    /// Gracefully closes the chat session.
    Exit,

    /// Not a special command
    ///
    /// The input should be sent to the assistant as a regular message.
    None,
}

/// Parse a user input string into a special command
///
/// Checks if the input matches any special command pattern.
/// Commands are case-insensitive and may have multiple aliases.
///
/// # Arguments
///
/// * `input` - The user input string to parse
///
/// # Returns
///
/// Returns Ok(SpecialCommand) for valid commands or SpecialCommand::None for non-commands.
/// Returns Err(CommandError) for invalid commands or invalid arguments.
///
/// # Errors
///
/// Returns CommandError::UnknownCommand if input starts with "/" but is not a valid command.
/// Returns CommandError::UnsupportedArgument if a command receives an argument.
///
/// # Examples
///
/// ```
/// use sahaay::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// let cmd = parse_special_command("/status").unwrap();
/// assert_eq!(cmd, SpecialCommand::Status);
///
/// let cmd = parse_special_command("/new").unwrap();
/// assert_eq!(cmd, SpecialCommand::New);
///
/// let cmd = parse_special_command("where is the nearest shelter?").unwrap();
/// assert_eq!(cmd, SpecialCommand::None);
///
/// // Invalid command returns error
/// assert!(parse_special_command("/foo").is_err());
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    // If input doesn't start with "/", it's not a command (except exit/quit)
    if !trimmed.starts_with('/') && lower != "exit" && lower != "quit" {
        return Ok(SpecialCommand::None);
    }

    match lower.as_str() {
        // Status, suggestions, and help
        "/status" => Ok(SpecialCommand::Status),
        "/suggest" | "/suggestions" => Ok(SpecialCommand::Suggest),
        "/help" | "/?" => Ok(SpecialCommand::Help),

        // Conversation reset
        "/new" | "/reset" => Ok(SpecialCommand::New),

        // Exit commands
        "exit" | "quit" | "/exit" | "/quit" => Ok(SpecialCommand::Exit),

        // None of these commands take arguments
        input if input.starts_with("/status ") => {
            let arg = input[8..].trim();
            Err(CommandError::UnsupportedArgument {
                command: "/status".to_string(),
                arg: arg.to_string(),
            })
        }
        input if input.starts_with("/suggest ") => {
            let arg = input[9..].trim();
            Err(CommandError::UnsupportedArgument {
                command: "/suggest".to_string(),
                arg: arg.to_string(),
            })
        }
        input if input.starts_with("/help ") => {
            let arg = input[6..].trim();
            Err(CommandError::UnsupportedArgument {
                command: "/help".to_string(),
                arg: arg.to_string(),
            })
        }
        input if input.starts_with("/new ") => {
            let arg = input[5..].trim();
            Err(CommandError::UnsupportedArgument {
                command: "/new".to_string(),
                arg: arg.to_string(),
            })
        }

        // Unknown command starting with "/"
        input if input.starts_with('/') => {
            let cmd = input.split_whitespace().next().unwrap_or(input);
            Err(CommandError::UnknownCommand(cmd.to_string()))
        }

        // Not a special command
        _ => Ok(SpecialCommand::None),
    }
}

/// Display help text for special commands
///
/// Shows all available special commands with their descriptions
/// and usage examples.
///
/// # Examples
///
/// ```
/// use sahaay::commands::special_commands::print_help;
///
/// print_help();
/// ```
pub fn print_help() {
    println!(
        r#"
Special Commands for Relief Chat
================================

SESSION INFORMATION:
  /status         - Show the model, turn count, and location status
  /suggest        - Show quick-start relief questions
  /suggestions    - Same as /suggest
  /help           - Show this help message
  /?              - Same as /help

SESSION CONTROL:
  /new            - Clear the conversation and start fresh
  /reset          - Same as /new
  exit            - Exit the chat
  quit            - Same as exit

NOTES:
  - Commands are case-insensitive
  - Regular text (not starting with /) is sent to the relief assistant
  - Set a location with --location or in the config so answers can be
    grounded on nearby shelters, hospitals, and supply points
  - For immediate medical emergencies, dial 112
"#
    );
}
