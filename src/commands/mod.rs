/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes two top-level command modules:

- `chat` - Interactive relief chat mode
- `ask`  - One-shot question mode

These handlers are intentionally small and use the library components:
config, providers, session, and render.
*/

use crate::commands::special_commands::{parse_special_command, print_help, SpecialCommand};
use crate::config::Config;
use crate::error::Result;
use crate::location;
use crate::providers::create_provider;
use crate::render;
use crate::session::Session;

// Special commands parser for the interactive loop
pub mod special_commands;

/// Construct a chat session from configuration and CLI overrides
///
/// # Arguments
///
/// * `config` - Global configuration
/// * `backend` - Optional override for the configured backend
/// * `model` - Optional override for the configured model name
///
/// # Returns
///
/// Returns a session seeded with the welcome turn, or an error if the
/// backend is unknown or the provider cannot be constructed.
fn build_session(config: &Config, backend: Option<&str>, model: Option<String>) -> Result<Session> {
    let mut model_config = config.model.clone();
    if let Some(model) = model {
        model_config.model = model;
    }

    let backend = backend.unwrap_or(&config.model.backend);
    let provider = create_provider(backend, &model_config)?;
    let coords = location::resolve(&config.location);

    Ok(Session::new(provider, coords))
}

// Chat command handler
pub mod chat {
    //! Interactive relief chat mode handler.
    //!
    //! Builds a session around the configured model and runs a
    //! readline-based loop that submits user input and prints the grounded
    //! replies. Slash commands are intercepted before anything reaches the
    //! model.

    use super::*;
    use colored::Colorize;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    /// Start interactive relief chat mode
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    /// * `backend` - Optional override for the configured backend
    /// * `model` - Optional override for the configured model name
    ///
    /// # Examples
    ///
    /// ```
    /// use sahaay::commands::chat;
    /// use sahaay::config::Config;
    ///
    /// // In application code:
    /// // chat::run_chat(Config::default(), None, None).await?;
    /// ```
    pub async fn run_chat(
        config: Config,
        backend: Option<String>,
        model: Option<String>,
    ) -> Result<()> {
        let session = build_session(&config, backend.as_deref(), model)?;
        let suggestion_cutoff = config.chat.suggestion_cutoff;

        // Create readline instance
        let mut rl = DefaultEditor::new()?;

        render::print_banner(&session.model_name(), session.coordinates());
        if let Some(welcome) = session.snapshot().first() {
            render::print_turn(welcome);
        }
        if session.len() < suggestion_cutoff {
            render::print_suggestions();
        }

        loop {
            match rl.readline(">> ") {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    // Check for special commands first
                    match parse_special_command(trimmed) {
                        Ok(SpecialCommand::Help) => {
                            print_help();
                            continue;
                        }
                        Ok(SpecialCommand::Status) => {
                            render::print_status(
                                &session.model_name(),
                                session.len(),
                                session.coordinates(),
                            );
                            continue;
                        }
                        Ok(SpecialCommand::Suggest) => {
                            if session.len() < suggestion_cutoff {
                                render::print_suggestions();
                            } else {
                                println!("The conversation is well underway; ask anything.\n");
                            }
                            continue;
                        }
                        Ok(SpecialCommand::New) => {
                            session.reset()?;
                            println!("Started a new conversation.\n");
                            if let Some(welcome) = session.snapshot().first() {
                                render::print_turn(welcome);
                            }
                            continue;
                        }
                        Ok(SpecialCommand::Exit) => break,
                        Ok(SpecialCommand::None) => {
                            // Regular relief question
                        }
                        Err(e) => {
                            eprintln!("{}\n", e);
                            continue;
                        }
                    }

                    // Add to history
                    rl.add_history_entry(trimmed)?;

                    println!("{}", "Searching map resources...".dimmed().italic());

                    match session.submit(trimmed).await {
                        Ok(reply) => {
                            println!();
                            render::print_turn(&reply);
                        }
                        Err(e) => {
                            eprintln!("Error: {}\n", e);
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }

        println!("Goodbye! Stay safe.");
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        /// Unknown backend should return an error quickly during provider creation
        #[tokio::test]
        async fn test_run_chat_unknown_backend() {
            let mut cfg = Config::default();
            cfg.model.backend = "invalid_backend".to_string();

            let res = run_chat(cfg, None, None).await;
            assert!(res.is_err());
        }

        #[tokio::test]
        async fn test_run_chat_backend_override_beats_config() {
            let cfg = Config::default();

            let res = run_chat(cfg, Some("invalid_backend".to_string()), None).await;
            assert!(res.is_err());
        }
    }
}

/// Ask command handler
///
/// This module provides `run_ask` which submits one question and prints the
/// grounded reply without entering the interactive loop.
pub mod ask {
    use super::*;

    /// Ask a single question and print the reply
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    /// * `message` - The question to submit
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot be constructed or the message
    /// is empty. Transport failures do not error; they produce the fixed
    /// fallback reply.
    pub async fn run_ask(config: Config, message: String) -> Result<()> {
        let session = build_session(&config, None, None)?;
        let reply = session.submit(&message).await?;
        render::print_turn(&reply);

        Ok(())
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_session_uses_configured_location() {
        let mut cfg = Config::default();
        cfg.location.latitude = Some(19.076);
        cfg.location.longitude = Some(72.8777);

        let session = build_session(&cfg, None, None).unwrap();
        assert!(session.coordinates().is_some());
    }

    #[test]
    fn test_build_session_without_location() {
        let cfg = Config::default();

        let session = build_session(&cfg, None, None).unwrap();
        assert!(session.coordinates().is_none());
    }

    #[test]
    fn test_build_session_applies_model_override() {
        let cfg = Config::default();

        let session = build_session(&cfg, None, Some("gemini-2.5-pro".to_string())).unwrap();
        assert_eq!(session.model_name(), "gemini-2.5-pro");
    }

    #[test]
    fn test_build_session_unknown_backend_fails() {
        let cfg = Config::default();

        let res = build_session(&cfg, Some("llama"), None);
        assert!(res.is_err());
    }
}
