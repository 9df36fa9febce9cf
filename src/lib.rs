//! Sahaay - Emergency relief chat assistant library
//!
//! This library provides the core functionality for Sahaay, an emergency
//! relief assistant that answers with live map grounding: conversation
//! transcripts, the grounded model abstraction, session orchestration, and
//! configuration.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `transcript`: Conversation turns, speakers, and citations
//! - `session`: Conversation state and the single-reply-in-flight guard
//! - `providers`: Grounded model abstraction and the Gemini implementation
//! - `location`: Coordinate parsing, validation, and resolution
//! - `render`: Terminal presentation of turns and grounding sections
//! - `prompts`: Model directive and fixed user-facing message text
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//! - `commands`: Command handlers invoked by the CLI entrypoint
//!
//! # Example
//!
//! ```no_run
//! use sahaay::providers::create_provider;
//! use sahaay::{Config, Session};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let provider = create_provider(&config.model.backend, &config.model)?;
//!     let session = Session::new(provider, None);
//!     let reply = session.submit("Where are relief camps near me?").await?;
//!     println!("{}", reply.text);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod location;
pub mod prompts;
pub mod providers;
pub mod render;
pub mod session;
pub mod transcript;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, SahaayError};
pub use location::Coordinates;
pub use session::Session;
pub use transcript::{Citation, Speaker, Transcript, Turn};
