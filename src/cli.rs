//! Command-line interface definition for Sahaay
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for the interactive relief chat and one-shot
//! questions.

use clap::{Parser, Subcommand};

/// Sahaay - Emergency relief chat assistant
///
/// Find shelters, hospitals, and aid centers through a conversation
/// grounded in live map data.
#[derive(Parser, Debug, Clone)]
#[command(name = "sahaay")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml", env = "SAHAAY_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Latitude in degrees, used to bias map lookups
    #[arg(long, allow_negative_numbers = true)]
    pub latitude: Option<f64>,

    /// Longitude in degrees, used to bias map lookups
    #[arg(long, allow_negative_numbers = true)]
    pub longitude: Option<f64>,

    /// Location as a "lat,lon" pair (alternative to --latitude/--longitude)
    #[arg(short, long)]
    pub location: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Sahaay
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive relief chat session
    Chat {
        /// Override the model backend from config (gemini)
        #[arg(short, long)]
        backend: Option<String>,

        /// Override the model name from config
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Send a single question and print the reply
    Ask {
        /// The question to send
        message: String,
    },
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            latitude: None,
            longitude: None,
            location: None,
            command: Commands::Chat {
                backend: None,
                model: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default() {
        let cli = Cli::default();
        assert_eq!(cli.config, Some("config/config.yaml".to_string()));
        assert!(!cli.verbose);
        assert!(cli.latitude.is_none());
        assert!(cli.location.is_none());

        if let Commands::Chat { backend, model } = cli.command {
            assert_eq!(backend, None);
            assert_eq!(model, None);
        } else {
            panic!("Expected default command to be Chat");
        }
    }

    #[test]
    fn test_cli_parse_chat_command() {
        let cli = Cli::try_parse_from(["sahaay", "chat"]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        assert!(matches!(cli.command, Commands::Chat { .. }));
    }

    #[test]
    fn test_cli_parse_chat_with_backend() {
        let cli = Cli::try_parse_from(["sahaay", "chat", "--backend", "gemini"]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        if let Commands::Chat { backend, model: _ } = cli.command {
            assert_eq!(backend, Some("gemini".to_string()));
        } else {
            panic!("Expected Chat command");
        }
    }

    #[test]
    fn test_cli_parse_chat_with_model() {
        let cli = Cli::try_parse_from(["sahaay", "chat", "--model", "gemini-2.5-pro"]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        if let Commands::Chat { backend, model } = cli.command {
            assert_eq!(backend, None);
            assert_eq!(model, Some("gemini-2.5-pro".to_string()));
        } else {
            panic!("Expected Chat command");
        }
    }

    #[test]
    fn test_cli_parse_ask_with_message() {
        let cli = Cli::try_parse_from(["sahaay", "ask", "Is there a flood risk here?"]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        if let Commands::Ask { message } = cli.command {
            assert_eq!(message, "Is there a flood risk here?");
        } else {
            panic!("Expected Ask command");
        }
    }

    #[test]
    fn test_cli_parse_ask_requires_message() {
        let cli = Cli::try_parse_from(["sahaay", "ask"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_cli_parse_coordinate_flags() {
        let cli = Cli::try_parse_from([
            "sahaay",
            "--latitude",
            "19.07",
            "--longitude",
            "72.87",
            "chat",
        ]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        assert_eq!(cli.latitude, Some(19.07));
        assert_eq!(cli.longitude, Some(72.87));
    }

    #[test]
    fn test_cli_parse_negative_coordinates() {
        let cli = Cli::try_parse_from([
            "sahaay",
            "--latitude",
            "-33.86",
            "--longitude",
            "151.21",
            "chat",
        ]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        assert_eq!(cli.latitude, Some(-33.86));
    }

    #[test]
    fn test_cli_parse_location_pair() {
        let cli = Cli::try_parse_from(["sahaay", "--location", "19.07,72.87", "chat"]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        assert_eq!(cli.location, Some("19.07,72.87".to_string()));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::try_parse_from(["sahaay", "--config", "custom.yaml", "chat"]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        assert_eq!(cli.config, Some("custom.yaml".to_string()));
    }

    #[test]
    fn test_cli_parse_with_verbose() {
        let cli = Cli::try_parse_from(["sahaay", "-v", "chat"]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_parse_missing_command() {
        let cli = Cli::try_parse_from(["sahaay"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_cli_parse_invalid_command() {
        let cli = Cli::try_parse_from(["sahaay", "invalid"]);
        assert!(cli.is_err());
    }
}
