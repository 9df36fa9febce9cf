//! Provider module for Sahaay
//!
//! This module contains the grounded model abstraction and the Gemini
//! implementation behind the relief chat.

pub mod base;
pub mod gemini;

pub use base::GroundedModel;
pub use gemini::GeminiProvider;

use crate::config::ModelConfig;
use crate::error::Result;

/// Create a model backend instance from configuration
///
/// # Arguments
///
/// * `backend` - Backend name (currently only "gemini")
/// * `config` - Model configuration
///
/// # Returns
///
/// Returns a boxed model instance
///
/// # Errors
///
/// Returns error if the backend name is unknown or initialization fails
pub fn create_provider(backend: &str, config: &ModelConfig) -> Result<Box<dyn GroundedModel>> {
    match backend {
        "gemini" => Ok(Box::new(GeminiProvider::new(config.clone())?)),
        _ => Err(
            crate::error::SahaayError::Provider(format!("Unknown model backend: {}", backend))
                .into(),
        ),
    }
}
