//! Job application assistant library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{JobAssistantError, Result};
pub use processing::analyzer::{ApplicationAnalysis, ApplicationAnalyzer, ApplicationInput, ProfileInput};
