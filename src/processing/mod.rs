//! Text processing and analysis module
//! Vocabulary-driven extraction, matching and gap analysis

pub mod vocabulary;
pub mod sectionizer;
pub mod requirements;
pub mod achievements;
pub mod matcher;
pub mod gaps;
pub mod analyzer;
