//! Error kinds surfaced to the presentation layer.
//!
//! Each variant's `Display` text is the status message shown to the user.

use std::fmt;

use thiserror::Error;

/// The two published datasets the dashboard reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    QuizResults,
    QuestionDetail,
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dataset::QuizResults => write!(f, "Master Quiz Data"),
            Dataset::QuestionDetail => write!(f, "Question Data"),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum DashboardError {
    #[error("ERROR: dashboard CSV sources are not configured ({0}). Please contact support.")]
    Configuration(String),

    #[error("Error fetching {dataset}: {message}. Please check the sources are public and correctly published.")]
    Fetch { dataset: Dataset, message: String },

    #[error("Error parsing {dataset}. {message}")]
    Parse { dataset: Dataset, message: String },

    #[error("No data found in the source files or error loading. Please contact support.")]
    EmptyDataset,

    #[error("No data found for Gmail ID: {id}. Please check the ID or ensure data is available.")]
    NoMatch { id: String },

    #[error("Student Gmail ID cannot be empty.")]
    EmptyInput,
}

impl DashboardError {
    /// Load-phase errors leave the dashboard not ready; lookup errors can be
    /// retried immediately with another identifier.
    pub fn is_terminal(&self) -> bool {
        !matches!(
            self,
            DashboardError::NoMatch { .. } | DashboardError::EmptyInput
        )
    }
}
