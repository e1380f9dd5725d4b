//! Locations of the two published CSV datasets.

use crate::error::DashboardError;

pub const QUIZ_DATA_ENV: &str = "QUIZ_DATA_URL";
pub const QUESTION_DATA_ENV: &str = "QUESTION_DATA_URL";

/// Where to read each dataset from. A location is either an `http(s)` URL
/// or a path to a local CSV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub quiz_data_url: String,
    pub question_data_url: String,
}

impl DashboardConfig {
    /// Builds a config from explicit values, falling back to the
    /// `QUIZ_DATA_URL` / `QUESTION_DATA_URL` environment variables.
    pub fn resolve(
        quiz_data_url: Option<String>,
        question_data_url: Option<String>,
    ) -> Result<Self, DashboardError> {
        let quiz = quiz_data_url.or_else(|| std::env::var(QUIZ_DATA_ENV).ok());
        let question = question_data_url.or_else(|| std::env::var(QUESTION_DATA_ENV).ok());
        Self::new(quiz, question)
    }

    pub fn new(
        quiz_data_url: Option<String>,
        question_data_url: Option<String>,
    ) -> Result<Self, DashboardError> {
        Ok(Self {
            quiz_data_url: validate(QUIZ_DATA_ENV, quiz_data_url)?,
            question_data_url: validate(QUESTION_DATA_ENV, question_data_url)?,
        })
    }
}

fn validate(name: &str, value: Option<String>) -> Result<String, DashboardError> {
    let value = value.map(|v| v.trim().to_string()).unwrap_or_default();
    if value.is_empty() {
        return Err(DashboardError::Configuration(format!("{name} is not set")));
    }
    if is_placeholder(&value) {
        return Err(DashboardError::Configuration(format!(
            "{name} still holds the placeholder value"
        )));
    }
    Ok(value)
}

// Unedited template values look like `YOUR_MASTER_QUIZ_DATA_CSV_URL_HERE`.
fn is_placeholder(value: &str) -> bool {
    value.starts_with("YOUR_") && value.ends_with("_HERE")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_urls_and_paths() {
        let config = DashboardConfig::new(
            Some("https://example.com/quizzes.csv".into()),
            Some(" data/questions.csv ".into()),
        )
        .unwrap();
        assert_eq!(config.quiz_data_url, "https://example.com/quizzes.csv");
        assert_eq!(config.question_data_url, "data/questions.csv");
    }

    #[test]
    fn test_missing_location_is_configuration_error() {
        let result = DashboardConfig::new(None, Some("q.csv".into()));
        assert!(matches!(result, Err(DashboardError::Configuration(_))));
    }

    #[test]
    fn test_blank_location_is_configuration_error() {
        let result = DashboardConfig::new(Some("m.csv".into()), Some("   ".into()));
        assert!(matches!(result, Err(DashboardError::Configuration(_))));
    }

    #[test]
    fn test_placeholder_is_configuration_error() {
        let result = DashboardConfig::new(
            Some("YOUR_MASTER_QUIZ_DATA_CSV_URL_HERE".into()),
            Some("q.csv".into()),
        );
        assert!(matches!(result, Err(DashboardError::Configuration(_))));
    }

    #[test]
    fn test_resolve_falls_back_to_environment() {
        // No other test reads these variables.
        unsafe {
            std::env::set_var(QUIZ_DATA_ENV, "env/quizzes.csv");
            std::env::set_var(QUESTION_DATA_ENV, "env/questions.csv");
        }

        let from_env = DashboardConfig::resolve(None, None).unwrap();
        assert_eq!(from_env.quiz_data_url, "env/quizzes.csv");
        assert_eq!(from_env.question_data_url, "env/questions.csv");

        let explicit = DashboardConfig::resolve(Some("a.csv".into()), None).unwrap();
        assert_eq!(explicit.quiz_data_url, "a.csv");
        assert_eq!(explicit.question_data_url, "env/questions.csv");

        unsafe {
            std::env::remove_var(QUIZ_DATA_ENV);
            std::env::remove_var(QUESTION_DATA_ENV);
        }
        let unset = DashboardConfig::resolve(None, Some("b.csv".into()));
        assert!(matches!(unset, Err(DashboardError::Configuration(_))));
    }
}
