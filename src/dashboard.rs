//! The lookup command: one identifier in, one report (or status) out.

use tracing::{debug, info};

use crate::analyzers::types::StudentReport;
use crate::analyzers::view::build_report;
use crate::error::DashboardError;
use crate::filter::select_student;
use crate::store::DataStore;

/// A ready dashboard over a loaded store. Lookups never modify the store, so
/// a failed lookup leaves everything intact for the next attempt.
#[derive(Debug, Clone)]
pub struct Dashboard {
    store: DataStore,
}

impl Dashboard {
    pub fn new(store: DataStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    /// Filters the store for `input` and builds the student's report.
    ///
    /// # Errors
    ///
    /// [`DashboardError::EmptyInput`] for a blank identifier and
    /// [`DashboardError::NoMatch`] when no quiz records belong to it.
    pub fn lookup(&self, input: &str) -> Result<StudentReport, DashboardError> {
        let id = input.trim();
        if id.is_empty() {
            return Err(DashboardError::EmptyInput);
        }

        let view = select_student(self.store.quizzes(), self.store.questions(), id);
        debug!(
            quizzes = view.quizzes.len(),
            questions = view.questions.len(),
            "Student records selected"
        );
        if view.is_empty() {
            return Err(DashboardError::NoMatch { id: id.to_string() });
        }

        let report = build_report(id, &view);
        info!(student = %report.student_id, "Report built");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dashboard() -> Dashboard {
        let quizzes = "StudentGmailID,Source,QuizName,AttemptedOn,Score\n\
                       a@x.com,Canvas,Unit 1,2024-01-01,8\n";
        let store = DataStore::from_csv(quizzes.as_bytes(), b"StudentGmailID\n")
            .into_ready()
            .unwrap();
        Dashboard::new(store)
    }

    #[test]
    fn test_blank_input_is_rejected() {
        assert_eq!(dashboard().lookup("   "), Err(DashboardError::EmptyInput));
    }

    #[test]
    fn test_unknown_id_is_no_match() {
        let result = dashboard().lookup("nobody@x.com");
        assert_eq!(
            result,
            Err(DashboardError::NoMatch {
                id: "nobody@x.com".to_string()
            })
        );
    }

    #[test]
    fn test_lookup_trims_and_ignores_case() {
        let report = dashboard().lookup("  A@X.COM ").unwrap();
        assert_eq!(report.student_id, "a@x.com");
        assert_eq!(report.all_quizzes.len(), 1);
    }

    #[test]
    fn test_store_survives_failed_lookup() {
        let dashboard = dashboard();
        assert!(dashboard.lookup("nobody@x.com").is_err());
        assert!(dashboard.lookup("a@x.com").is_ok());
        assert_eq!(dashboard.store().quizzes().len(), 1);
    }
}
