//! The in-memory record store and the load phase that fills it.
//!
//! Both datasets are fetched concurrently and written exactly once. After
//! [`LoadOutcome::into_ready`] hands out the [`DataStore`] it is only read.

use std::collections::HashSet;

use tracing::{info, warn};

use crate::config::DashboardConfig;
use crate::error::{DashboardError, Dataset};
use crate::fetch::{HttpClient, fetch_source};
use crate::model::{QuestionRecord, QuizRecord, normalize_questions, normalize_quizzes};
use crate::parser::{RawRow, parse_rows};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataStore {
    quizzes: Vec<QuizRecord>,
    questions: Vec<QuestionRecord>,
}

/// Result of a load attempt. Each dataset succeeds or fails on its own; a
/// failed dataset is left empty and its error recorded in `failures`.
#[derive(Debug)]
pub struct LoadOutcome {
    pub store: DataStore,
    pub failures: Vec<DashboardError>,
}

impl LoadOutcome {
    pub fn is_ready(&self) -> bool {
        self.failures.is_empty() && !self.store.quizzes.is_empty()
    }

    /// Returns the store when both datasets loaded and quiz results are
    /// present. Question data may legitimately be empty.
    pub fn into_ready(self) -> Result<DataStore, DashboardError> {
        if let Some(err) = self.failures.into_iter().next() {
            return Err(err);
        }
        if self.store.quizzes.is_empty() {
            return Err(DashboardError::EmptyDataset);
        }
        Ok(self.store)
    }
}

impl DataStore {
    pub fn new(quizzes: Vec<QuizRecord>, questions: Vec<QuestionRecord>) -> Self {
        Self { quizzes, questions }
    }

    pub fn quizzes(&self) -> &[QuizRecord] {
        &self.quizzes
    }

    pub fn questions(&self) -> &[QuestionRecord] {
        &self.questions
    }

    /// Fetches both configured datasets concurrently and normalizes them.
    #[tracing::instrument(skip_all, fields(quiz = %config.quiz_data_url, question = %config.question_data_url))]
    pub async fn load<C: HttpClient + ?Sized>(config: &DashboardConfig, client: &C) -> LoadOutcome {
        info!("Fetching all student data");
        let (quiz_bytes, question_bytes) = tokio::join!(
            fetch_source(client, &config.quiz_data_url),
            fetch_source(client, &config.question_data_url),
        );

        let quizzes = quiz_bytes.map_err(|e| fetch_error(Dataset::QuizResults, e));
        let questions = question_bytes.map_err(|e| fetch_error(Dataset::QuestionDetail, e));

        Self::assemble(
            quizzes.and_then(|b| ingest(Dataset::QuizResults, &b, normalize_quizzes)),
            questions.and_then(|b| ingest(Dataset::QuestionDetail, &b, normalize_questions)),
        )
    }

    /// Builds a store from CSV text already in hand.
    pub fn from_csv(quiz_csv: &[u8], question_csv: &[u8]) -> LoadOutcome {
        Self::assemble(
            ingest(Dataset::QuizResults, quiz_csv, normalize_quizzes),
            ingest(Dataset::QuestionDetail, question_csv, normalize_questions),
        )
    }

    fn assemble(
        quizzes: Result<Vec<QuizRecord>, DashboardError>,
        questions: Result<Vec<QuestionRecord>, DashboardError>,
    ) -> LoadOutcome {
        let mut failures = Vec::new();
        let quizzes = quizzes.unwrap_or_else(|e| {
            warn!(error = %e, "Quiz results unavailable");
            failures.push(e);
            Vec::new()
        });
        let questions = questions.unwrap_or_else(|e| {
            warn!(error = %e, "Question data unavailable");
            failures.push(e);
            Vec::new()
        });

        info!(
            quizzes = quizzes.len(),
            questions = questions.len(),
            failures = failures.len(),
            "Load complete"
        );

        LoadOutcome {
            store: DataStore { quizzes, questions },
            failures,
        }
    }

    /// Distinct lowercased student ids in first-seen order.
    pub fn student_ids(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.quizzes
            .iter()
            .map(|record| record.student_id.to_lowercase())
            .filter(|id| seen.insert(id.clone()))
            .collect()
    }
}

fn fetch_error(dataset: Dataset, e: anyhow::Error) -> DashboardError {
    DashboardError::Fetch {
        dataset,
        message: format!("{e:#}"),
    }
}

fn ingest<T>(
    dataset: Dataset,
    bytes: &[u8],
    normalize: fn(Vec<RawRow>) -> Vec<T>,
) -> Result<Vec<T>, DashboardError> {
    let rows = parse_rows(bytes).map_err(|e| DashboardError::Parse {
        dataset,
        message: e.to_string(),
    })?;
    Ok(normalize(rows))
}
