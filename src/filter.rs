//! Per-student selection over the loaded store.

use serde::Serialize;

use crate::model::{QuestionRecord, QuizRecord};

/// All records for one student, in input order. Rebuilt on every lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StudentView {
    pub quizzes: Vec<QuizRecord>,
    pub questions: Vec<QuestionRecord>,
}

impl StudentView {
    /// No quiz records matched. Question-only matches still count as empty.
    pub fn is_empty(&self) -> bool {
        self.quizzes.is_empty()
    }
}

/// Selects every record whose student id equals `id`, ignoring case.
pub fn select_student(quizzes: &[QuizRecord], questions: &[QuestionRecord], id: &str) -> StudentView {
    let lowered = id.to_lowercase();
    StudentView {
        quizzes: quizzes
            .iter()
            .filter(|q| q.belongs_to(&lowered))
            .cloned()
            .collect(),
        questions: questions
            .iter()
            .filter(|q| q.belongs_to(&lowered))
            .cloned()
            .collect(),
    }
}
