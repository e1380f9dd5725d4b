//! Data types produced by aggregation and handed to the presenter.

use serde::Serialize;

use crate::format::{NOT_AVAILABLE, format_number};
use crate::model::{QuizRecord, Score};

/// Correct/total counts for one skill tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillAccuracy {
    pub skill: String,
    pub correct: usize,
    pub total: usize,
    /// 0–100, unrounded.
    pub accuracy: f64,
}

/// One practice test on the score-trend line chart. Values that are not
/// plain numbers are `None` and leave a gap in the series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub label: String,
    pub total: Option<f64>,
    pub verbal: Option<f64>,
    pub math: Option<f64>,
}

/// Summary statistics derived from one student's records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentSummary {
    pub latest_practice_test: Option<QuizRecord>,
    pub overall_score: Score,
    pub verbal_score: Score,
    pub math_score: Score,
    /// Mean quiz percentage rounded to a whole number.
    pub average_quiz_score: Option<f64>,
    pub skill_accuracy: Vec<SkillAccuracy>,
    pub score_trend: Vec<TrendPoint>,
}

impl StudentSummary {
    pub fn average_quiz_display(&self) -> String {
        match self.average_quiz_score {
            Some(avg) => format!("{}%", format_number(avg)),
            None => NOT_AVAILABLE.to_string(),
        }
    }
}

/// A headline figure on the overview tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewCard {
    pub title: String,
    pub value: String,
    pub unit: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PracticeTestRow {
    pub quiz_id: Option<String>,
    pub quiz_name: String,
    pub date: String,
    pub verbal_score: String,
    pub math_score: String,
    pub overall_score: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizRow {
    pub quiz_name: String,
    pub source: String,
    pub date: String,
    pub score: String,
    pub points_possible: String,
    pub skill_tag: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionRow {
    /// Question id, or the 1-based position when the id is blank.
    pub number: String,
    pub student_answer: String,
    pub is_correct: bool,
    pub correctness: String,
    pub skill_tag: String,
}

/// Question breakdown for the student's most recent Canvas quiz. Empty when
/// the student has no Canvas quiz at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QuestionDetail {
    pub quiz_id: Option<String>,
    pub quiz_name: Option<String>,
    pub rows: Vec<QuestionRow>,
}

impl QuestionDetail {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Everything the presenter needs to draw one student's dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentReport {
    pub student_id: String,
    pub status: String,
    pub cards: Vec<OverviewCard>,
    pub score_trend: Vec<TrendPoint>,
    pub skill_accuracy: Vec<SkillAccuracy>,
    pub practice_tests: Vec<PracticeTestRow>,
    pub all_quizzes: Vec<QuizRow>,
    pub question_detail: QuestionDetail,
}
