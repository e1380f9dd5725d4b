//! Typed quiz and question records, normalized once from raw CSV rows.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::format::{NOT_AVAILABLE, format_day, format_number};
use crate::parser::{CellValue, RawRow, parse_decimal};

pub const COL_STUDENT_ID: &str = "StudentGmailID";
pub const COL_SOURCE: &str = "Source";
pub const COL_QUIZ_ID: &str = "QuizID";
pub const COL_QUIZ_NAME: &str = "QuizName";
pub const COL_ATTEMPTED_ON: &str = "AttemptedOn";
pub const COL_SCORE: &str = "Score";
pub const COL_POINTS_POSSIBLE: &str = "PointsPossible";
pub const COL_VERBAL_SCORE: &str = "VerbalScore";
pub const COL_MATH_SCORE: &str = "MathScore";
pub const COL_SKILL_TAG: &str = "SAT_Skill_Tag";
pub const COL_QUIZ_ID_CANVAS: &str = "QuizID_Canvas";
pub const COL_QUESTION_ID: &str = "QuestionID_Normalized";
pub const COL_STUDENT_ANSWER: &str = "StudentAnswer_fromCSV";
pub const COL_IS_CORRECT: &str = "IsCorrect";

pub const UNCATEGORIZED: &str = "Uncategorized";

/// Where a quiz or test attempt came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum QuizSource {
    /// `Canvas`
    CanvasQuiz,
    /// `Canvas CB Test`, a full College Board practice test.
    CanvasTest,
    /// `Khan Academy`
    KhanAcademy,
    /// Any other label; kept but excluded from every view.
    Other(String),
}

impl QuizSource {
    pub fn from_label(label: &str) -> Self {
        match label {
            "Canvas" => QuizSource::CanvasQuiz,
            "Canvas CB Test" => QuizSource::CanvasTest,
            "Khan Academy" => QuizSource::KhanAcademy,
            other => QuizSource::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            QuizSource::CanvasQuiz => "Canvas",
            QuizSource::CanvasTest => "Canvas CB Test",
            QuizSource::KhanAcademy => "Khan Academy",
            QuizSource::Other(label) => label,
        }
    }

    /// Canvas quizzes and Khan Academy exercises, the sources averaged together.
    pub fn is_quiz(&self) -> bool {
        matches!(self, QuizSource::CanvasQuiz | QuizSource::KhanAcademy)
    }
}

/// A score column, classified once at load time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Score {
    Numeric(f64),
    /// Text such as `85%`; holds the numeric part.
    Percentage(f64),
    /// Non-numeric text, kept verbatim for display.
    Text(String),
    Unavailable,
}

impl Score {
    pub fn from_cell(cell: &CellValue) -> Self {
        match cell {
            CellValue::Null => Score::Unavailable,
            CellValue::Number(n) => Score::Numeric(*n),
            other => {
                let text = other.to_string();
                match text.strip_suffix('%').and_then(|p| parse_decimal(p.trim())) {
                    Some(pct) => Score::Percentage(pct),
                    None => Score::Text(text),
                }
            }
        }
    }

    pub fn numeric(&self) -> Option<f64> {
        match self {
            Score::Numeric(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, Score::Unavailable)
    }

    pub fn display(&self) -> String {
        match self {
            Score::Numeric(n) => format_number(*n),
            Score::Percentage(p) => format!("{}%", format_number(*p)),
            Score::Text(text) => text.clone(),
            Score::Unavailable => NOT_AVAILABLE.to_string(),
        }
    }
}

/// When an attempt happened. Unparseable text (including the `N/A`
/// sentinel) is preserved as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AttemptedOn {
    At(DateTime<Utc>),
    Unparsed(String),
    Missing,
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

impl AttemptedOn {
    pub fn from_cell(cell: &CellValue) -> Self {
        match cell.as_text() {
            Some(text) => Self::parse(&text),
            None => AttemptedOn::Missing,
        }
    }

    pub fn parse(text: &str) -> Self {
        if let Ok(at) = DateTime::parse_from_rfc3339(text) {
            return AttemptedOn::At(at.with_timezone(&Utc));
        }
        for fmt in DATETIME_FORMATS {
            if let Ok(at) = NaiveDateTime::parse_from_str(text, fmt) {
                return AttemptedOn::At(at.and_utc());
            }
        }
        for fmt in DATE_FORMATS {
            if let Ok(day) = NaiveDate::parse_from_str(text, fmt) {
                if let Some(at) = day.and_hms_opt(0, 0, 0) {
                    return AttemptedOn::At(at.and_utc());
                }
            }
        }
        AttemptedOn::Unparsed(text.to_string())
    }

    /// Ordering key. Anything without a real timestamp sorts as the epoch.
    pub fn sort_key(&self) -> DateTime<Utc> {
        match self {
            AttemptedOn::At(at) => *at,
            _ => DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    pub fn display(&self) -> String {
        match self {
            AttemptedOn::At(at) => format_day(at),
            AttemptedOn::Unparsed(text) => text.clone(),
            AttemptedOn::Missing => NOT_AVAILABLE.to_string(),
        }
    }
}

/// One attempt at a quiz or practice test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizRecord {
    pub student_id: String,
    pub source: QuizSource,
    pub quiz_id: Option<String>,
    pub quiz_name: String,
    pub attempted_on: AttemptedOn,
    pub score: Score,
    pub points_possible: Option<f64>,
    pub verbal_score: Score,
    pub math_score: Score,
    pub skill_tag: Option<String>,
}

impl QuizRecord {
    /// Builds a record from a raw row, or `None` when the row has no student id.
    pub fn from_row(row: &RawRow) -> Option<Self> {
        let student_id = student_id(row)?;
        Some(QuizRecord {
            student_id,
            source: QuizSource::from_label(&row.text(COL_SOURCE).unwrap_or_default()),
            quiz_id: row.text(COL_QUIZ_ID),
            quiz_name: row.text(COL_QUIZ_NAME).unwrap_or_default(),
            attempted_on: AttemptedOn::from_cell(row.get(COL_ATTEMPTED_ON)),
            score: Score::from_cell(row.get(COL_SCORE)),
            points_possible: row.get(COL_POINTS_POSSIBLE).as_number(),
            verbal_score: Score::from_cell(row.get(COL_VERBAL_SCORE)),
            math_score: Score::from_cell(row.get(COL_MATH_SCORE)),
            skill_tag: row.text(COL_SKILL_TAG),
        })
    }

    pub fn belongs_to(&self, lowered_id: &str) -> bool {
        self.student_id.to_lowercase() == lowered_id
    }
}

/// One answered question within a Canvas quiz.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionRecord {
    pub student_id: String,
    pub quiz_id_ref: Option<String>,
    pub question_id: Option<String>,
    pub student_answer: Option<String>,
    pub is_correct: bool,
    pub skill_tag: Option<String>,
}

impl QuestionRecord {
    pub fn from_row(row: &RawRow) -> Option<Self> {
        let student_id = student_id(row)?;
        let is_correct = match row.get(COL_IS_CORRECT) {
            CellValue::Bool(b) => *b,
            CellValue::Text(text) => text == "TRUE",
            _ => false,
        };
        Some(QuestionRecord {
            student_id,
            quiz_id_ref: row.text(COL_QUIZ_ID_CANVAS),
            question_id: row.text(COL_QUESTION_ID),
            student_answer: row.text(COL_STUDENT_ANSWER),
            is_correct,
            skill_tag: row.text(COL_SKILL_TAG),
        })
    }

    pub fn belongs_to(&self, lowered_id: &str) -> bool {
        self.student_id.to_lowercase() == lowered_id
    }

    /// Skill bucket used for accuracy grouping; blank and `TBD` tags fall
    /// into `Uncategorized`.
    pub fn skill_group(&self) -> &str {
        match self.skill_tag.as_deref() {
            Some(tag) if !tag.is_empty() && tag != "TBD" => tag,
            _ => UNCATEGORIZED,
        }
    }
}

fn student_id(row: &RawRow) -> Option<String> {
    row.text(COL_STUDENT_ID).filter(|id| !id.is_empty())
}

/// Normalizes quiz-result rows, silently dropping rows without a student id.
pub fn normalize_quizzes<I: IntoIterator<Item = RawRow>>(rows: I) -> Vec<QuizRecord> {
    let mut dropped = 0usize;
    let records: Vec<_> = rows
        .into_iter()
        .filter_map(|row| {
            let record = QuizRecord::from_row(&row);
            if record.is_none() {
                dropped += 1;
            }
            record
        })
        .collect();
    debug!(kept = records.len(), dropped, "Quiz rows normalized");
    records
}

/// Normalizes question rows, silently dropping rows without a student id.
pub fn normalize_questions<I: IntoIterator<Item = RawRow>>(rows: I) -> Vec<QuestionRecord> {
    let mut dropped = 0usize;
    let records: Vec<_> = rows
        .into_iter()
        .filter_map(|row| {
            let record = QuestionRecord::from_row(&row);
            if record.is_none() {
                dropped += 1;
            }
            record
        })
        .collect();
    debug!(kept = records.len(), dropped, "Question rows normalized");
    records
}
