//! Shapes aggregated statistics and filtered records into render-ready rows.

use crate::analyzers::aggregate::{practice_tests, quiz_percentage, quizzes_only, summarize};
use crate::analyzers::types::{
    OverviewCard, PracticeTestRow, QuestionDetail, QuestionRow, QuizRow, StudentReport,
    StudentSummary,
};
use crate::analyzers::utility::newest_first;
use crate::filter::StudentView;
use crate::format::{NOT_AVAILABLE, format_number};
use crate::model::{QuizRecord, QuizSource, Score};

/// Assembles the full dashboard for one student.
pub fn build_report(student_id: &str, view: &StudentView) -> StudentReport {
    let summary = summarize(view);
    StudentReport {
        student_id: student_id.to_lowercase(),
        status: format!("Displaying data for {student_id}."),
        cards: overview_cards(&summary),
        practice_tests: practice_test_rows(&view.quizzes),
        all_quizzes: quiz_rows(&view.quizzes),
        question_detail: question_detail(view),
        score_trend: summary.score_trend,
        skill_accuracy: summary.skill_accuracy,
    }
}

fn card(title: &str, value: String, unit: &str, icon: &str) -> OverviewCard {
    OverviewCard {
        title: title.to_string(),
        value,
        unit: unit.to_string(),
        icon: icon.to_string(),
    }
}

/// The four fixed overview slots: latest total, verbal, math, quiz average.
pub fn overview_cards(summary: &StudentSummary) -> Vec<OverviewCard> {
    vec![
        card(
            "Latest SAT Practice Test",
            summary.overall_score.display(),
            "/ 1600",
            "target",
        ),
        card(
            "Latest Verbal Score (R&W)",
            summary.verbal_score.display(),
            "/ 800",
            "books",
        ),
        card(
            "Latest Math Score",
            summary.math_score.display(),
            "/ 800",
            "abacus",
        ),
        card(
            "Average Quiz Score",
            summary.average_quiz_display(),
            "(Canvas & Khan)",
            "bar-chart",
        ),
    ]
}

/// Practice tests, newest first.
pub fn practice_test_rows(quizzes: &[QuizRecord]) -> Vec<PracticeTestRow> {
    newest_first(practice_tests(quizzes))
        .into_iter()
        .map(|t| PracticeTestRow {
            quiz_id: t.quiz_id.clone(),
            quiz_name: t.quiz_name.clone(),
            date: t.attempted_on.display(),
            verbal_score: t.verbal_score.display(),
            math_score: t.math_score.display(),
            overall_score: t.score.display(),
        })
        .collect()
}

/// Canvas quizzes and Khan Academy exercises, newest first.
pub fn quiz_rows(quizzes: &[QuizRecord]) -> Vec<QuizRow> {
    newest_first(quizzes_only(quizzes))
        .into_iter()
        .map(|q| {
            let (score, points_possible) = score_columns(q);
            QuizRow {
                quiz_name: q.quiz_name.clone(),
                source: q.source.label().to_string(),
                date: q.attempted_on.display(),
                score,
                points_possible,
                skill_tag: or_not_available(q.skill_tag.as_deref()),
            }
        })
        .collect()
}

fn score_columns(q: &QuizRecord) -> (String, String) {
    let points = q
        .points_possible
        .map(format_number)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    if let (QuizSource::KhanAcademy, Score::Percentage(_)) = (&q.source, &q.score) {
        return (q.score.display(), "100%".to_string());
    }
    match quiz_percentage(q) {
        Some(pct) => (
            format!("{} ({}%)", q.score.display(), format_number(pct.round())),
            points,
        ),
        None => (q.score.display(), points),
    }
}

/// Question rows for the student's most recent Canvas quiz.
pub fn question_detail(view: &StudentView) -> QuestionDetail {
    let latest = newest_first(
        view.quizzes
            .iter()
            .filter(|q| q.source == QuizSource::CanvasQuiz),
    )
    .into_iter()
    .next();

    let Some(quiz) = latest else {
        return QuestionDetail::default();
    };

    let rows = match quiz.quiz_id.as_deref() {
        Some(quiz_id) => view
            .questions
            .iter()
            .filter(|q| q.quiz_id_ref.as_deref() == Some(quiz_id))
            .enumerate()
            .map(|(i, q)| QuestionRow {
                number: q
                    .question_id
                    .clone()
                    .unwrap_or_else(|| (i + 1).to_string()),
                student_answer: or_not_available(q.student_answer.as_deref()),
                is_correct: q.is_correct,
                correctness: correctness_label(q.is_correct).to_string(),
                skill_tag: or_not_available(q.skill_tag.as_deref()),
            })
            .collect(),
        None => Vec::new(),
    };

    QuestionDetail {
        quiz_id: quiz.quiz_id.clone(),
        quiz_name: Some(quiz.quiz_name.clone()),
        rows,
    }
}

fn correctness_label(is_correct: bool) -> &'static str {
    if is_correct { "Correct" } else { "Incorrect" }
}

fn or_not_available(value: Option<&str>) -> String {
    value.unwrap_or(NOT_AVAILABLE).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AttemptedOn, QuestionRecord};

    fn record(source: QuizSource, name: &str, on: &str, score: Score) -> QuizRecord {
        QuizRecord {
            student_id: "a@x.com".into(),
            source,
            quiz_id: None,
            quiz_name: name.into(),
            attempted_on: AttemptedOn::parse(on),
            score,
            points_possible: None,
            verbal_score: Score::Unavailable,
            math_score: Score::Unavailable,
            skill_tag: None,
        }
    }

    fn question(quiz: &str, id: Option<&str>, correct: bool) -> QuestionRecord {
        QuestionRecord {
            student_id: "a@x.com".into(),
            quiz_id_ref: Some(quiz.into()),
            question_id: id.map(str::to_string),
            student_answer: Some("B".into()),
            is_correct: correct,
            skill_tag: None,
        }
    }

    #[test]
    fn test_overview_cards_fixed_slots() {
        let view = StudentView {
            quizzes: vec![QuizRecord {
                verbal_score: Score::Numeric(600.0),
                ..record(QuizSource::CanvasTest, "PT 1", "2024-05-01", Score::Numeric(1200.0))
            }],
            questions: vec![],
        };
        let cards = overview_cards(&summarize(&view));

        assert_eq!(cards.len(), 4);
        assert_eq!(cards[0].value, "1200");
        assert_eq!(cards[0].unit, "/ 1600");
        assert_eq!(cards[1].value, "600");
        assert_eq!(cards[2].value, "N/A");
        assert_eq!(cards[3].value, "N/A");
    }

    #[test]
    fn test_practice_test_rows_newest_first() {
        let quizzes = vec![
            record(QuizSource::CanvasTest, "PT 1", "2024-01-01", Score::Numeric(1100.0)),
            record(QuizSource::CanvasQuiz, "Quiz", "2024-02-01", Score::Numeric(8.0)),
            record(QuizSource::CanvasTest, "PT 2", "2024-03-01", Score::Numeric(1300.0)),
        ];
        let rows = practice_test_rows(&quizzes);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].quiz_name, "PT 2");
        assert_eq!(rows[0].date, "Mar 1, 2024");
        assert_eq!(rows[0].overall_score, "1300");
        assert_eq!(rows[0].verbal_score, "N/A");
        assert_eq!(rows[1].quiz_name, "PT 1");
    }

    #[test]
    fn test_quiz_rows_score_display() {
        let quizzes = vec![
            QuizRecord {
                points_possible: Some(10.0),
                skill_tag: Some("Algebra".into()),
                ..record(QuizSource::CanvasQuiz, "Unit 1", "2024-01-01", Score::Numeric(8.0))
            },
            record(QuizSource::KhanAcademy, "Ratios", "2024-01-02", Score::Percentage(85.0)),
            record(QuizSource::KhanAcademy, "Lines", "2024-01-03", Score::Numeric(4.0)),
            record(QuizSource::CanvasTest, "PT", "2024-01-04", Score::Numeric(1200.0)),
        ];
        let rows = quiz_rows(&quizzes);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].quiz_name, "Lines");
        assert_eq!(rows[0].score, "4");
        assert_eq!(rows[0].points_possible, "N/A");
        assert_eq!(rows[1].score, "85%");
        assert_eq!(rows[1].points_possible, "100%");
        assert_eq!(rows[1].source, "Khan Academy");
        assert_eq!(rows[2].score, "8 (80%)");
        assert_eq!(rows[2].points_possible, "10");
        assert_eq!(rows[2].skill_tag, "Algebra");
        assert_eq!(rows[0].skill_tag, "N/A");
    }

    #[test]
    fn test_canvas_percentage_score_row_embeds_percentage() {
        let quizzes = vec![QuizRecord {
            points_possible: Some(100.0),
            ..record(QuizSource::CanvasQuiz, "Unit 1", "2024-01-01", Score::Percentage(85.0))
        }];
        let rows = quiz_rows(&quizzes);

        assert_eq!(rows[0].score, "85% (85%)");
        assert_eq!(rows[0].points_possible, "100");
    }

    #[test]
    fn test_question_detail_uses_latest_canvas_quiz() {
        let view = StudentView {
            quizzes: vec![
                QuizRecord {
                    quiz_id: Some("1".into()),
                    ..record(QuizSource::CanvasQuiz, "Old", "2024-01-01", Score::Numeric(5.0))
                },
                QuizRecord {
                    quiz_id: Some("2".into()),
                    ..record(QuizSource::CanvasQuiz, "New", "2024-02-01", Score::Numeric(7.0))
                },
            ],
            questions: vec![
                question("1", Some("Q1"), true),
                question("2", None, true),
                question("2", Some("Q7"), false),
            ],
        };
        let detail = question_detail(&view);

        assert_eq!(detail.quiz_name.as_deref(), Some("New"));
        assert_eq!(detail.rows.len(), 2);
        assert_eq!(detail.rows[0].number, "1");
        assert_eq!(detail.rows[0].correctness, "Correct");
        assert_eq!(detail.rows[1].number, "Q7");
        assert_eq!(detail.rows[1].correctness, "Incorrect");
        assert_eq!(detail.rows[1].skill_tag, "N/A");
    }

    #[test]
    fn test_question_detail_empty_without_canvas_quiz() {
        let view = StudentView {
            quizzes: vec![record(QuizSource::KhanAcademy, "Ratios", "2024-01-01", Score::Percentage(90.0))],
            questions: vec![question("1", Some("Q1"), true)],
        };
        let detail = question_detail(&view);

        assert!(detail.is_empty());
        assert_eq!(detail.quiz_name, None);
    }

    #[test]
    fn test_question_detail_keeps_quiz_name_when_no_questions_match() {
        let view = StudentView {
            quizzes: vec![QuizRecord {
                quiz_id: Some("9".into()),
                ..record(QuizSource::CanvasQuiz, "Unit 9", "2024-01-01", Score::Numeric(5.0))
            }],
            questions: vec![question("1", Some("Q1"), true)],
        };
        let detail = question_detail(&view);

        assert!(detail.is_empty());
        assert_eq!(detail.quiz_name.as_deref(), Some("Unit 9"));
    }

    #[test]
    fn test_build_report_status() {
        let view = StudentView {
            quizzes: vec![record(QuizSource::CanvasQuiz, "Quiz", "2024-01-01", Score::Numeric(5.0))],
            questions: vec![],
        };
        let report = build_report("A@X.com", &view);
        assert_eq!(report.student_id, "a@x.com");
        assert_eq!(report.status, "Displaying data for A@X.com.");
    }
}
