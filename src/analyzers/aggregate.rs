use std::collections::HashMap;

use crate::analyzers::types::{SkillAccuracy, StudentSummary, TrendPoint};
use crate::analyzers::utility::{chronological, mean, pct};
use crate::filter::StudentView;
use crate::model::{QuestionRecord, QuizRecord, QuizSource, Score};

const COLLEGE_BOARD_PREFIX: &str = "College Board ";

/// Derives headline scores, the quiz average, per-skill accuracy and the
/// practice-test trend from one student's records.
pub fn summarize(view: &StudentView) -> StudentSummary {
    let latest = latest_practice_test(&view.quizzes).cloned();

    let (overall_score, verbal_score, math_score) = match &latest {
        Some(test) => (
            test.score.clone(),
            test.verbal_score.clone(),
            test.math_score.clone(),
        ),
        None => (Score::Unavailable, Score::Unavailable, Score::Unavailable),
    };

    StudentSummary {
        latest_practice_test: latest,
        overall_score,
        verbal_score,
        math_score,
        average_quiz_score: average_quiz_score(&view.quizzes),
        skill_accuracy: skill_accuracy(&view.questions),
        score_trend: score_trend(&view.quizzes),
    }
}

/// The chronologically last practice test. On an exact timestamp tie the
/// later input row wins.
pub fn latest_practice_test(quizzes: &[QuizRecord]) -> Option<&QuizRecord> {
    chronological(practice_tests(quizzes)).pop()
}

pub fn practice_tests(quizzes: &[QuizRecord]) -> impl Iterator<Item = &QuizRecord> {
    quizzes.iter().filter(|q| q.source == QuizSource::CanvasTest)
}

pub fn quizzes_only(quizzes: &[QuizRecord]) -> impl Iterator<Item = &QuizRecord> {
    quizzes.iter().filter(|q| q.source.is_quiz())
}

/// Percentage earned on a quiz, when derivable.
///
/// Khan Academy percentage scores are taken as-is. Otherwise the score's
/// numeric part (a `%` score counts by its number) over a positive
/// points-possible is converted. Anything else is `None`.
pub fn quiz_percentage(record: &QuizRecord) -> Option<f64> {
    let earned = match (&record.source, &record.score) {
        (QuizSource::KhanAcademy, Score::Percentage(p)) => return Some(*p),
        (_, Score::Numeric(n) | Score::Percentage(n)) => *n,
        _ => return None,
    };
    match record.points_possible {
        Some(possible) if possible > 0.0 => Some(earned / possible * 100.0),
        _ => None,
    }
}

/// Mean of the derivable quiz percentages, rounded to a whole number.
/// Quizzes with no derivable percentage are left out rather than counted as 0.
pub fn average_quiz_score(quizzes: &[QuizRecord]) -> Option<f64> {
    let percentages: Vec<f64> = quizzes_only(quizzes).filter_map(quiz_percentage).collect();
    mean(&percentages).map(f64::round)
}

/// Accuracy per skill tag, in first-seen order.
pub fn skill_accuracy(questions: &[QuestionRecord]) -> Vec<SkillAccuracy> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();

    for q in questions {
        let skill = q.skill_group();
        let entry = counts.entry(skill).or_insert_with(|| {
            order.push(skill);
            (0, 0)
        });
        entry.1 += 1;
        if q.is_correct {
            entry.0 += 1;
        }
    }

    order
        .into_iter()
        .filter_map(|skill| {
            let (correct, total) = counts[skill];
            (total > 0).then(|| SkillAccuracy {
                skill: skill.to_string(),
                correct,
                total,
                accuracy: pct(correct, total),
            })
        })
        .collect()
}

/// Practice tests oldest to newest, labelled for the trend chart.
pub fn score_trend(quizzes: &[QuizRecord]) -> Vec<TrendPoint> {
    chronological(practice_tests(quizzes))
        .into_iter()
        .map(|t| TrendPoint {
            label: format!("{} ({})", trend_name(&t.quiz_name), t.attempted_on.display()),
            total: t.score.numeric(),
            verbal: t.verbal_score.numeric(),
            math: t.math_score.numeric(),
        })
        .collect()
}

fn trend_name(quiz_name: &str) -> &str {
    quiz_name.strip_prefix(COLLEGE_BOARD_PREFIX).unwrap_or(quiz_name)
}
