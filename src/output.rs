//! Output formatting and persistence for student reports.
//!
//! Supports plain-text tables, JSON, and per-table CSV export.

use std::fmt::{self, Write as _};
use std::fs;
use std::path::Path;

use anyhow::Result;
use csv::WriterBuilder;
use serde::Serialize;
use tracing::debug;

use crate::analyzers::types::StudentReport;
use crate::format::format_number;

/// Logs a report using Rust's debug pretty-print format.
pub fn print_pretty(report: &StudentReport) {
    debug!("{:#?}", report);
}

/// Serializes a report as pretty-printed JSON.
pub fn render_json(report: &StudentReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Renders a report as plain-text sections and tables.
pub fn render_text(report: &StudentReport) -> Result<String> {
    let mut out = String::new();
    write_text(&mut out, report)?;
    Ok(out)
}

fn write_text(out: &mut String, report: &StudentReport) -> fmt::Result {
    writeln!(out, "Student: {}", report.student_id)?;
    writeln!(out, "{}", report.status)?;

    section(out, "Overview")?;
    for card in &report.cards {
        writeln!(out, "  {}: {} {}", card.title, card.value, card.unit)?;
    }

    section(out, "Score trend")?;
    if report.score_trend.is_empty() {
        writeln!(out, "  No Practice Test score trend data available.")?;
    } else {
        let rows = report
            .score_trend
            .iter()
            .map(|p| vec![p.label.clone(), opt(p.total), opt(p.verbal), opt(p.math)])
            .collect();
        table(out, &["Test", "Total", "Verbal", "Math"], rows)?;
    }

    section(out, "Skill accuracy")?;
    if report.skill_accuracy.is_empty() {
        writeln!(out, "  No specific skill performance data available from quizzes.")?;
    } else {
        let rows = report
            .skill_accuracy
            .iter()
            .map(|s| {
                vec![
                    s.skill.clone(),
                    format!("{:.1}%", s.accuracy),
                    format!("{}/{}", s.correct, s.total),
                ]
            })
            .collect();
        table(out, &["Skill", "Accuracy", "Correct"], rows)?;
    }

    section(out, "Practice tests")?;
    if report.practice_tests.is_empty() {
        writeln!(out, "  No College Board Practice Test data available.")?;
    } else {
        let rows = report
            .practice_tests
            .iter()
            .map(|t| {
                vec![
                    t.quiz_name.clone(),
                    t.date.clone(),
                    t.verbal_score.clone(),
                    t.math_score.clone(),
                    t.overall_score.clone(),
                ]
            })
            .collect();
        table(out, &["Test", "Date", "Verbal", "Math", "Total"], rows)?;
    }

    section(out, "All quizzes")?;
    if report.all_quizzes.is_empty() {
        writeln!(out, "  No quiz data available.")?;
    } else {
        let rows = report
            .all_quizzes
            .iter()
            .map(|q| {
                vec![
                    q.quiz_name.clone(),
                    q.source.clone(),
                    q.date.clone(),
                    q.score.clone(),
                    q.points_possible.clone(),
                    q.skill_tag.clone(),
                ]
            })
            .collect();
        table(
            out,
            &["Quiz", "Source", "Date", "Score", "Possible", "Skill"],
            rows,
        )?;
    }

    section(out, "Question details")?;
    let detail = &report.question_detail;
    match (&detail.quiz_name, detail.is_empty()) {
        (None, _) => {
            writeln!(
                out,
                "  No detailed question data available for recent Canvas quizzes."
            )?;
        }
        (Some(name), true) => {
            writeln!(out, "  No question breakdown available for \"{name}\".")?;
        }
        (Some(name), false) => {
            writeln!(out, "  {name}")?;
            let rows = detail
                .rows
                .iter()
                .map(|r| {
                    vec![
                        r.number.clone(),
                        r.student_answer.clone(),
                        r.correctness.clone(),
                        r.skill_tag.clone(),
                    ]
                })
                .collect();
            table(out, &["#", "Answer", "Result", "Skill"], rows)?;
        }
    }

    Ok(())
}

fn section(out: &mut String, title: &str) -> fmt::Result {
    writeln!(out, "\n== {title}")
}

fn opt(value: Option<f64>) -> String {
    value.map(format_number).unwrap_or_else(|| "-".to_string())
}

fn table(out: &mut String, headers: &[&str], rows: Vec<Vec<String>>) -> fmt::Result {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(c, &w)| format!("{c:<w$}"))
            .collect();
        format!("  {}", padded.join("  ").trim_end())
    };

    writeln!(out, "{}", line(headers.to_vec()))?;
    for row in &rows {
        writeln!(out, "{}", line(row.iter().map(String::as_str).collect()))?;
    }
    Ok(())
}

/// Writes the three report tables as CSV files (with headers) into `dir`,
/// creating it if needed. Existing files are replaced.
pub fn write_tables(dir: &Path, report: &StudentReport) -> Result<()> {
    fs::create_dir_all(dir)?;
    write_csv(&dir.join("practice_tests.csv"), &report.practice_tests)?;
    write_csv(&dir.join("all_quizzes.csv"), &report.all_quizzes)?;
    write_csv(&dir.join("question_details.csv"), &report.question_detail.rows)?;
    Ok(())
}

fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    debug!(path = %path.display(), rows = rows.len(), "Writing CSV table");

    let mut writer = WriterBuilder::new().has_headers(true).from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::Dashboard;
    use crate::store::DataStore;
    use std::env;

    fn report() -> StudentReport {
        let quizzes = "StudentGmailID,Source,QuizID,QuizName,AttemptedOn,Score,PointsPossible,VerbalScore,MathScore\n\
                       a@x.com,Canvas CB Test,,College Board Practice Test 1,2024-01-01,1100,,550,550\n\
                       a@x.com,Canvas,7,Unit 1,2024-02-01,8,10,,\n";
        let questions = "StudentGmailID,QuizID_Canvas,QuestionID_Normalized,StudentAnswer_fromCSV,IsCorrect,SAT_Skill_Tag\n\
                         a@x.com,7,Q1,B,TRUE,Algebra\n";
        let store = DataStore::from_csv(quizzes.as_bytes(), questions.as_bytes())
            .into_ready()
            .unwrap();
        Dashboard::new(store).lookup("a@x.com").unwrap()
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&report());
    }

    #[test]
    fn test_render_json_contains_sections() {
        let json = render_json(&report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["student_id"], "a@x.com");
        assert_eq!(value["cards"].as_array().unwrap().len(), 4);
        assert_eq!(value["question_detail"]["rows"][0]["correctness"], "Correct");
    }

    #[test]
    fn test_render_text_lists_tables() {
        let text = render_text(&report()).unwrap();

        assert!(text.contains("Student: a@x.com"));
        assert!(text.contains("Latest SAT Practice Test: 1100 / 1600"));
        assert!(text.contains("Practice Test 1 (Jan 1, 2024)"));
        assert!(text.contains("8 (80%)"));
        assert!(text.contains("100.0%"));
    }

    #[test]
    fn test_write_tables_creates_three_files() {
        let dir = env::temp_dir().join("quiz_dashboard_test_tables");
        let _ = fs::remove_dir_all(&dir);

        write_tables(&dir, &report()).unwrap();

        let quizzes = fs::read_to_string(dir.join("all_quizzes.csv")).unwrap();
        let lines: Vec<_> = quizzes.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("quiz_name,source,date,score"));
        assert!(dir.join("practice_tests.csv").exists());
        assert!(dir.join("question_details.csv").exists());

        fs::remove_dir_all(&dir).unwrap();
    }
}
