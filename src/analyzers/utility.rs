use crate::model::QuizRecord;

/// Arithmetic mean, or `None` for empty input.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// `part / total` as a percentage. Returns 0.0 when `total` is zero.
pub fn pct(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

/// Stable ascending sort by attempt time; equal timestamps keep input order.
pub fn chronological<'a, I>(records: I) -> Vec<&'a QuizRecord>
where
    I: IntoIterator<Item = &'a QuizRecord>,
{
    let mut sorted: Vec<_> = records.into_iter().collect();
    sorted.sort_by_key(|r| r.attempted_on.sort_key());
    sorted
}

/// Newest first: the exact reverse of [`chronological`], so on a tie the
/// later input row leads.
pub fn newest_first<'a, I>(records: I) -> Vec<&'a QuizRecord>
where
    I: IntoIterator<Item = &'a QuizRecord>,
{
    let mut sorted = chronological(records);
    sorted.reverse();
    sorted
}
