/// Persisted progress and practice records, and the statistics derived from them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shape::ShapeKind;

/// Mastery granted on the first visit of a shape
pub const FIRST_VISIT_MASTERY: u32 = 5;
/// Mastery gained on every later visit
pub const MASTERY_STEP: u32 = 2;
pub const MAX_MASTERY: u32 = 100;

/// Per-shape learning progress; exactly one per shape type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningProgress {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    pub visit_count: u32,
    pub last_visit: DateTime<Utc>,
    pub practice_score: u32,
    pub mastery_level: u32,
}

impl LearningProgress {
    pub fn first_visit(kind: ShapeKind, at: DateTime<Utc>) -> Self {
        Self {
            id: kind.as_str().to_string(),
            kind,
            visit_count: 1,
            last_visit: at,
            practice_score: 0,
            mastery_level: FIRST_VISIT_MASTERY,
        }
    }

    pub fn revisit(&mut self, at: DateTime<Utc>) {
        self.visit_count = self.visit_count.saturating_add(1);
        self.last_visit = at;
        self.mastery_level = self
            .mastery_level
            .saturating_add(MASTERY_STEP)
            .min(MAX_MASTERY);
    }

    /// Fold a second record of the same shape into this one
    fn absorb(&mut self, other: LearningProgress) {
        self.visit_count = self.visit_count.saturating_add(other.visit_count);
        self.practice_score = self.practice_score.saturating_add(other.practice_score);
        self.mastery_level = self.mastery_level.max(other.mastery_level);
        self.last_visit = self.last_visit.max(other.last_visit);
    }
}

/// Bring a stored or imported progress list back in line with its invariants.
///
/// Records of the same shape are merged into the first one, and mastery is
/// capped at [`MAX_MASTERY`].
pub fn normalize_progress(progress: Vec<LearningProgress>) -> Vec<LearningProgress> {
    let mut merged: Vec<LearningProgress> = Vec::with_capacity(progress.len());
    for entry in progress {
        match merged.iter_mut().find(|p| p.kind == entry.kind) {
            Some(existing) => existing.absorb(entry),
            None => merged.push(entry),
        }
    }
    for entry in &mut merged {
        entry.mastery_level = entry.mastery_level.min(MAX_MASTERY);
    }
    merged
}

/// A logged practice answer; never changed after it is written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeRecord {
    pub id: String,
    pub geometry_type: ShapeKind,
    pub question: String,
    pub answer: f64,
    pub user_answer: f64,
    pub is_correct: bool,
    pub timestamp: DateTime<Utc>,
}

/// A practice answer before the store assigns its id and timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct NewPracticeRecord {
    pub geometry_type: ShapeKind,
    pub question: String,
    pub answer: f64,
    pub user_answer: f64,
    pub is_correct: bool,
}

/// Aggregates shown on the progress view
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningStats {
    pub total_visits: u32,
    /// Rounded mean mastery over visited shapes
    pub avg_mastery: u32,
    pub total_practices: usize,
    pub correct_practices: usize,
    /// Rounded percentage of correct answers
    pub accuracy: u32,
}

impl LearningStats {
    pub fn compute(progress: &[LearningProgress], records: &[PracticeRecord]) -> Self {
        let total_visits = progress
            .iter()
            .fold(0u32, |total, p| total.saturating_add(p.visit_count));
        let avg_mastery = if progress.is_empty() {
            0.0
        } else {
            progress.iter().map(|p| p.mastery_level as f64).sum::<f64>() / progress.len() as f64
        };

        let total_practices = records.len();
        let correct_practices = records.iter().filter(|r| r.is_correct).count();
        let accuracy = if total_practices == 0 {
            0.0
        } else {
            correct_practices as f64 / total_practices as f64 * 100.0
        };

        Self {
            total_visits,
            avg_mastery: avg_mastery.round() as u32,
            total_practices,
            correct_practices,
            accuracy: accuracy.round() as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(kind: ShapeKind, is_correct: bool) -> PracticeRecord {
        PracticeRecord {
            id: "1".into(),
            geometry_type: kind,
            question: "q".into(),
            answer: 1.0,
            user_answer: 1.0,
            is_correct,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_mastery_is_capped() {
        let mut progress = LearningProgress::first_visit(ShapeKind::Cone, Utc::now());
        for _ in 0..60 {
            progress.revisit(Utc::now());
        }
        assert_eq!(progress.visit_count, 61);
        assert_eq!(progress.mastery_level, MAX_MASTERY);
    }

    #[test]
    fn test_revisit_saturates() {
        let mut progress = LearningProgress::first_visit(ShapeKind::Cube, Utc::now());
        progress.visit_count = u32::MAX;
        progress.mastery_level = u32::MAX;
        progress.revisit(Utc::now());
        assert_eq!(progress.visit_count, u32::MAX);
        assert_eq!(progress.mastery_level, MAX_MASTERY);
    }

    #[test]
    fn test_normalize_merges_and_caps() {
        let early = Utc::now() - chrono::Duration::days(1);
        let late = Utc::now();
        let mut first = LearningProgress::first_visit(ShapeKind::Cube, early);
        first.mastery_level = 500;
        let mut second = LearningProgress::first_visit(ShapeKind::Cube, late);
        second.visit_count = 3;
        second.practice_score = 2;
        let sphere = LearningProgress::first_visit(ShapeKind::Sphere, early);

        let progress = normalize_progress(vec![first, sphere, second]);
        assert_eq!(progress.len(), 2);
        assert_eq!(progress[0].kind, ShapeKind::Cube);
        assert_eq!(progress[0].visit_count, 4);
        assert_eq!(progress[0].practice_score, 2);
        assert_eq!(progress[0].mastery_level, MAX_MASTERY);
        assert_eq!(progress[0].last_visit, late);
        assert_eq!(progress[1].kind, ShapeKind::Sphere);
    }

    #[test]
    fn test_stats_of_nothing_are_zero() {
        assert_eq!(LearningStats::compute(&[], &[]), LearningStats::default());
    }

    #[test]
    fn test_stats_round_averages() {
        let now = Utc::now();
        let mut cube = LearningProgress::first_visit(ShapeKind::Cube, now);
        cube.revisit(now);
        let sphere = LearningProgress::first_visit(ShapeKind::Sphere, now);
        let records = [
            record(ShapeKind::Cube, true),
            record(ShapeKind::Cube, false),
            record(ShapeKind::Cube, false),
        ];

        let stats = LearningStats::compute(&[cube, sphere], &records);
        assert_eq!(stats.total_visits, 3);
        assert_eq!(stats.avg_mastery, 6);
        assert_eq!(stats.correct_practices, 1);
        assert_eq!(stats.accuracy, 33);
    }

    #[test]
    fn test_progress_json_uses_browser_field_names() {
        let progress = LearningProgress::first_visit(ShapeKind::Torus, Utc::now());
        let json = serde_json::to_value(&progress).unwrap();
        assert_eq!(json["type"], "torus");
        assert_eq!(json["masteryLevel"], 5);
        assert!(json.get("visitCount").is_some());
    }
}
