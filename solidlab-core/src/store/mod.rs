/// Progress/practice store over an injectable key-value backend
///
/// Four JSON entries are kept: the progress list, the practice record list,
/// the app config and the last viewed shape. Reads never fail: a missing entry
/// yields its default, and a broken one is logged and treated as missing.

pub mod backend;
pub mod records;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use records::{
    normalize_progress, LearningProgress, LearningStats, NewPracticeRecord, PracticeRecord, FIRST_VISIT_MASTERY,
    MASTERY_STEP, MAX_MASTERY,
};

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::{AppConfig, AppConfigPatch};
use crate::error::StorageResult;
use crate::shape::ShapeKind;

pub const PROGRESS_KEY: &str = "geometry_learning_progress";
pub const PRACTICE_KEY: &str = "geometry_practice_records";
pub const CONFIG_KEY: &str = "geometry_app_config";
pub const CURRENT_GEOMETRY_KEY: &str = "geometry_current_type";

const ALL_KEYS: [&str; 4] = [PROGRESS_KEY, PRACTICE_KEY, CONFIG_KEY, CURRENT_GEOMETRY_KEY];

/// Everything the store holds, as written by an export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub progress: Vec<LearningProgress>,
    pub records: Vec<PracticeRecord>,
    pub config: AppConfig,
    pub export_time: DateTime<Utc>,
}

/// File name offered for an export made on `date`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("geometry-learning-data-{}.json", date.format("%Y-%m-%d"))
}

/// Export file name for the current UTC date
pub fn current_export_file_name() -> String {
    export_file_name(Utc::now().date_naive())
}

/// Learning progress, practice log and preferences
#[derive(Debug)]
pub struct ProgressStore<B> {
    backend: B,
}

impl<B: StorageBackend> ProgressStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let text = match self.backend.read(key) {
            Ok(Some(text)) => text,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "failed to read stored entry, using default");
                return None;
            }
        };
        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "failed to parse stored entry, using default");
                None
            }
        }
    }

    fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> StorageResult<()> {
        let text = serde_json::to_string(value)?;
        self.backend.write(key, &text)
    }

    pub fn app_config(&self) -> AppConfig {
        self.load(CONFIG_KEY).unwrap_or_default()
    }

    /// Merge `patch` into the stored config and return the result
    pub fn save_app_config(&mut self, patch: AppConfigPatch) -> StorageResult<AppConfig> {
        let mut config = self.app_config();
        config.apply(patch);
        self.save(CONFIG_KEY, &config)?;
        Ok(config)
    }

    pub fn learning_progress(&self) -> Vec<LearningProgress> {
        normalize_progress(self.load(PROGRESS_KEY).unwrap_or_default())
    }

    pub fn progress_for(&self, kind: ShapeKind) -> Option<LearningProgress> {
        self.learning_progress().into_iter().find(|p| p.kind == kind)
    }

    /// Count a visit of `kind`, creating its record on the first visit
    pub fn record_visit(&mut self, kind: ShapeKind) -> StorageResult<LearningProgress> {
        self.update_progress(kind, false)
    }

    fn update_progress(&mut self, kind: ShapeKind, scored: bool) -> StorageResult<LearningProgress> {
        let now = Utc::now();
        let mut progress = self.learning_progress();
        let index = match progress.iter().position(|p| p.kind == kind) {
            Some(index) => {
                progress[index].revisit(now);
                index
            }
            None => {
                progress.push(LearningProgress::first_visit(kind, now));
                progress.len() - 1
            }
        };
        if scored {
            progress[index].practice_score = progress[index].practice_score.saturating_add(1);
        }
        self.save(PROGRESS_KEY, &progress)?;

        let updated = progress.swap_remove(index);
        debug!(
            shape = %kind,
            visits = updated.visit_count,
            mastery = updated.mastery_level,
            "recorded visit"
        );
        Ok(updated)
    }

    pub fn practice_records(&self) -> Vec<PracticeRecord> {
        self.load(PRACTICE_KEY).unwrap_or_default()
    }

    /// Append a practice answer, then count it as a visit of its shape.
    ///
    /// A correct answer also raises the shape's practice score.
    pub fn add_practice_record(&mut self, new: NewPracticeRecord) -> StorageResult<PracticeRecord> {
        let record = PracticeRecord {
            id: Uuid::new_v4().to_string(),
            geometry_type: new.geometry_type,
            question: new.question,
            answer: new.answer,
            user_answer: new.user_answer,
            is_correct: new.is_correct,
            timestamp: Utc::now(),
        };

        let mut records = self.practice_records();
        records.push(record.clone());
        self.save(PRACTICE_KEY, &records)?;

        self.update_progress(record.geometry_type, record.is_correct)?;
        Ok(record)
    }

    /// Last shape opened in the viewer, `cube` when none is stored
    pub fn current_geometry(&self) -> ShapeKind {
        self.load(CURRENT_GEOMETRY_KEY).unwrap_or(ShapeKind::Cube)
    }

    pub fn set_current_geometry(&mut self, kind: ShapeKind) -> StorageResult<()> {
        self.save(CURRENT_GEOMETRY_KEY, &kind)
    }

    pub fn learning_stats(&self) -> LearningStats {
        LearningStats::compute(&self.learning_progress(), &self.practice_records())
    }

    /// Remove every entry the store owns.
    ///
    /// All keys are attempted; the first failure is returned.
    pub fn clear_all(&mut self) -> StorageResult<()> {
        let mut result = Ok(());
        for key in ALL_KEYS {
            if let Err(e) = self.backend.remove(key) {
                warn!(key, error = %e, "failed to clear stored entry");
                if result.is_ok() {
                    result = Err(e);
                }
            }
        }
        result
    }

    pub fn export(&self) -> ExportDocument {
        ExportDocument {
            progress: self.learning_progress(),
            records: self.practice_records(),
            config: self.app_config(),
            export_time: Utc::now(),
        }
    }

    /// Pretty-printed export document
    pub fn export_json(&self) -> StorageResult<String> {
        Ok(serde_json::to_string_pretty(&self.export())?)
    }

    /// Replace progress, records and config with those of an export document.
    ///
    /// The progress list is normalized before it is stored.
    pub fn import_json(&mut self, json: &str) -> StorageResult<ExportDocument> {
        let mut document: ExportDocument = serde_json::from_str(json)?;
        document.progress = normalize_progress(document.progress);
        self.save(PROGRESS_KEY, &document.progress)?;
        self.save(PRACTICE_KEY, &document.records)?;
        self.save(CONFIG_KEY, &document.config)?;
        debug!(
            progress = document.progress.len(),
            records = document.records.len(),
            "imported learning data"
        );
        Ok(document)
    }
}
