use std::fs;
use std::path::PathBuf;

use sheetplan_infer::{
    CorrectionLearner, CorrectionStore, JsonCorrectionStore, PredictionSource, StoreError,
    TagMemory, TagPredictor,
};
use sheetplan_model::{ItemTag, TagCorrection};
use tempfile::TempDir;

fn learner_in(dir: &TempDir) -> CorrectionLearner<JsonCorrectionStore> {
    let store = JsonCorrectionStore::new(dir.path().join("corrections")).expect("open store");
    CorrectionLearner::new(store)
}

#[test]
fn corrected_terms_come_back_at_user_confidence() {
    let dir = TempDir::new().expect("temp dir");
    let learner = learner_in(&dir);
    let mut predictor = TagPredictor::new(TagMemory::new());

    let before = predictor.predict("netflix");
    assert_eq!(before.tag, ItemTag::Unknown);

    learner
        .save_correction(
            "ada",
            "  NetFlix ",
            before.tag,
            ItemTag::Recurring,
            Some("2025-budget.csv".to_string()),
            &mut predictor,
        )
        .expect("save correction");

    let after = predictor.predict("Netflix");
    assert_eq!(after.tag, ItemTag::Recurring);
    assert_eq!(after.source, PredictionSource::UserOverlay);
    assert!(after.confidence > 0.9);

    // The stored row carries the normalized term.
    let stored = learner.store().corrections_for("ada").expect("load");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].term, "netflix");
    assert_eq!(stored[0].predicted, ItemTag::Unknown);
    assert_eq!(stored[0].corrected, ItemTag::Recurring);
}

#[test]
fn hydration_replays_stored_corrections() {
    let dir = TempDir::new().expect("temp dir");
    let learner = learner_in(&dir);
    let memory = TagMemory::new();

    let mut session_one = TagPredictor::new(memory.clone());
    learner
        .save_correction("ada", "netflix", ItemTag::Unknown, ItemTag::Recurring, None, &mut session_one)
        .expect("save correction");
    learner
        .save_correction("ada", "allotment", ItemTag::Unknown, ItemTag::Savings, None, &mut session_one)
        .expect("save correction");

    let mut session_two = TagPredictor::new(memory);
    let replayed = learner.hydrate("ada", &mut session_two).expect("hydrate");
    assert_eq!(replayed, 2);
    assert_eq!(session_two.predict("netflix").tag, ItemTag::Recurring);
    assert_eq!(session_two.predict("allotment").tag, ItemTag::Savings);
}

#[test]
fn hydrating_an_unknown_user_is_a_quiet_no_op() {
    let dir = TempDir::new().expect("temp dir");
    let learner = learner_in(&dir);
    let mut predictor = TagPredictor::new(TagMemory::new());

    let replayed = learner.hydrate("nobody", &mut predictor).expect("hydrate");
    assert_eq!(replayed, 0);
    assert_eq!(predictor.learned_terms(), 0);
}

#[test]
fn upserting_the_same_term_keeps_one_row_and_its_birth_date() {
    let dir = TempDir::new().expect("temp dir");
    let learner = learner_in(&dir);
    let mut predictor = TagPredictor::new(TagMemory::new());

    learner
        .save_correction("ada", "netflix", ItemTag::Unknown, ItemTag::Budget, None, &mut predictor)
        .expect("first save");
    let first = learner.store().corrections_for("ada").expect("load")[0].clone();

    learner
        .save_correction("ada", "Netflix", ItemTag::Budget, ItemTag::Recurring, None, &mut predictor)
        .expect("second save");

    let rows = learner.store().corrections_for("ada").expect("load");
    assert_eq!(rows.len(), 1, "latest wins, no history");
    assert_eq!(rows[0].corrected, ItemTag::Recurring);
    assert_eq!(rows[0].created_at, first.created_at);
    assert!(rows[0].updated_at >= rows[0].created_at);
    assert_eq!(predictor.predict("netflix").tag, ItemTag::Recurring);
}

#[test]
fn corrections_are_isolated_per_user() {
    let dir = TempDir::new().expect("temp dir");
    let learner = learner_in(&dir);
    let memory = TagMemory::new();

    let mut ada = TagPredictor::new(memory.clone());
    learner
        .save_correction("ada", "netflix", ItemTag::Unknown, ItemTag::Recurring, None, &mut ada)
        .expect("save correction");

    let mut grace = TagPredictor::new(memory);
    learner.hydrate("grace", &mut grace).expect("hydrate");
    assert_eq!(grace.predict("netflix").tag, ItemTag::Unknown);

    let users = learner.store().users().expect("list users");
    assert_eq!(users, ["ada"]);
}

#[test]
fn unreadable_rows_are_skipped_not_fatal() {
    let dir = TempDir::new().expect("temp dir");
    let store = JsonCorrectionStore::new(dir.path()).expect("open store");
    let good = serde_json::to_value(TagCorrection::new(
        "ada",
        "netflix",
        ItemTag::Unknown,
        ItemTag::Recurring,
        None,
    ))
    .expect("encode row");
    let rows = serde_json::json!([good, { "user": "ada", "term": 42 }, "noise"]);
    fs::write(
        dir.path().join("ada.json"),
        serde_json::to_string_pretty(&rows).expect("encode file"),
    )
    .expect("write fixture");

    let loaded = store.corrections_for("ada").expect("load survives bad rows");
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].term, "netflix");
}

#[test]
fn an_unreadable_file_is_an_error() {
    let dir = TempDir::new().expect("temp dir");
    let store = JsonCorrectionStore::new(dir.path()).expect("open store");
    fs::write(dir.path().join("ada.json"), "not json at all").expect("write fixture");

    let err = store.corrections_for("ada").unwrap_err();
    assert!(matches!(err, StoreError::Json { .. }));
}

struct OfflineStore;

impl CorrectionStore for OfflineStore {
    fn corrections_for(&self, _user: &str) -> Result<Vec<TagCorrection>, StoreError> {
        Err(offline())
    }

    fn upsert(&self, _correction: &TagCorrection) -> Result<TagCorrection, StoreError> {
        Err(offline())
    }
}

fn offline() -> StoreError {
    StoreError::Read {
        path: PathBuf::from("corrections/offline.json"),
        source: std::io::Error::other("store offline"),
    }
}

#[test]
fn a_failed_save_leaves_the_predictor_untouched() {
    let learner = CorrectionLearner::new(OfflineStore);
    let mut predictor = TagPredictor::new(TagMemory::new());

    let result = learner.save_correction(
        "ada",
        "netflix",
        ItemTag::Unknown,
        ItemTag::Recurring,
        None,
        &mut predictor,
    );
    assert!(result.is_err());
    assert_eq!(predictor.learned_terms(), 0);
    assert_eq!(predictor.predict("netflix").tag, ItemTag::Unknown);
}

#[test]
fn a_failed_hydration_keeps_base_layers_usable() {
    let learner = CorrectionLearner::new(OfflineStore);
    let mut predictor = TagPredictor::new(TagMemory::new());

    assert!(learner.hydrate("ada", &mut predictor).is_err());
    let fallback = predictor.predict("groceries");
    assert_eq!(fallback.tag, ItemTag::Budget);
    assert_eq!(fallback.source, PredictionSource::BaselineExact);
}
