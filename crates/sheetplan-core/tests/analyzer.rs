use std::path::PathBuf;

use sheetplan_core::{AnalyzeError, AnalyzeOptions, SheetAnalyzer};
use sheetplan_infer::{CorrectionStore, JsonCorrectionStore, StoreError, TagMemory, TagPredictor};
use sheetplan_ingest::{IngestError, SheetGrid, StaticSheetSource, suggest_layout};
use sheetplan_model::{ItemTag, TagCorrection};
use tempfile::TempDir;

fn craft_sheet() -> StaticSheetSource {
    StaticSheetSource::new().with_sheet(SheetGrid::from_texts(
        "Budget",
        vec![
            vec!["HOBBIES", ""],
            vec!["  Craft Supplies", "45"],
            vec!["  Groceries", "450"],
        ],
    ))
}

fn analyzer_in(
    dir: &TempDir,
) -> SheetAnalyzer<StaticSheetSource, JsonCorrectionStore> {
    let store = JsonCorrectionStore::new(dir.path().join("corrections")).expect("open store");
    SheetAnalyzer::new(craft_sheet(), TagMemory::new(), store)
}

#[test]
fn corrections_change_the_next_analysis() {
    let dir = TempDir::new().expect("temp dir");
    let analyzer = analyzer_in(&dir);
    let mut session = analyzer.session("ada").expect("session");

    let before = session.analyze("Budget", &AnalyzeOptions::default()).expect("analyze");
    let supplies = &before.nodes[0].children[0];
    assert_eq!(supplies.tag, ItemTag::Unknown);
    assert!(supplies.needs_review);
    assert_eq!(before.items_needing_review, 1);

    session
        .correct("Craft Supplies", ItemTag::Unknown, ItemTag::Budget, None)
        .expect("correct");

    let after = session.analyze("Budget", &AnalyzeOptions::default()).expect("analyze");
    let supplies = &after.nodes[0].children[0];
    assert_eq!(supplies.tag, ItemTag::Budget);
    assert!(supplies.is_auto_approved());
    assert_eq!(after.items_needing_review, 0);
}

#[test]
fn corrections_survive_into_new_sessions() {
    let dir = TempDir::new().expect("temp dir");
    {
        let analyzer = analyzer_in(&dir);
        let mut session = analyzer.session("ada").expect("session");
        session
            .correct("Craft Supplies", ItemTag::Unknown, ItemTag::Budget, None)
            .expect("correct");
    }

    // A separate analyzer over the same store sees the correction.
    let analyzer = analyzer_in(&dir);
    let analysis = analyzer
        .analyze_sheet_tree("ada", "Budget", &AnalyzeOptions::default())
        .expect("analyze");
    assert_eq!(analysis.nodes[0].children[0].tag, ItemTag::Budget);

    // Another user does not.
    let other = analyzer
        .analyze_sheet_tree("grace", "Budget", &AnalyzeOptions::default())
        .expect("analyze");
    assert_eq!(other.nodes[0].children[0].tag, ItemTag::Unknown);
}

#[test]
fn sessions_predict_with_their_own_overlay() {
    let dir = TempDir::new().expect("temp dir");
    let analyzer = analyzer_in(&dir);
    let mut session = analyzer.session("ada").expect("session");

    assert_eq!(session.predict("craft supplies").tag, ItemTag::Unknown);
    session
        .correct("craft supplies", ItemTag::Unknown, ItemTag::Budget, None)
        .expect("correct");
    let prediction = session.predict("Craft  Supplies");
    assert_eq!(prediction.tag, ItemTag::Budget);
    assert!(prediction.confidence > 0.9);
}

#[test]
fn missing_sheets_surface_ingest_errors() {
    let dir = TempDir::new().expect("temp dir");
    let analyzer = analyzer_in(&dir);

    let err = analyzer
        .analyze_sheet_tree("ada", "Forecast", &AnalyzeOptions::default())
        .unwrap_err();
    assert!(matches!(
        err,
        AnalyzeError::Ingest(IngestError::SheetNotFound(name)) if name == "Forecast"
    ));
}

#[test]
fn profiles_flow_through_the_facade() {
    let dir = TempDir::new().expect("temp dir");
    let store = JsonCorrectionStore::new(dir.path().join("corrections")).expect("open store");
    let source = StaticSheetSource::new().with_sheet(SheetGrid::from_texts(
        "Budget",
        vec![
            vec!["2025 Plan", ""],
            vec!["", ""],
            vec!["Category", "Amount"],
            vec!["", ""],
            vec!["HOUSING", ""],
            vec!["  Rent", "1200"],
            vec!["  Utilities", "150"],
        ],
    ));
    let analyzer = SheetAnalyzer::new(source, TagMemory::new(), store);

    let profiles = analyzer.profile_columns("Budget", 50).expect("profiles");
    assert_eq!(profiles.len(), 2);
    assert_eq!(profiles[0].rows_analyzed, 3);

    let layout = suggest_layout(&profiles).expect("layout");
    let options = AnalyzeOptions::from(layout);
    assert_eq!(options.category_column, 0);
    assert_eq!(options.value_column, 1);
}

#[derive(Debug)]
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
fn a_store_outage_fails_hydration_but_spares_shared_layers() {
    let analyzer = SheetAnalyzer::new(craft_sheet(), TagMemory::new(), OfflineStore);

    let err = analyzer.session("ada").unwrap_err();
    assert!(matches!(err, AnalyzeError::Hydration(_)));

    // The baseline and shared overlay are still good for prediction.
    let predictor = TagPredictor::new(analyzer.memory().clone());
    assert_eq!(predictor.predict("groceries").tag, ItemTag::Budget);
}
