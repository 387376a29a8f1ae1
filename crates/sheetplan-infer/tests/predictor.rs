use std::thread;

use sheetplan_infer::{PredictionSource, TagMemory, TagPredictor};
use sheetplan_model::ItemTag;

const TERMS: [&str; 4] = ["alpha club", "beta club", "gamma club", "delta club"];

#[test]
fn shared_batches_are_visible_all_or_nothing() {
    let memory = TagMemory::new();
    let tags = [
        ItemTag::Budget,
        ItemTag::Recurring,
        ItemTag::Savings,
        ItemTag::Debt,
    ];

    // Each writer repeatedly maps every term to its own tag in one batch.
    // Batches hold the write lock for their whole extent, so whichever
    // writer lands last must have landed for every term.
    let handles: Vec<_> = tags
        .into_iter()
        .map(|tag| {
            let memory = memory.clone();
            thread::spawn(move || {
                for _ in 0..50 {
                    let batch: Vec<(String, ItemTag)> =
                        TERMS.iter().map(|t| ((*t).to_string(), tag)).collect();
                    memory.learn_shared_batch(&batch);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("writer thread");
    }

    let predictor = TagPredictor::new(memory);
    let first = predictor.predict(TERMS[0]);
    assert_eq!(first.source, PredictionSource::SharedOverlay);
    for term in TERMS {
        let prediction = predictor.predict(term);
        assert_eq!(prediction.tag, first.tag, "torn batch for {term}");
    }
}

#[test]
fn shared_learning_is_visible_across_handles() {
    let memory = TagMemory::new();
    let writer = memory.clone();

    let handle = thread::spawn(move || {
        writer.learn_shared("houseboat fees", ItemTag::Recurring);
    });
    handle.join().expect("writer thread");

    let prediction = TagPredictor::new(memory).predict("Houseboat   Fees");
    assert_eq!(prediction.tag, ItemTag::Recurring);
    assert_eq!(prediction.source, PredictionSource::SharedOverlay);
}

#[test]
fn user_overlays_stay_private_to_their_session() {
    let memory = TagMemory::new();
    let mut ada = TagPredictor::new(memory.clone());
    ada.learn_user("netflix", ItemTag::Recurring);

    let grace = TagPredictor::new(memory);
    assert_eq!(grace.predict("netflix").tag, ItemTag::Unknown);
    assert_eq!(ada.predict("netflix").tag, ItemTag::Recurring);
}
