//! Concurrency and thread safety tests for plagscan

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use plagscan::{
    BackendConfig, Document, HistoryStore, IndexConfig, NewCheck, ResultIndex, WinnowConfig,
    check_and_record, compare_batch, fingerprint,
};

const TEXT: &str = "Concurrent fingerprinting must be a pure function of its input text \
and parameters, whatever thread happens to run it.";

fn corpus(n: usize) -> Vec<Document> {
    (0..n)
        .map(|i| {
            Document::new(
                format!("doc-{i}"),
                format!("{TEXT} variant number {} {}", i % 3, "lorem ipsum ".repeat(i)),
            )
        })
        .collect()
}

#[test]
fn concurrent_fingerprint_same_input() {
    let handles: Vec<_> = (0..10)
        .map(|_| thread::spawn(|| fingerprint(TEXT, 5, 4).expect("fingerprint")))
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let first = &results[0];
    for (i, result) in results.iter().enumerate().skip(1) {
        assert_eq!(first, result, "Thread {i} produced a different fingerprint set");
    }
}

#[test]
fn concurrent_batches_match_sequential() {
    let docs = Arc::new(corpus(8));
    let expected = compare_batch(&docs, 5, 4).unwrap();

    let handles: Vec<_> = (0..6)
        .map(|_| {
            let docs = Arc::clone(&docs);
            thread::spawn(move || compare_batch(&docs, 5, 4).expect("batch"))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn concurrent_records_get_unique_ids() {
    let store = Arc::new(
        ResultIndex::new(IndexConfig::new().with_backend(BackendConfig::in_memory())).unwrap(),
    );

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let session = format!("session-{t}");
                (0..25)
                    .map(|_| {
                        store
                            .record(NewCheck {
                                session_id: &session,
                                doc1_name: "a",
                                doc2_name: "b",
                                doc1_text: "alpha",
                                doc2_text: "beta",
                                similarity: 0.0,
                            })
                            .expect("record")
                    })
                    .collect::<Vec<u64>>()
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        for id in handle.join().unwrap() {
            assert!(ids.insert(id), "duplicate id {id}");
        }
    }
    assert_eq!(ids.len(), 200);

    let history = store.history().unwrap();
    assert_eq!(history.len(), 8);
    assert!(history.iter().all(|s| s.results.len() == 25));
}

#[test]
fn concurrent_pipelines_share_one_store() {
    let store: Arc<dyn HistoryStore> =
        Arc::new(ResultIndex::new(IndexConfig::new()).unwrap());
    let docs = Arc::new(corpus(4));

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let store = Arc::clone(&store);
            let docs = Arc::clone(&docs);
            thread::spawn(move || {
                check_and_record(
                    &docs,
                    &WinnowConfig::default(),
                    &format!("parallel-{t}"),
                    store.as_ref(),
                )
                .expect("pipeline")
            })
        })
        .collect();

    let batches: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for batch in &batches[1..] {
        assert_eq!(batch.results, batches[0].results);
    }

    let history = store.history().unwrap();
    assert_eq!(history.len(), 4);
    for session in history {
        assert_eq!(session.results.len(), 6);
    }
}
