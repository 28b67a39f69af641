use plagscan::{
    BackendConfig, DocSide, Document, HistoryStore, IndexConfig, PipelineError, ResultIndex,
    WinnowConfig, check_and_record, default_session_offset, session_id_now,
};

fn corpus() -> Vec<Document> {
    vec![
        Document::new(
            "essay-original.txt",
            "The quick brown fox jumps over the lazy dog near the riverbank.",
        ),
        Document::new(
            "essay-copied.txt",
            "THE QUICK BROWN FOX -- jumps over the lazy dog, near the riverbank!",
        ),
        Document::new(
            "essay-unrelated.txt",
            "Photosynthesis converts light energy into chemical energy in plants.",
        ),
        Document::new("essay-short.txt", "abc"),
    ]
}

fn run_pipeline(store: &dyn HistoryStore) -> Result<String, PipelineError> {
    let docs = corpus();
    let session_id = session_id_now(&default_session_offset());
    let batch = check_and_record(&docs, &WinnowConfig::default(), &session_id, store)?;

    assert_eq!(batch.len(), 6);
    assert_eq!(batch.pair(0, 1).unwrap().similarity, 100.0);
    let unrelated = batch.pair(0, 2).unwrap().similarity;
    assert!(unrelated < 20.0, "got {unrelated}");
    for j in 0..3 {
        assert_eq!(batch.pair(j, 3).unwrap().similarity, 0.0);
    }
    Ok(session_id)
}

#[test]
fn full_pipeline_with_in_memory_store() -> Result<(), PipelineError> {
    let store = ResultIndex::new(IndexConfig::new().with_backend(BackendConfig::in_memory()))?;
    let session_id = run_pipeline(&store)?;

    let history = store.history()?;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].session_id, session_id);
    assert_eq!(history[0].results.len(), 6);

    let first = &history[0].results[0];
    assert_eq!(first.doc1_name, "essay-original.txt");
    assert_eq!(first.doc2_name, "essay-copied.txt");
    let doc = store.get_document(first.id, DocSide::Doc2)?.expect("stored doc");
    assert_eq!(
        doc.text,
        "THE QUICK BROWN FOX -- jumps over the lazy dog, near the riverbank!"
    );

    assert_eq!(store.delete_session(&session_id)?, 6);
    assert!(store.history()?.is_empty());
    Ok(())
}

#[test]
fn full_pipeline_with_redb_store_survives_reopen() -> Result<(), PipelineError> {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("plagiarism.redb");
    let cfg = IndexConfig::new().with_backend(BackendConfig::redb(path.to_string_lossy()));

    let session_id = {
        let store = ResultIndex::new(cfg.clone())?;
        run_pipeline(&store)?
    };

    let store = ResultIndex::new(cfg)?;
    let history = store.history()?;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].session_id, session_id);
    let max_id = history[0].results.iter().map(|r| r.id).max().unwrap_or(0);

    // A second batch continues the id sequence.
    let docs = vec![Document::new("x", "first doc"), Document::new("y", "second doc")];
    check_and_record(&docs, &WinnowConfig::default(), "later-session", &store)?;
    let later = store
        .history()?
        .into_iter()
        .find(|s| s.session_id == "later-session")
        .expect("later session");
    assert!(later.results[0].id > max_id);
    Ok(())
}

#[test]
fn sessions_are_listed_newest_first() -> Result<(), PipelineError> {
    let store = ResultIndex::new(IndexConfig::new())?;
    let docs = vec![Document::new("a", "alpha text"), Document::new("b", "beta text")];
    let cfg = WinnowConfig::default();

    check_and_record(&docs, &cfg, "2024-01-01T08:00:00.000000+08:00", &store)?;
    check_and_record(&docs, &cfg, "2024-03-01T08:00:00.000000+08:00", &store)?;
    check_and_record(&docs, &cfg, "2024-02-01T08:00:00.000000+08:00", &store)?;

    let order: Vec<String> = store.history()?.into_iter().map(|s| s.session_id).collect();
    assert_eq!(
        order,
        vec![
            "2024-03-01T08:00:00.000000+08:00",
            "2024-02-01T08:00:00.000000+08:00",
            "2024-01-01T08:00:00.000000+08:00",
        ]
    );
    Ok(())
}
