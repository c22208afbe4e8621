use pocket_video_player_core::search::history::SearchHistory;

#[test]
fn history_round_trip_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("searches");

    {
        let mut history = SearchHistory::load(&path).unwrap();
        history.append("First Query").unwrap();
        history.append("second query").unwrap();
        history.append("first query").unwrap(); // duplicate after lowercasing
    }

    let blob = std::fs::read_to_string(&path).unwrap();
    assert_eq!(blob, "first query;second query;");

    let history = SearchHistory::load(&path).unwrap();
    assert_eq!(history.entries(), ["second query", "first query"]);
}

#[test]
fn corrupt_blob_keeps_readable_entries() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("searches");
    std::fs::write(&path, ";;cats; ;dogs;").unwrap();

    let history = SearchHistory::load(&path).unwrap();
    assert_eq!(history.entries(), ["dogs", "cats"]);
}
