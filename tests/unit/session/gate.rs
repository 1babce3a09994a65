use super::*;

#[test]
fn memory_gate_roundtrip() {
    let store = Rc::new(MemoryStore::new());
    let gate = SessionGate::new(store.clone());
    assert!(!gate.has_run("fake_welcome_seen"));
    gate.mark_run("fake_welcome_seen");
    assert!(gate.has_run("fake_welcome_seen"));
    assert!(!gate.has_run("fake_typing_welcome_seen"));
    assert_eq!(store.writes(), 1);
}

#[test]
fn only_the_exact_flag_counts() {
    let store = Rc::new(MemoryStore::new());
    store.set("k", "yes").unwrap();
    let gate = SessionGate::new(store);
    assert!(!gate.has_run("k"));
}

#[test]
fn unavailable_storage_fails_safe() {
    let gate = SessionGate::new(Rc::new(UnavailableStore));
    assert!(!gate.has_run("k"));
    gate.mark_run("k");
    assert!(!gate.has_run("k"));
}

#[test]
fn file_store_persists_between_instances() {
    let dir = PathBuf::from("target").join("unit_session_gate");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("session.json");
    let _ = std::fs::remove_file(&path);

    let gate = SessionGate::new(Rc::new(FileStore::new(&path)));
    assert!(!gate.has_run("fake_welcome_seen"));
    gate.mark_run("fake_welcome_seen");

    let again = SessionGate::new(Rc::new(FileStore::new(&path)));
    assert!(again.has_run("fake_welcome_seen"));
}

#[test]
fn corrupt_file_reads_as_not_run() {
    let dir = PathBuf::from("target").join("unit_session_gate");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("corrupt.json");
    std::fs::write(&path, "{not json").unwrap();

    let store = FileStore::new(&path);
    assert!(matches!(store.get("k"), Err(CurtainError::Serde(_))));
    assert!(!SessionGate::new(Rc::new(store)).has_run("k"));
}
