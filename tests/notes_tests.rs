use std::{fs, path::PathBuf};

use labgrade::notes::{FileStore, MemoryStore, NoteStore, Notebook, is_note_key};
use uuid::Uuid;

fn temp_dir() -> PathBuf {
    std::env::temp_dir().join(format!("labgrade-notes-{}", Uuid::new_v4()))
}

#[test]
fn note_keys_are_prefixed_or_numeric() {
    assert!(is_note_key("note_1700000000000"));
    assert!(is_note_key("1700000000000"));
    assert!(!is_note_key("theme"));
    assert!(!is_note_key(""));
    assert!(!is_note_key("12a"));
}

#[test]
fn save_then_load_round_trips_fields() {
    let mut notebook = Notebook::new(MemoryStore::new());
    let note = notebook
        .save("Stacks", "data:image/png;base64,AAAA", "push/pop")
        .expect("save");

    let loaded = notebook.load(&note.key()).expect("load").expect("present");
    assert_eq!(loaded, note);
    assert!(note.key().starts_with("note_"));
}

#[test]
fn saved_blob_uses_camel_case() {
    let mut notebook = Notebook::new(MemoryStore::new());
    let note = notebook.save("t", "", "body").expect("save");
    let blob = notebook.store().get(&note.key()).expect("get").expect("blob");
    let json: serde_json::Value = serde_json::from_str(&blob).expect("json");
    assert!(json.get("savedAt").is_some());
    assert_eq!(json["text"], "body");
}

#[test]
fn ids_do_not_collide_within_a_millisecond() {
    let mut notebook = Notebook::new(MemoryStore::new());
    let a = notebook.save("a", "", "").expect("save a");
    let b = notebook.save("b", "", "").expect("save b");
    assert_ne!(a.id, b.id);
    assert_eq!(notebook.list().expect("list").len(), 2);
}

#[test]
fn list_scans_prefixed_and_numeric_keys_only() {
    let mut store = MemoryStore::new();
    store
        .set(
            "1690000000000",
            r#"{"id":1690000000000,"title":"legacy","drawing":"","text":"old","savedAt":"2023-07-22T04:26:40Z"}"#,
        )
        .expect("set legacy");
    store.set("theme", r#""dark""#).expect("set unrelated");
    store.set("note_broken", "{not json").expect("set broken");

    let mut notebook = Notebook::new(store);
    notebook.save("fresh", "", "new").expect("save");

    let notes = notebook.list().expect("list");
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].title, "fresh");
    assert_eq!(notes[1].id, "1690000000000");
}

#[test]
fn delete_removes_either_key_form() {
    let mut store = MemoryStore::new();
    store
        .set(
            "42",
            r#"{"id":"42","title":"","drawing":"","text":"","savedAt":"2024-01-01T00:00:00Z"}"#,
        )
        .expect("set");
    let mut notebook = Notebook::new(store);
    let note = notebook.save("x", "", "").expect("save");

    assert!(notebook.delete("42").expect("delete legacy"));
    assert!(notebook.delete(&note.id).expect("delete new"));
    assert!(!notebook.delete(&note.id).expect("delete again"));
    assert!(notebook.list().expect("list").is_empty());
}

#[test]
fn update_restamps_saved_at() {
    let mut notebook = Notebook::new(MemoryStore::new());
    let mut note = notebook.save("draft", "", "v1").expect("save");
    let first = note.saved_at;
    note.text = "v2".into();
    let updated = notebook.update(note).expect("update");

    assert!(updated.saved_at >= first);
    let loaded = notebook.load(&updated.key()).expect("load").expect("present");
    assert_eq!(loaded.text, "v2");
}

#[test]
fn updating_a_legacy_note_moves_it_to_the_prefixed_key() {
    let mut store = MemoryStore::new();
    store
        .set(
            "1690000000000",
            r#"{"id":1690000000000,"title":"legacy","drawing":"","text":"old","savedAt":"2023-07-22T04:26:40Z"}"#,
        )
        .expect("set legacy");
    let mut notebook = Notebook::new(store);

    let mut note = notebook
        .load("1690000000000")
        .expect("load")
        .expect("present");
    note.text = "new".into();
    notebook.update(note).expect("update");

    assert_eq!(
        notebook.store().keys().expect("keys"),
        vec!["note_1690000000000".to_string()]
    );
    let notes = notebook.list().expect("list");
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].text, "new");
}

#[test]
fn file_store_persists_across_instances() {
    let dir = temp_dir();
    let saved = {
        let mut notebook = Notebook::new(FileStore::new(&dir));
        notebook.save("On disk", "", "persisted").expect("save")
    };

    assert!(dir.join(format!("{}.json", saved.key())).exists());

    let notebook = Notebook::new(FileStore::new(&dir));
    let notes = notebook.list().expect("list");
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].text, "persisted");

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn file_store_rejects_path_like_keys() {
    let dir = temp_dir();
    let mut store = FileStore::new(&dir);
    assert!(store.set("../escape", "{}").is_err());
    assert!(store.get("a/b").is_err());
    assert!(store.keys().expect("keys of missing dir").is_empty());
    let _ = fs::remove_dir_all(dir);
}
