#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Notes are the one piece of state that outlives a session. Each note is a
//! JSON blob stored under `note_<id>`; keys made only of digits are read back
//! as notes too.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, ensure};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{NOTE_FILE_EXTENSION, NOTE_KEY_PREFIX};

/// String key/value storage.
pub trait NoteStore {
    /// Returns the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    /// Removes `key`; returns whether it existed.
    fn remove(&mut self, key: &str) -> Result<bool>;
    /// Lists every key.
    fn keys(&self) -> Result<Vec<String>>;
}

/// Keeps values in memory. Useful for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// Stored values.
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl NoteStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        Ok(self.entries.remove(key).is_some())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.entries.keys().cloned().collect())
    }
}

/// Stores each value as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Directory holding the files; created on first write.
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the directory backing this store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Maps a key to its file, rejecting keys that are not plain file names.
    fn path_for(&self, key: &str) -> Result<PathBuf> {
        ensure!(
            !key.is_empty()
                && key
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'),
            "Invalid note key `{key}`: only letters, digits, `_` and `-` are allowed"
        );
        Ok(self.dir.join(format!("{key}.{NOTE_FILE_EXTENSION}")))
    }
}

impl NoteStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .with_context(|| format!("Could not read {}", path.display()))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Could not create {}", self.dir.display()))?;
        fs::write(&path, value).with_context(|| format!("Could not write {}", path.display()))
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path).with_context(|| format!("Could not delete {}", path.display()))?;
        Ok(true)
    }

    fn keys(&self) -> Result<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir)
            .with_context(|| format!("Could not list {}", self.dir.display()))?
        {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(NOTE_FILE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                keys.push(stem.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }
}

/// A saved note: a title, an optional sketch and free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Identifier; older notes stored it as a number.
    #[serde(deserialize_with = "string_or_number")]
    pub id:       String,
    /// Title shown in the list.
    #[serde(default)]
    pub title:    String,
    /// Sketch as an image data URL; empty when there is none.
    #[serde(default)]
    pub drawing:  String,
    /// Note body.
    #[serde(default)]
    pub text:     String,
    /// Last time the note was written.
    pub saved_at: DateTime<Utc>,
}

impl Note {
    /// Key the notebook writes this note under.
    pub fn key(&self) -> String {
        format!("{NOTE_KEY_PREFIX}{}", self.id)
    }
}

/// Accepts `"123"` or `123` for the id.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number id, got {other}"
        ))),
    }
}

/// Whether a storage key holds a note.
pub fn is_note_key(key: &str) -> bool {
    key.starts_with(NOTE_KEY_PREFIX) || is_numeric_key(key)
}

/// Legacy notes were stored under their bare numeric id.
fn is_numeric_key(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| c.is_ascii_digit())
}

/// Reads and writes notes through a [`NoteStore`].
#[derive(Debug, Clone, Default)]
pub struct Notebook<S: NoteStore> {
    /// Backing store.
    store: S,
}

impl<S: NoteStore> Notebook<S> {
    /// Wraps a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Saves a new note and returns it.
    pub fn save(
        &mut self,
        title: impl Into<String>,
        drawing: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<Note> {
        let now = Utc::now();
        let mut id = now.timestamp_millis();
        while self.exists(&id.to_string())? {
            id += 1;
        }

        let note = Note {
            id:       id.to_string(),
            title:    title.into(),
            drawing:  drawing.into(),
            text:     text.into(),
            saved_at: now,
        };
        self.write(&note)?;
        tracing::info!(key = %note.key(), "saved note");
        Ok(note)
    }

    /// Rewrites an existing note, stamping a fresh `saved_at`. A note read
    /// from a bare numeric key moves to its prefixed key.
    pub fn update(&mut self, mut note: Note) -> Result<Note> {
        note.saved_at = Utc::now();
        self.write(&note)?;
        if is_numeric_key(&note.id) && self.store.remove(&note.id)? {
            tracing::debug!(key = %note.key(), "migrated legacy note key");
        }
        Ok(note)
    }

    /// Loads the note stored under `key`.
    pub fn load(&self, key: &str) -> Result<Option<Note>> {
        self.store
            .get(key)?
            .map(|blob| {
                serde_json::from_str::<Note>(&blob)
                    .with_context(|| format!("Note `{key}` is not valid"))
            })
            .transpose()
    }

    /// Returns every readable note, newest first. Blobs that fail to parse
    /// are skipped.
    pub fn list(&self) -> Result<Vec<Note>> {
        let mut notes = Vec::new();
        for key in self.store.keys()?.into_iter().filter(|k| is_note_key(k)) {
            match self.load(&key) {
                Ok(Some(note)) => notes.push(note),
                Ok(None) => {}
                Err(e) => tracing::warn!("Skipping note {key}: {e:#}"),
            }
        }
        notes.sort_by(|a, b| b.saved_at.cmp(&a.saved_at).then_with(|| b.id.cmp(&a.id)));
        Ok(notes)
    }

    /// Deletes a note by id, under either key form. Returns whether anything
    /// was removed.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let prefixed = self.store.remove(&format!("{NOTE_KEY_PREFIX}{id}"))?;
        let bare = if is_numeric_key(id) {
            self.store.remove(id)?
        } else {
            false
        };
        Ok(prefixed || bare)
    }

    /// Whether a note with `id` is stored under either key form.
    fn exists(&self, id: &str) -> Result<bool> {
        Ok(self.store.get(&format!("{NOTE_KEY_PREFIX}{id}"))?.is_some()
            || self.store.get(id)?.is_some())
    }

    /// Serializes `note` under its key.
    fn write(&mut self, note: &Note) -> Result<()> {
        let blob = serde_json::to_string(note).context("Could not serialize note")?;
        self.store.set(&note.key(), &blob)
    }
}
