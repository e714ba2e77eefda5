/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Mind-map persistence using redb, plus JSON import/export.
//!
//! Each mind map is one JSON document stored whole under its id in the
//! `mindmaps` table. Writes are single transactions; nothing is journaled.

pub mod types;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use log::{info, warn};
use redb::{ReadableDatabase, ReadableTable};
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use time::macros::format_description;

use crate::graph::Graph;
use types::{DocumentError, MindMapDocument};

const MINDMAP_TABLE: redb::TableDefinition<&str, &[u8]> = redb::TableDefinition::new("mindmaps");
const DATABASE_FILE: &str = "mindmaps.redb";

/// Entry returned by `MindMapStore::list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMindMap {
    pub id: String,
    pub name: String,
}

/// Persistent mind-map store backed by redb
pub struct MindMapStore {
    db: redb::Database,
    base_dir: PathBuf,
}

impl MindMapStore {
    /// Open or create a store in the given directory
    pub fn open(base_dir: PathBuf) -> Result<Self, StoreError> {
        std::fs::create_dir_all(&base_dir)
            .map_err(|e| StoreError::Io(format!("Failed to create dir: {e}")))?;

        let db = redb::Database::create(base_dir.join(DATABASE_FILE))
            .map_err(|e| StoreError::Redb(format!("{e}")))?;

        // Create the table up front so reads on a fresh store succeed.
        let write_txn = db
            .begin_write()
            .map_err(|e| StoreError::Redb(format!("{e}")))?;
        {
            let _table = write_txn
                .open_table(MINDMAP_TABLE)
                .map_err(|e| StoreError::Redb(format!("{e}")))?;
        }
        write_txn
            .commit()
            .map_err(|e| StoreError::Redb(format!("{e}")))?;

        info!("Opened mind-map store at {}", base_dir.display());
        Ok(Self { db, base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Write a document, replacing any previous version with the same id.
    pub fn save(&mut self, document: &MindMapDocument) -> Result<(), StoreError> {
        let id = document.id.trim();
        if id.is_empty() {
            return Err(StoreError::Invalid(DocumentError::InvalidId(document.id.clone())));
        }
        let bytes = serde_json::to_vec(document).map_err(|e| StoreError::Json(format!("{e}")))?;
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| StoreError::Redb(format!("{e}")))?;
        {
            let mut table = write_txn
                .open_table(MINDMAP_TABLE)
                .map_err(|e| StoreError::Redb(format!("{e}")))?;
            table
                .insert(id, bytes.as_slice())
                .map_err(|e| StoreError::Redb(format!("{e}")))?;
        }
        write_txn
            .commit()
            .map_err(|e| StoreError::Redb(format!("{e}")))?;
        Ok(())
    }

    /// Load a validated document. `Ok(None)` if nothing is stored under `id`.
    pub fn load(&self, id: &str) -> Result<Option<MindMapDocument>, StoreError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| StoreError::Redb(format!("{e}")))?;
        let table = read_txn
            .open_table(MINDMAP_TABLE)
            .map_err(|e| StoreError::Redb(format!("{e}")))?;
        let Some(entry) = table
            .get(id)
            .map_err(|e| StoreError::Redb(format!("{e}")))?
        else {
            return Ok(None);
        };
        let document = parse_document(entry.value())?;
        Ok(Some(document))
    }

    /// Stored mind maps, sorted by name then id. Unreadable rows are skipped.
    pub fn list(&self) -> Vec<StoredMindMap> {
        let Ok(read_txn) = self.db.begin_read() else {
            return Vec::new();
        };
        let Ok(table) = read_txn.open_table(MINDMAP_TABLE) else {
            return Vec::new();
        };
        let Ok(iter) = table.iter() else {
            return Vec::new();
        };
        let mut maps = Vec::new();
        for entry in iter.flatten() {
            let (key, value) = entry;
            match serde_json::from_slice::<MindMapDocument>(value.value()) {
                Ok(document) => maps.push(StoredMindMap {
                    id: key.value().to_string(),
                    name: document.name,
                }),
                Err(e) => warn!("Skipping unreadable mind map '{}': {e}", key.value()),
            }
        }
        maps.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        maps
    }

    /// Remove a stored mind map. Returns whether anything was removed.
    pub fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| StoreError::Redb(format!("{e}")))?;
        let removed = {
            let mut table = write_txn
                .open_table(MINDMAP_TABLE)
                .map_err(|e| StoreError::Redb(format!("{e}")))?;
            table
                .remove(id)
                .map_err(|e| StoreError::Redb(format!("{e}")))?
                .is_some()
        };
        write_txn
            .commit()
            .map_err(|e| StoreError::Redb(format!("{e}")))?;
        Ok(removed)
    }
}

/// Parse and validate a JSON document.
pub fn parse_document(bytes: &[u8]) -> Result<MindMapDocument, StoreError> {
    let document: MindMapDocument =
        serde_json::from_slice(bytes).map_err(|e| StoreError::Json(format!("{e}")))?;
    Graph::from_document(&document).map_err(StoreError::Invalid)?;
    Ok(document)
}

/// Read and validate a `.json` mind-map file.
pub fn import_json(path: &Path) -> Result<MindMapDocument, StoreError> {
    let bytes = std::fs::read(path)
        .map_err(|e| StoreError::Io(format!("Failed to read {}: {e}", path.display())))?;
    parse_document(&bytes)
}

/// Write `document` as pretty JSON into `dir`. Returns the written path.
pub fn export_json(
    document: &MindMapDocument,
    dir: &Path,
    date: OffsetDateTime,
) -> Result<PathBuf, StoreError> {
    std::fs::create_dir_all(dir)
        .map_err(|e| StoreError::Io(format!("Failed to create dir: {e}")))?;
    let path = dir.join(export_file_name(&document.name, date)?);
    let json =
        serde_json::to_string_pretty(document).map_err(|e| StoreError::Json(format!("{e}")))?;
    std::fs::write(&path, json)
        .map_err(|e| StoreError::Io(format!("Failed to write {}: {e}", path.display())))?;
    Ok(path)
}

/// `<name with whitespace runs as "_">_<YYYY-MM-DD>.json`
pub fn export_file_name(name: &str, date: OffsetDateTime) -> Result<String, StoreError> {
    let stem = name.split_whitespace().collect::<Vec<_>>().join("_");
    let day = date
        .format(format_description!("[year]-[month]-[day]"))
        .map_err(|e| StoreError::Io(format!("Failed to format date: {e}")))?;
    Ok(format!("{stem}_{day}.json"))
}

/// Encode raw image bytes as a `data:` URL, sniffing the MIME type.
pub fn image_data_url(bytes: &[u8]) -> Option<String> {
    let kind = infer::get(bytes)?;
    if kind.matcher_type() != infer::MatcherType::Image {
        return None;
    }
    Some(format!(
        "data:{};base64,{}",
        kind.mime_type(),
        STANDARD.encode(bytes)
    ))
}

/// Errors from the mind-map store and file import/export
#[derive(Debug)]
pub enum StoreError {
    Io(String),
    Redb(String),
    Json(String),
    Invalid(DocumentError),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "IO error: {e}"),
            StoreError::Redb(e) => write!(f, "Redb error: {e}"),
            StoreError::Json(e) => write!(f, "JSON error: {e}"),
            StoreError::Invalid(e) => write!(f, "Invalid mind map: {e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Invalid(e) => Some(e),
            _ => None,
        }
    }
}
