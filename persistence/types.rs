/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Serializable document types for mind-map persistence.
//!
//! These mirror the on-disk JSON shape (camelCase keys) and are converted
//! to and from the in-memory `Graph` by `Graph::to_document` and
//! `Graph::from_document`.

use serde::{Deserialize, Serialize};

/// Whole mind map as stored, imported, or exported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MindMapDocument {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// `None` when the key is absent, which loading rejects.
    #[serde(default)]
    pub nodes: Option<Vec<PersistedNode>>,
    #[serde(default)]
    pub connections: Vec<PersistedConnection>,
}

/// Persisted node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedNode {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub level: usize,
    pub x: f32,
    pub y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub withdrawn: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Persisted parent→child connection (informational only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedConnection {
    pub source: String,
    pub target: String,
}

/// Reasons a document cannot become a valid tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// `nodes` missing or not an array.
    MissingNodes,
    MissingRoot,
    MultipleRoots(usize),
    InvalidId(String),
    DuplicateId(String),
    DanglingParent(String),
    Cycle,
}

impl std::fmt::Display for DocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentError::MissingNodes => write!(f, "document has no node list"),
            DocumentError::MissingRoot => write!(f, "document has no root node"),
            DocumentError::MultipleRoots(n) => write!(f, "document has {n} root nodes"),
            DocumentError::InvalidId(id) => write!(f, "invalid node id: {id}"),
            DocumentError::DuplicateId(id) => write!(f, "duplicate node id: {id}"),
            DocumentError::DanglingParent(id) => write!(f, "parent {id} does not exist"),
            DocumentError::Cycle => write!(f, "parent links form a cycle"),
        }
    }
}

impl std::error::Error for DocumentError {}
