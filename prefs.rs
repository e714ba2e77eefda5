/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Preferences (TOML) and command-line parsing.

use bpaf::Bpaf;
use euclid::default::Size2D;
use mindmap_canvas::Camera;
use mindmap_canvas::camera::{DEFAULT_ZOOM_MAX, DEFAULT_ZOOM_MIN, DEFAULT_ZOOM_STEP};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::graph::ChildPlacement;
use crate::history::DEFAULT_MAX_HISTORY;
use crate::layout::LayoutConfig;
use crate::outline::DEFAULT_PALETTE;

pub const DEFAULT_ROOT_TEXT: &str = "Central Idea";
pub const DEFAULT_CHILD_TEXT: &str = "New Idea";
pub const DEFAULT_MAP_NAME: &str = "Untitled Mind Map";

/// Tunables for one editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MindMapPrefs {
    pub history_depth: usize,
    pub layout: LayoutConfig,
    pub child_placement: ChildPlacement,
    pub zoom_min: f32,
    pub zoom_max: f32,
    pub zoom_step: f32,
    /// Node hit box, canvas units.
    pub node_width: f32,
    pub node_height: f32,
    /// Screen pixels a pressed node must travel before it counts as a drag.
    pub drag_threshold: f32,
    pub palette: Vec<String>,
    pub root_text: String,
    pub child_text: String,
    pub untitled_name: String,
    /// Where `mindmaps.redb` lives. Falls back to the platform data dir.
    pub store_dir: Option<PathBuf>,
}

impl Default for MindMapPrefs {
    fn default() -> Self {
        Self {
            history_depth: DEFAULT_MAX_HISTORY,
            layout: LayoutConfig::default(),
            child_placement: ChildPlacement::default(),
            zoom_min: DEFAULT_ZOOM_MIN,
            zoom_max: DEFAULT_ZOOM_MAX,
            zoom_step: DEFAULT_ZOOM_STEP,
            node_width: 150.0,
            node_height: 60.0,
            drag_threshold: 0.0,
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            root_text: DEFAULT_ROOT_TEXT.to_string(),
            child_text: DEFAULT_CHILD_TEXT.to_string(),
            untitled_name: DEFAULT_MAP_NAME.to_string(),
            store_dir: None,
        }
    }
}

impl MindMapPrefs {
    pub fn from_toml_str(raw: &str) -> Result<Self, PrefsError> {
        toml::from_str(raw).map_err(|e| PrefsError::Parse(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, PrefsError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| PrefsError::Io(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&raw)
    }

    pub fn node_size(&self) -> Size2D<f32> {
        Size2D::new(self.node_width, self.node_height)
    }

    pub fn camera(&self) -> Camera {
        Camera::with_bounds(self.zoom_min, self.zoom_max)
    }

    pub fn resolved_store_dir(&self) -> PathBuf {
        self.store_dir.clone().unwrap_or_else(default_store_dir)
    }
}

/// Platform data directory for saved mind maps.
pub fn default_store_dir() -> PathBuf {
    let mut dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    dir.push("mindmap");
    dir
}

#[derive(Debug)]
pub enum PrefsError {
    Io(String),
    Parse(String),
}

impl std::fmt::Display for PrefsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrefsError::Io(e) => write!(f, "IO error: {e}"),
            PrefsError::Parse(e) => write!(f, "Preferences parse error: {e}"),
        }
    }
}

impl std::error::Error for PrefsError {}

/// Mind-map outline and document tool.
#[derive(Debug, Clone, Bpaf)]
#[bpaf(options, version)]
pub struct CliArgs {
    /// TOML preferences file
    #[bpaf(long, argument("PATH"))]
    pub config: Option<PathBuf>,

    /// Directory holding the mind-map database
    #[bpaf(long, argument("DIR"))]
    pub store: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `mindmap=trace`
    #[bpaf(long, argument("FILTER"))]
    pub log: Option<String>,

    #[bpaf(external(command))]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Bpaf)]
pub enum Command {
    /// Turn an indented outline into a laid-out mind-map document
    #[bpaf(command)]
    Parse {
        /// Outline text file
        #[bpaf(positional("OUTLINE"))]
        outline: PathBuf,
        /// Write the document here instead of stdout
        #[bpaf(long, argument("PATH"))]
        out: Option<PathBuf>,
        /// Mind-map name
        #[bpaf(long, argument("NAME"))]
        name: Option<String>,
    },
    /// Print the outline of a mind-map document
    #[bpaf(command)]
    Outline {
        #[bpaf(positional("JSON"))]
        document: PathBuf,
    },
    /// Re-run auto layout over a mind-map document
    #[bpaf(command)]
    Layout {
        #[bpaf(positional("JSON"))]
        document: PathBuf,
        #[bpaf(long, argument("PATH"))]
        out: Option<PathBuf>,
    },
    /// List saved mind maps
    #[bpaf(command)]
    List,
    /// Import a document into the store
    #[bpaf(command)]
    Save {
        #[bpaf(positional("JSON"))]
        document: PathBuf,
    },
    /// Print the outline of a stored mind map
    #[bpaf(command)]
    Show {
        #[bpaf(positional("ID"))]
        id: String,
    },
    /// Remove a stored mind map
    #[bpaf(command)]
    Delete {
        #[bpaf(positional("ID"))]
        id: String,
    },
    /// Export a stored mind map as dated JSON
    #[bpaf(command)]
    Export {
        #[bpaf(positional("ID"))]
        id: String,
        /// Target directory
        #[bpaf(long, argument("DIR"), fallback(PathBuf::from(".")))]
        dir: PathBuf,
    },
}
