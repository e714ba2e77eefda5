/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Mind-map editing core: node tree, undo history, radial layout, outline
//! text conversion, persistence, and input translation.

pub mod app;
pub mod graph;
pub mod history;
pub mod input;
pub mod layout;
pub mod notify;
pub mod outline;
pub mod persistence;
pub mod prefs;

pub use app::{GraphIntent, MindMapApp, SelectionState};
pub use graph::{Graph, Node, NodeKey};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Install a `tracing` fmt subscriber that also receives `log` records.
///
/// `filter` wins over `MINDMAP_LOG`; both fall back to `warn`.
#[cfg(feature = "tracing")]
pub fn init_tracing(filter: Option<&str>) {
    use tracing_subscriber::EnvFilter;

    let filter = filter
        .map(EnvFilter::new)
        .or_else(|| EnvFilter::try_from_env("MINDMAP_LOG").ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));
    // A second call (tests, embedding hosts) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(not(feature = "tracing"))]
pub fn init_tracing(_filter: Option<&str>) {}
