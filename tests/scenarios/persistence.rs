/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::harness::TestRegistry;
use mindmap::GraphIntent;
use mindmap::notify::Toast;
use mindmap::persistence::{MindMapStore, image_data_url};
use tempfile::TempDir;
use time::macros::datetime;

#[test]
fn test_save_list_load_roundtrip() {
    let dir = TempDir::new().unwrap();
    let mut store = MindMapStore::open(dir.path().to_path_buf()).unwrap();

    let mut harness = TestRegistry::new();
    harness.apply([
        GraphIntent::ReplaceFromOutline {
            text: "Garden\n  Beds\n  Tools".into(),
        },
        GraphIntent::Rename {
            name: "Spring garden".into(),
        },
    ]);
    let beds = harness.find("Beds");
    let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 13];
    harness.apply([GraphIntent::SetNodeImage {
        key: beds,
        image: image_data_url(&png),
    }]);
    assert!(harness.app.save_to_store(&mut store));

    let listed = store.list();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Spring garden");

    let mut reloaded = TestRegistry::new();
    assert!(reloaded.app.load_from_store(&store, &listed[0].id));
    assert_eq!(reloaded.app.outline_text(), "Garden\n  Beds\n  Tools");
    assert_eq!(reloaded.app.name(), "Spring garden");
    let beds = reloaded.find("Beds");
    assert!(
        reloaded
            .node(beds)
            .image
            .as_deref()
            .is_some_and(|image| image.starts_with("data:image/png;base64,"))
    );
    assert!(!reloaded.app.can_undo());
}

#[test]
fn test_corrupt_store_entry_falls_back_to_default_map() {
    let dir = TempDir::new().unwrap();
    let mut store = MindMapStore::open(dir.path().to_path_buf()).unwrap();
    let mut harness = TestRegistry::new();
    let mut document = harness.app.document();
    // Two roots is not a tree.
    let mut extra = document.nodes.as_ref().unwrap()[0].clone();
    extra.id = uuid::Uuid::new_v4().to_string();
    document.nodes.as_mut().unwrap().push(extra);
    store.save(&document).unwrap();

    assert!(!harness.app.load_from_store(&store, &document.id));
    harness.toasts.extend(harness.app.take_pending_toasts());
    assert_eq!(harness.app.graph().node_count(), 1);
    assert_eq!(harness.toasts.last(), Some(&Toast::error("Failed to load mind map")));
}

#[test]
fn test_export_then_import_restores_map() {
    let dir = TempDir::new().unwrap();
    let mut harness = TestRegistry::new();
    harness.apply([
        GraphIntent::ReplaceFromOutline {
            text: "Launch\n  Docs\n  Demo\n    Video".into(),
        },
        GraphIntent::Rename {
            name: "Product  launch".into(),
        },
    ]);
    let path = harness
        .app
        .export_to_dir(dir.path(), datetime!(2024-11-05 10:30 UTC))
        .unwrap();
    assert_eq!(path.file_name().unwrap(), "Product_launch_2024-11-05.json");

    let mut other = TestRegistry::new();
    other.add_child(other.root());
    assert!(other.app.import_from_path(&path));
    assert_eq!(other.app.outline_text(), harness.app.outline_text());
    assert_eq!(other.app.id(), harness.app.id());
    assert!(!other.app.can_undo());
}

#[test]
fn test_import_of_malformed_json_keeps_state() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    let mut harness = TestRegistry::new();
    let child = harness.add_child(harness.root());
    assert!(!harness.app.import_from_path(&path));
    assert!(harness.app.graph().contains(child));
    assert!(harness.app.can_undo());
}

#[test]
fn test_import_keeps_opaque_ids_through_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("legacy.json");
    std::fs::write(
        &path,
        r#"{"id":"k2f9","name":"Legacy","nodes":[
            {"id":"1","text":"Central Idea","parentId":null,"level":0,"x":0,"y":0},
            {"id":"lx3k9abc","text":"Branch","parentId":"1","level":1,"x":180,"y":80},
            {"id":"lx3k9abd","text":"Leaf","parentId":"lx3k9abc","level":2,"x":360,"y":160}
        ]}"#,
    )
    .unwrap();

    let mut harness = TestRegistry::new();
    assert!(harness.app.import_from_path(&path));
    assert_eq!(harness.app.id(), "k2f9");
    assert_eq!(harness.app.outline_text(), "Central Idea\n  Branch\n    Leaf");
    let leaf = harness.find("Leaf");
    assert_eq!(harness.node(leaf).id, "lx3k9abd");

    let mut store = MindMapStore::open(dir.path().join("store")).unwrap();
    assert!(harness.app.save_to_store(&mut store));
    let mut reloaded = TestRegistry::new();
    assert!(reloaded.app.load_from_store(&store, "k2f9"));
    assert_eq!(reloaded.app.outline_text(), harness.app.outline_text());
}
