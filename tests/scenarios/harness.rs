/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use euclid::default::Size2D;
use mindmap::input::InteractionController;
use mindmap::notify::Toast;
use mindmap::prefs::MindMapPrefs;
use mindmap::{GraphIntent, MindMapApp, Node, NodeKey};
use mindmap_canvas::{PointerEvent, WheelEvent};

/// One app plus its interaction controller, driven like a host would.
pub(crate) struct TestRegistry {
    pub(crate) app: MindMapApp,
    pub(crate) controller: InteractionController,
    pub(crate) toasts: Vec<Toast>,
}

impl TestRegistry {
    pub(crate) fn new() -> Self {
        Self::with_prefs(MindMapPrefs::default())
    }

    pub(crate) fn with_prefs(prefs: MindMapPrefs) -> Self {
        let mut app = MindMapApp::new(prefs);
        app.seed_rng(0x5EED);
        app.set_viewport_size(Size2D::new(1280.0, 800.0));
        let controller = InteractionController::for_app(&app);
        Self {
            app,
            controller,
            toasts: Vec::new(),
        }
    }

    pub(crate) fn root(&self) -> NodeKey {
        self.app.graph().root().expect("app always has a root")
    }

    pub(crate) fn node(&self, key: NodeKey) -> &Node {
        self.app.graph().get_node(key).expect("node exists")
    }

    pub(crate) fn find(&self, text: &str) -> NodeKey {
        self.app
            .graph()
            .nodes()
            .find(|(_, node)| node.text == text)
            .map(|(key, _)| key)
            .unwrap_or_else(|| panic!("no node labelled {text:?}"))
    }

    pub(crate) fn apply(&mut self, intents: impl IntoIterator<Item = GraphIntent>) {
        self.app.apply_intents(intents);
        self.toasts.extend(self.app.take_pending_toasts());
    }

    pub(crate) fn add_child(&mut self, parent: NodeKey) -> NodeKey {
        self.apply([GraphIntent::AddChild { parent }]);
        self.app.selected().expect("new child is selected")
    }

    pub(crate) fn pointer(&mut self, event: PointerEvent) -> Vec<GraphIntent> {
        let intents = self.controller.on_pointer(&self.app, &event);
        self.apply(intents.clone());
        intents
    }

    pub(crate) fn wheel(&mut self, event: WheelEvent) {
        let intents = self.controller.on_wheel(&self.app, &event);
        self.apply(intents);
    }

    pub(crate) fn key(&mut self, event: keyboard_types::KeyboardEvent) -> Vec<GraphIntent> {
        let intents = self.controller.on_key(&event);
        self.apply(intents.clone());
        intents
    }
}
