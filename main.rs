/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::error::Error;
use std::path::Path;
use std::process::ExitCode;

use log::error;
use mindmap::app::{GraphIntent, MindMapApp};
use mindmap::notify::{LogToastSink, ToastSink};
use mindmap::persistence::types::MindMapDocument;
use mindmap::persistence::{MindMapStore, import_json};
use mindmap::prefs::{CliArgs, Command, MindMapPrefs, cli_args};
use time::OffsetDateTime;

fn main() -> ExitCode {
    let args = cli_args().run();
    mindmap::init_tracing(args.log.as_deref());

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("mindmap: {e}");
            ExitCode::FAILURE
        },
    }
}

fn run(args: CliArgs) -> Result<(), Box<dyn Error>> {
    let mut prefs = match &args.config {
        Some(path) => MindMapPrefs::load(path)?,
        None => MindMapPrefs::default(),
    };
    if let Some(store) = &args.store {
        prefs.store_dir = Some(store.clone());
    }

    #[cfg(feature = "tracing")]
    let _span = tracing::info_span!("mindmap", version = mindmap::VERSION).entered();

    match args.command {
        Command::Parse { outline, out, name } => {
            let text = std::fs::read_to_string(&outline)?;
            let mut app = MindMapApp::new(prefs);
            app.apply_intents([GraphIntent::ReplaceFromOutline { text }]);
            if let Some(name) = name {
                app.apply_intents([GraphIntent::Rename { name }]);
            }
            let generated = app.can_undo();
            drain_toasts(&mut app);
            if !generated {
                return Err(format!("{} contains no outline", outline.display()).into());
            }
            write_document(&app.document(), out.as_deref())
        },
        Command::Outline { document } => {
            let app = MindMapApp::from_document(&import_json(&document)?, prefs)?;
            println!("{}", app.outline_text());
            Ok(())
        },
        Command::Layout { document, out } => {
            let mut app = MindMapApp::from_document(&import_json(&document)?, prefs)?;
            app.apply_intents([GraphIntent::AutoLayout]);
            write_document(&app.document(), out.as_deref())
        },
        Command::List => {
            let store = MindMapStore::open(prefs.resolved_store_dir())?;
            for entry in store.list() {
                println!("{}\t{}", entry.id, entry.name);
            }
            Ok(())
        },
        Command::Save { document } => {
            let mut store = MindMapStore::open(prefs.resolved_store_dir())?;
            let mut app = MindMapApp::from_document(&import_json(&document)?, prefs)?;
            let saved = app.save_to_store(&mut store);
            drain_toasts(&mut app);
            if !saved {
                return Err("save failed".into());
            }
            println!("{}", app.id());
            Ok(())
        },
        Command::Show { id } => {
            let store = MindMapStore::open(prefs.resolved_store_dir())?;
            let mut app = MindMapApp::new(prefs);
            let loaded = app.load_from_store(&store, &id);
            drain_toasts(&mut app);
            if !loaded {
                return Err(format!("could not load mind map '{id}'").into());
            }
            println!("# {}", app.name());
            println!("{}", app.outline_text());
            Ok(())
        },
        Command::Delete { id } => {
            let mut store = MindMapStore::open(prefs.resolved_store_dir())?;
            if !store.delete(&id)? {
                return Err(format!("no mind map stored under '{id}'").into());
            }
            Ok(())
        },
        Command::Export { id, dir } => {
            let store = MindMapStore::open(prefs.resolved_store_dir())?;
            let mut app = MindMapApp::new(prefs);
            if !app.load_from_store(&store, &id) {
                drain_toasts(&mut app);
                return Err(format!("could not load mind map '{id}'").into());
            }
            let written = app.export_to_dir(&dir, OffsetDateTime::now_utc());
            drain_toasts(&mut app);
            let path = written.ok_or("export failed")?;
            println!("{}", path.display());
            Ok(())
        },
    }
}

fn drain_toasts(app: &mut MindMapApp) {
    let mut sink = LogToastSink;
    for toast in app.take_pending_toasts() {
        sink.show_toast(&toast);
    }
}

fn write_document(document: &MindMapDocument, out: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(document)?;
    match out {
        Some(path) => std::fs::write(path, json)?,
        None => println!("{json}"),
    }
    Ok(())
}
