//! Headless vertexpad host.
//!
//! Loads a scene, replays an input script through the editor and writes
//! the resulting scene back out.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use vertexpad_core::render::DrawCommand;
use vertexpad_core::storage::FileStorage;
use vertexpad_core::{Editor, EditorConfig, RecordingSurface, SceneSnapshot, Storage};

mod script;

#[derive(Parser)]
#[command(name = "vertexpad")]
#[command(about = "Replay editor input against a vector scene", long_about = None)]
#[command(version)]
struct Cli {
    /// Input script (JSON array of steps)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    script: Option<PathBuf>,

    /// Editor config file
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Scene to start from
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    input: Option<PathBuf>,

    /// Write the resulting scene here (stdout if omitted)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    output: Option<PathBuf>,

    /// Also save the scene under this name in the scene store
    #[arg(long)]
    save_as: Option<String>,

    /// Scene store directory (defaults to the platform data directory)
    #[arg(long, value_hint = clap::ValueHint::DirPath)]
    store: Option<PathBuf>,
}

fn open_store(dir: Option<PathBuf>) -> Result<FileStorage> {
    let storage = match dir {
        Some(dir) => FileStorage::new(dir),
        None => FileStorage::default_location(),
    };
    storage.context("Failed to open scene store")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let env = Env::default().default_filter_or("info");
    env_logger::Builder::from_env(env).init();
    log::info!("Starting vertexpad");

    let config = match &cli.config {
        Some(path) => EditorConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EditorConfig::default(),
    };
    let mut editor = Editor::new(config, RecordingSurface::new()).context("Invalid editor config")?;

    if let Some(path) = &cli.input {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene {}", path.display()))?;
        let snapshot = SceneSnapshot::from_json(&json)
            .with_context(|| format!("Failed to parse scene {}", path.display()))?;
        editor.restore(&snapshot);
    }

    if let Some(path) = &cli.script {
        let steps = script::load(path)?;
        let stats = script::replay(&mut editor, &steps)?;
        log::info!(
            "Replayed {} steps ({} ignored, {} repaints, {} context menus suppressed)",
            stats.steps,
            stats.ignored,
            stats.repaints,
            stats.prevented_defaults
        );
    }

    let surface = editor.surface();
    let draws = surface
        .last_frame()
        .iter()
        .filter(|c| matches!(c, DrawCommand::Draw { .. }))
        .count();
    log::info!(
        "{} shapes, {} frames painted, {} draw calls in the last frame",
        editor.scene().len(),
        surface.frame_count(),
        draws
    );

    let snapshot = editor.snapshot();
    let json = snapshot.to_json().context("Failed to serialize scene")?;
    match &cli.output {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote scene to {}", path.display());
        }
        None => println!("{json}"),
    }

    if let Some(name) = &cli.save_as {
        let store = open_store(cli.store.clone())?;
        store.save(name, &snapshot)?;
    }

    Ok(())
}
