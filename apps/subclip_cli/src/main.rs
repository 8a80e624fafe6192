mod state;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use state::AppState;
use std::path::{Path, PathBuf};
use subclip_core::events::{self, FormEvent};
use subclip_core::form::{DeleteOutcome, SubclipForm, SubmitOutcome};
use subclip_core::services::ComponentInventory;
use subclip_core::settings::FormSettings;
use subclip_core::store::Library;
use subclip_core::types::{Frame, SubclipId, SubclipMarker};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "subclip-cli")]
#[command(version)]
#[command(about = "Create and delete subclips of an item")]
struct Args {
    /// Library file holding the item's components and subclips
    #[arg(short, long)]
    library: PathBuf,

    /// Form settings file, defaults apply when omitted
    #[arg(short, long)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create one subclip per marker in a JSON marker file
    Batch {
        #[arg(short, long)]
        markers: PathBuf,
    },
    /// Create a single subclip
    Create {
        #[arg(long)]
        name: String,
        /// In point, as timecode or frame number
        #[arg(long)]
        start: String,
        /// Out point, as timecode or frame number
        #[arg(long, default_value = "")]
        end: String,
        /// Video component to cut from, instead of the original shape
        #[arg(long)]
        video: Option<Uuid>,
    },
    /// Delete a subclip
    Delete {
        #[arg(long)]
        id: Uuid,
        /// Confirm the deletion
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    let settings = match &args.settings {
        Some(path) => FormSettings::load_from_file(path)
            .with_context(|| format!("failed to load settings {}", path.display()))?,
        None => FormSettings::default(),
    };
    let library = Library::load_from_file(&args.library)
        .with_context(|| format!("failed to load library {}", args.library.display()))?;

    let confirm = matches!(args.command, Command::Delete { yes: true, .. });
    let state = AppState::new(library, settings);
    let (tx, mut rx) = events::channel();
    let mut form = SubclipForm::new(state.collaborators(confirm), tx);

    let videos = state.store.video_components();
    let audio = state.store.audio_components();

    let changed = match args.command {
        Command::Batch { markers } => {
            let data = std::fs::read_to_string(&markers)
                .with_context(|| format!("failed to read markers {}", markers.display()))?;
            let markers: Vec<SubclipMarker> =
                serde_json::from_str(&data).context("invalid marker file")?;
            form.initialize_from_markers(markers, videos, audio)?;
            match form.submit() {
                Ok(outcome) => report(outcome)?,
                Err(e) => {
                    // Clips stored before the failure stay in the library.
                    save_library(&state, &args.library)?;
                    return Err(e)
                        .with_context(|| format!("{} markers not stored", form.markers().len()));
                }
            }
        }
        Command::Create {
            name,
            start,
            end,
            video,
        } => {
            form.initialise(None, Frame::ZERO, Frame::ZERO, videos.clone(), audio)?;
            if let Some(id) = video {
                let video = videos
                    .into_iter()
                    .find(|v| v.id.0 == id)
                    .with_context(|| format!("no video component {}", id))?;
                form.on_video_select(video);
            }
            form.set_name(name);
            form.set_start_input(start);
            form.set_end_input(end);
            report(form.submit()?)?
        }
        Command::Delete { id, .. } => {
            let id = SubclipId(id);
            let clip = state
                .store
                .subclip(id)
                .with_context(|| format!("no subclip {}", id))?;
            form.initialise(Some(clip), Frame::ZERO, Frame::ZERO, videos, audio)?;
            match form.on_delete().await? {
                DeleteOutcome::Deleted => true,
                DeleteOutcome::Cancelled | DeleteOutcome::MissingId => false,
            }
        }
    };

    for event in events::drain(&mut rx) {
        match event {
            FormEvent::SubclipSaved(batch) => {
                tracing::info!(batch = batch.len(), "Subclips saved")
            }
            FormEvent::ShowSettings => tracing::debug!("Form closed"),
        }
    }

    if changed {
        save_library(&state, &args.library)?;
    }
    Ok(())
}

fn save_library(state: &AppState, path: &Path) -> Result<()> {
    state
        .store
        .snapshot()
        .save_to_file(path)
        .with_context(|| format!("failed to save library {}", path.display()))
}

/// Print what was stored. Returns whether the library changed.
fn report(outcome: SubmitOutcome) -> Result<bool> {
    match outcome {
        SubmitOutcome::Created(clips) => {
            println!("{}", serde_json::to_string_pretty(&clips)?);
            Ok(true)
        }
        SubmitOutcome::Updated(clip) => {
            println!("{}", serde_json::to_string_pretty(&clip)?);
            Ok(true)
        }
        SubmitOutcome::Rejected => bail!("no subclip was stored"),
    }
}
