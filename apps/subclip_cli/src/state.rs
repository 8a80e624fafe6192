use std::rc::Rc;
use subclip_core::frames::Timecode;
use subclip_core::labels::DefaultLabels;
use subclip_core::services::*;
use subclip_core::settings::FormSettings;
use subclip_core::store::{Library, MemoryStore};
use subclip_core::types::Frame;
use tokio::sync::oneshot;

pub struct AppState {
    pub store: Rc<MemoryStore>,
    pub settings: FormSettings,
}

impl AppState {
    pub fn new(library: Library, settings: FormSettings) -> Self {
        Self {
            store: Rc::new(MemoryStore::new(library)),
            settings,
        }
    }

    /// Wire the form to the library. `confirm_delete` answers the delete prompt.
    pub fn collaborators(&self, confirm_delete: bool) -> Collaborators {
        Collaborators {
            storage: self.store.clone(),
            inventory: self.store.clone(),
            frames: Rc::new(Timecode::new(self.settings.fps)),
            playback: Rc::new(LoggedPlayback),
            dialog: Rc::new(FlagDialog {
                confirm: confirm_delete,
            }),
            notifier: Rc::new(LoggedNotifier),
            settings: Rc::new(self.settings.clone()),
            labels: Rc::new(DefaultLabels),
        }
    }
}

/// There is no player behind the CLI, marks only show up in the log.
struct LoggedPlayback;

impl PlaybackMarks for LoggedPlayback {
    fn clear_points(&self) {
        tracing::debug!("clear in/out points");
    }

    fn clear_points_if_set(&self) {
        tracing::debug!("clear in/out points if set");
    }

    fn mark_in_point(&self, frame: Frame) {
        tracing::debug!(%frame, "mark in");
    }

    fn mark_out_point(&self, frame: Frame) {
        tracing::debug!(%frame, "mark out");
    }
}

struct LoggedNotifier;

impl Notifier for LoggedNotifier {
    fn success(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!("{}", message);
    }
}

struct FlagDialog {
    confirm: bool,
}

impl DeleteDialog for FlagDialog {
    fn show_delete_dialog(&self, title: &str, message: &str) -> oneshot::Receiver<()> {
        tracing::info!("{}: {}", title, message);
        let (tx, rx) = oneshot::channel();
        if self.confirm {
            let _ = tx.send(());
        } else {
            tracing::info!("Pass --yes to confirm");
        }
        rx
    }
}
