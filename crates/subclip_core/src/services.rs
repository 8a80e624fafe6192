//! Collaborator interfaces the subclip form depends on.
//!
//! The form never reaches for globals: the composition root builds a
//! [`Collaborators`] bundle and hands it to [`crate::form::SubclipForm::new`].

use crate::error::Result;
use crate::types::*;
use std::rc::Rc;
use tokio::sync::oneshot;

/// Persistent store of subclips.
pub trait SubclipStorage {
    /// Add a new subclip. Returns the stored clip, with its id assigned.
    fn add(&self, clip: Subclip) -> Result<Subclip>;
    fn update(&self, clip: Subclip) -> Result<()>;
    fn remove(&self, id: SubclipId) -> Result<()>;
}

/// Read-only view of the components of the item being edited.
pub trait ComponentInventory {
    fn video_components(&self) -> Vec<VideoComponent>;
    fn current_video_component(&self) -> Option<VideoComponent>;
    fn audio_components(&self) -> Vec<AudioComponent>;
}

/// Conversion between frame numbers and their display form.
pub trait FrameService {
    fn format_frame(&self, frame: Frame) -> String;
    fn start_frame(&self, input: &str) -> Frame;
    /// Parse an out point. `start` is available for relative or default values.
    fn end_frame(&self, input: &str, start: Frame) -> Frame;
}

/// In/out marks on the player.
pub trait PlaybackMarks {
    fn clear_points(&self);
    fn clear_points_if_set(&self);
    fn mark_in_point(&self, frame: Frame);
    fn mark_out_point(&self, frame: Frame);
}

/// Confirmation prompt shown before a destructive action.
pub trait DeleteDialog {
    /// The receiver resolves when the user confirms. Dropping the sender
    /// without sending means the dialog was dismissed.
    fn show_delete_dialog(&self, title: &str, message: &str) -> oneshot::Receiver<()>;
}

/// Fire-and-forget user notifications.
pub trait Notifier {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureToggle {
    DiscreteSubclips,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    SubclipAudioExportShape,
}

pub trait SettingsLookup {
    fn feature_enabled(&self, toggle: FeatureToggle) -> bool;
    fn setting(&self, setting: Setting) -> Option<String>;
}

/// Display names used in the audio selection labels.
pub trait LabelFormatter {
    fn component_name(&self, component: &AudioComponent) -> String;
    fn language(&self, code: Option<&str>) -> String;
}

#[derive(Clone)]
pub struct Collaborators {
    pub storage: Rc<dyn SubclipStorage>,
    pub inventory: Rc<dyn ComponentInventory>,
    pub frames: Rc<dyn FrameService>,
    pub playback: Rc<dyn PlaybackMarks>,
    pub dialog: Rc<dyn DeleteDialog>,
    pub notifier: Rc<dyn Notifier>,
    pub settings: Rc<dyn SettingsLookup>,
    pub labels: Rc<dyn LabelFormatter>,
}
