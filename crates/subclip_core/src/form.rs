//! The subclip form: defines a named frame range of a video, either by hand
//! or from a batch of markers, plus the audio that goes with it.

use crate::error::{CoreError, Result};
use crate::events::{EventSender, FormEvent, MarkEvent};
use crate::selection::SelectionMap;
use crate::services::{Collaborators, FeatureToggle, Setting};
use crate::types::*;
use tracing::{debug, error};

/// Result of [`SubclipForm::submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// New subclips were stored, in creation order.
    Created(Vec<Subclip>),
    /// The subclip being edited was updated.
    Updated(Subclip),
    /// Nothing was stored; the user has been told why.
    Rejected,
}

/// Result of [`SubclipForm::on_delete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
    /// The working clip was never stored.
    MissingId,
}

pub struct SubclipForm {
    services: Collaborators,
    events: EventSender,

    discrete_subclips_enabled: bool,
    audio_export_shape: Option<String>,

    clip: Subclip,
    editing: bool,
    focus: bool,
    markers: Vec<SubclipMarker>,
    start_input: String,
    end_input: String,

    sorted_video_components: Vec<VideoComponent>,
    sorted_audio_components: Vec<AudioComponent>,
    selected_video: Option<VideoComponent>,
    discrete_audio: SelectionMap,
    muxed_audio: SelectionMap,
}

impl SubclipForm {
    pub fn new(services: Collaborators, events: EventSender) -> Self {
        let discrete_subclips_enabled = services
            .settings
            .feature_enabled(FeatureToggle::DiscreteSubclips);
        let audio_export_shape = services.settings.setting(Setting::SubclipAudioExportShape);

        Self {
            services,
            events,
            discrete_subclips_enabled,
            audio_export_shape,
            clip: Subclip::default(),
            editing: false,
            focus: false,
            markers: Vec::new(),
            start_input: String::new(),
            end_input: String::new(),
            sorted_video_components: Vec::new(),
            sorted_audio_components: Vec::new(),
            selected_video: None,
            discrete_audio: SelectionMap::new(),
            muxed_audio: SelectionMap::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Initialisation
    // -----------------------------------------------------------------------

    /// Open the form for `clip`, or for a new clip between `in_point` and
    /// `out_point` when `clip` is `None`.
    pub fn initialise(
        &mut self,
        clip: Option<Subclip>,
        in_point: Frame,
        out_point: Frame,
        sorted_video_components: Vec<VideoComponent>,
        sorted_audio_components: Vec<AudioComponent>,
    ) -> Result<()> {
        debug!("Initializing subclip form");

        let bounds = match &clip {
            Some(clip) => Some(clip.bounds().ok_or(CoreError::MissingRange)?),
            None => None,
        };
        // Everything fallible happens before the form is touched.
        let video = self.resolve_video(clip.as_ref())?;

        self.markers.clear();
        self.focus = true;
        self.editing = clip.is_some();
        self.sorted_video_components = sorted_video_components;
        self.sorted_audio_components = sorted_audio_components;

        self.discrete_audio = self.discrete_selections(clip.as_ref());
        self.set_video(video, clip.as_ref());

        let (Some(clip), Some((start, end))) = (clip, bounds) else {
            self.clip = Subclip::named("");
            self.start_input = self.services.frames.format_frame(in_point);
            self.end_input = self.services.frames.format_frame(out_point);
            return Ok(());
        };

        self.clip = clip;
        self.start_input = self.services.frames.format_frame(start);
        self.end_input = self.services.frames.format_frame(end);

        let playback = &self.services.playback;
        playback.clear_points_if_set();
        playback.mark_in_point(start);
        playback.mark_out_point(end);
        Ok(())
    }

    /// Open the form in batch mode: one subclip per marker on submit.
    pub fn initialize_from_markers(
        &mut self,
        markers: Vec<SubclipMarker>,
        sorted_video_components: Vec<VideoComponent>,
        sorted_audio_components: Vec<AudioComponent>,
    ) -> Result<()> {
        debug!(markers = markers.len(), "Initializing subclip form from markers");

        let video = self.resolve_video(None)?;

        self.editing = false;
        self.clip = Subclip::default();
        self.sorted_video_components = sorted_video_components;
        self.sorted_audio_components = sorted_audio_components;
        self.discrete_audio = self.discrete_selections(None);
        self.set_video(video, None);
        self.markers = markers;
        Ok(())
    }

    /// Select the video for `clip`, or the original shape for a new clip.
    pub fn load_video(&mut self, clip: Option<&Subclip>) -> Result<()> {
        let video = self.resolve_video(clip)?;
        self.set_video(video, clip);
        Ok(())
    }

    fn resolve_video(&self, clip: Option<&Subclip>) -> Result<VideoComponent> {
        let inventory = &self.services.inventory;
        let video = match clip {
            None => inventory
                .video_components()
                .into_iter()
                .find(VideoComponent::is_original_shape)
                .or_else(|| inventory.current_video_component())
                .ok_or(CoreError::NoVideoAvailable)?,
            Some(clip) => {
                let video_id = clip.video_id.ok_or(CoreError::NoVideoAvailable)?;
                inventory
                    .video_components()
                    .into_iter()
                    .find(|v| v.id == video_id)
                    .ok_or(CoreError::VideoNotFound(video_id))?
            }
        };
        Ok(video)
    }

    /// The user picked another video.
    pub fn on_video_select(&mut self, video: VideoComponent) {
        let clip = self.editing.then(|| self.clip.clone());
        self.set_video(video, clip.as_ref());
    }

    fn set_video(&mut self, video: VideoComponent, clip: Option<&Subclip>) {
        debug!(video = %video.id, shape = %video.shape_tag, "Video selected");
        self.muxed_audio = SelectionMap::muxed(&video.audio, clip);
        self.selected_video = Some(video);
    }

    fn discrete_selections(&self, clip: Option<&Subclip>) -> SelectionMap {
        if self.audio_export_shape.is_none() {
            return SelectionMap::new();
        }
        SelectionMap::discrete(&self.services.inventory.audio_components(), clip)
    }

    // -----------------------------------------------------------------------
    // Field binding
    // -----------------------------------------------------------------------

    pub fn on_mark_event(&mut self, event: MarkEvent) {
        match event {
            MarkEvent::InSet(frame) => self.start_input = self.services.frames.format_frame(frame),
            MarkEvent::OutSet(frame) => self.end_input = self.services.frames.format_frame(frame),
        }
    }

    pub fn start_input(&self) -> &str {
        &self.start_input
    }

    pub fn set_start_input(&mut self, input: impl Into<String>) {
        self.start_input = input.into();
    }

    pub fn end_input(&self) -> &str {
        &self.end_input
    }

    pub fn set_end_input(&mut self, input: impl Into<String>) {
        self.end_input = input.into();
    }

    pub fn name(&self) -> &str {
        &self.clip.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.clip.name = name.into();
    }

    /// Toggle a muxed audio track of the selected video.
    pub fn on_audio_select(&mut self, id: ComponentId) -> Result<bool> {
        self.muxed_audio.toggle(id)
    }

    /// Toggle a discrete audio component.
    pub fn on_external_audio_select(&mut self, id: ComponentId) -> Result<bool> {
        self.discrete_audio.toggle(id)
    }

    pub fn clip(&self) -> &Subclip {
        &self.clip
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn has_focus(&self) -> bool {
        self.focus
    }

    pub fn markers(&self) -> &[SubclipMarker] {
        &self.markers
    }

    pub fn selected_video(&self) -> Option<&VideoComponent> {
        self.selected_video.as_ref()
    }

    pub fn discrete_audio(&self) -> &SelectionMap {
        &self.discrete_audio
    }

    pub fn muxed_audio(&self) -> &SelectionMap {
        &self.muxed_audio
    }

    pub fn discrete_subclips_enabled(&self) -> bool {
        self.discrete_subclips_enabled
    }

    pub fn sorted_video_components(&self) -> &[VideoComponent] {
        &self.sorted_video_components
    }

    pub fn sorted_audio_components(&self) -> &[AudioComponent] {
        &self.sorted_audio_components
    }

    pub fn num_video_items(&self) -> usize {
        self.sorted_video_components.len()
    }

    pub fn num_audio_items(&self) -> usize {
        self.sorted_audio_components.len()
    }

    // -----------------------------------------------------------------------
    // Labels
    // -----------------------------------------------------------------------

    pub fn external_audio_label(&self) -> String {
        let labels = &self.services.labels;
        self.discrete_audio.label(|c| {
            format!(
                "{} {} ({})",
                labels.component_name(c),
                labels.language(c.language.as_deref()),
                c.shape_tag
            )
        })
    }

    pub fn muxed_audio_label(&self) -> String {
        let labels = &self.services.labels;
        self.muxed_audio.label(|c| {
            format!(
                "{} {}",
                labels.component_name(c),
                labels.language(c.language.as_deref())
            )
        })
    }

    // -----------------------------------------------------------------------
    // Submit
    // -----------------------------------------------------------------------

    pub fn submit(&mut self) -> Result<SubmitOutcome> {
        if !self.markers.is_empty() {
            return self.submit_markers();
        }

        let clip = match self.prepare() {
            Ok(clip) => clip,
            Err(e) if Self::is_range_error(&e) => return Ok(self.reject(&e)),
            Err(e) => return Err(e),
        };
        self.clip = clip;

        if self.editing {
            return self.update(self.clip.clone()).map(SubmitOutcome::Updated);
        }

        let stored = self.services.storage.add(self.clip.clone())?;
        self.services.notifier.success("Subclip created");
        self.emit(FormEvent::SubclipSaved(Vec::new()));
        Ok(SubmitOutcome::Created(vec![stored]))
    }

    /// On a storage failure the failing marker and the ones after it stay
    /// queued, and the clips stored so far are still announced.
    fn submit_markers(&mut self) -> Result<SubmitOutcome> {
        let mut pending = std::mem::take(&mut self.markers).into_iter();
        let mut created = Vec::with_capacity(pending.len());
        let mut failure = None;

        while let Some(marker) = pending.next() {
            self.start_input = self.services.frames.format_frame(marker.start);
            self.end_input = self.services.frames.format_frame(marker.end);
            self.clip.name = marker.name.clone();

            let stored = self
                .prepare()
                .and_then(|clip| self.services.storage.add(clip));
            self.clip = Subclip::default();
            match stored {
                Ok(clip) => created.push(clip),
                Err(e) if Self::is_range_error(&e) => {
                    self.reject(&e);
                }
                Err(e) => {
                    error!(marker = %marker.name, error = %e, "Batch stopped");
                    self.markers = std::iter::once(marker).chain(pending.by_ref()).collect();
                    failure = Some(e);
                    break;
                }
            }
        }

        if !created.is_empty() {
            // Plural as soon as markers were involved, even for a single one.
            self.services.notifier.success("Subclips created");
            let payload = if created.len() > 1 {
                created.clone()
            } else {
                Vec::new()
            };
            self.emit(FormEvent::SubclipSaved(payload));
        }

        match failure {
            Some(e) => Err(e),
            None if created.is_empty() => Ok(SubmitOutcome::Rejected),
            None => Ok(SubmitOutcome::Created(created)),
        }
    }

    fn is_range_error(e: &CoreError) -> bool {
        matches!(
            e,
            CoreError::InvalidRange { .. } | CoreError::RangeTooLong { .. }
        )
    }

    fn reject(&self, e: &CoreError) -> SubmitOutcome {
        let message = match e {
            CoreError::RangeTooLong { .. } => "Subclip is too long",
            _ => "Invalid end frame",
        };
        self.services.notifier.error(message);
        SubmitOutcome::Rejected
    }

    /// Build the clip to save from the working clip and the form state.
    /// Leaves the form untouched.
    fn prepare(&self) -> Result<Subclip> {
        let frames = &self.services.frames;
        let start = frames.start_frame(&self.start_input);
        let end = frames.end_frame(&self.end_input, start);

        if end < start {
            return Err(CoreError::InvalidRange { start, end });
        }
        let video = self
            .selected_video
            .as_ref()
            .ok_or(CoreError::NoVideoSelected)?;

        let mut clip = self.clip.clone();
        clip.start = Some(start);
        clip.end = Some(end);
        let duration =
            Frame::count_inclusive(start, end).ok_or(CoreError::RangeTooLong { start, end })?;
        clip.duration = Some(duration);

        let discrete: Vec<AudioComponent> = self.discrete_audio.selected().cloned().collect();
        clip.discrete_audio = (self.discrete_subclips_enabled && !discrete.is_empty())
            .then_some(discrete);

        clip.shape = Some(video.shape_tag.clone());
        clip.item_id = Some(video.item_id);
        clip.video_id = Some(video.id);

        let muxed: Vec<AudioTrackRef> = self
            .muxed_audio
            .selected()
            .map(|track| AudioTrackRef::new(track, &video.audio))
            .collect();
        clip.audio_tracks = (!muxed.is_empty()).then_some(muxed);

        debug!(name = %clip.name, %start, %end, "Saving clip");
        Ok(clip)
    }

    /// Persist a copy of the edited clip.
    fn update(&self, clip: Subclip) -> Result<Subclip> {
        self.services.storage.update(clip.clone())?;
        self.services.notifier.success("Subclip updated");
        self.emit(FormEvent::SubclipSaved(Vec::new()));
        Ok(clip)
    }

    // -----------------------------------------------------------------------
    // Delete / lifecycle
    // -----------------------------------------------------------------------

    /// Delete the working clip after the user confirms.
    pub async fn on_delete(&mut self) -> Result<DeleteOutcome> {
        let Some(id) = self.clip.id else {
            error!("No id of subclip set - cannot delete");
            return Ok(DeleteOutcome::MissingId);
        };

        let message = format!(
            "Subclip '{}' will be deleted. This action cannot be undone.",
            self.clip.name
        );
        let confirmed = self
            .services
            .dialog
            .show_delete_dialog("Delete subclip", &message);
        if confirmed.await.is_err() {
            debug!(subclip = %id, "Delete dismissed");
            return Ok(DeleteOutcome::Cancelled);
        }

        self.services.storage.remove(id)?;
        self.services.notifier.success("Subclip deleted");
        self.cancel();
        self.emit(FormEvent::SubclipSaved(Vec::new()));
        Ok(DeleteOutcome::Deleted)
    }

    /// Close the form and hand the panel back to the player settings.
    pub fn cancel(&mut self) {
        self.reset_clip_form();
        self.focus = false;
        self.emit(FormEvent::ShowSettings);
    }

    /// Clear the bound fields and the player's in/out marks.
    pub fn reset_clip_form(&mut self) {
        self.start_input.clear();
        self.end_input.clear();
        self.clip.name.clear();
        self.services.playback.clear_points();
    }

    fn emit(&self, event: FormEvent) {
        if self.events.send(event).is_err() {
            debug!("No listener for form events");
        }
    }
}
