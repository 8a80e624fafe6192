use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use uuid::Uuid;

/// Shape tag carried by the untouched source rendition of an item.
pub const ORIGINAL_SHAPE_TAG: &str = "original";

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

/// Zero-based frame index.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(transparent)]
pub struct Frame(pub i64);

impl Frame {
    pub const ZERO: Self = Self(0);

    /// Number of frames in the inclusive range `start..=end`, `None` when
    /// it does not fit an `i64`.
    pub fn count_inclusive(start: Frame, end: Frame) -> Option<i64> {
        end.0.checked_sub(start.0)?.checked_add(1)
    }
}

impl Add<i64> for Frame {
    type Output = Self;
    fn add(self, rhs: i64) -> Self {
        Self(self.0 + rhs)
    }
}

impl Sub for Frame {
    type Output = i64;
    fn sub(self, rhs: Self) -> i64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

uuid_id!(
    /// Identifier of a persisted subclip.
    SubclipId
);
uuid_id!(
    /// Identifier of a video or audio component in the inventory.
    ComponentId
);
uuid_id!(
    /// Identifier of the item (asset) a component belongs to.
    ItemId
);

// ---------------------------------------------------------------------------
// Components
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AudioComponent {
    pub id: ComponentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub shape_tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VideoComponent {
    pub id: ComponentId,
    pub item_id: ItemId,
    pub shape_tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Audio tracks muxed into this video's container.
    #[serde(default)]
    pub audio: Vec<AudioComponent>,
}

impl VideoComponent {
    pub fn is_original_shape(&self) -> bool {
        self.shape_tag == ORIGINAL_SHAPE_TAG
    }
}

// ---------------------------------------------------------------------------
// AudioTrackRef
// ---------------------------------------------------------------------------

/// A muxed audio track attached to a subclip, with its position inside the
/// video container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AudioTrackRef {
    pub audio_track: AudioComponent,
    pub track_index: usize,
}

impl AudioTrackRef {
    /// Builds the descriptor for `track`, indexed against the video's tracks.
    /// Tracks not found in `tracks` keep index 0.
    pub fn new(track: &AudioComponent, tracks: &[AudioComponent]) -> Self {
        let track_index = tracks
            .iter()
            .position(|t| t.id == track.id)
            .unwrap_or_default();
        Self {
            audio_track: track.clone(),
            track_index,
        }
    }
}

// ---------------------------------------------------------------------------
// Subclip
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Subclip {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SubclipId>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Frame>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<Frame>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<ItemId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<ComponentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discrete_audio: Option<Vec<AudioComponent>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_tracks: Option<Vec<AudioTrackRef>>,
}

impl Subclip {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// In and out frame, if both are set.
    pub fn bounds(&self) -> Option<(Frame, Frame)> {
        Some((self.start?, self.end?))
    }

    pub fn has_discrete_audio(&self, id: ComponentId) -> bool {
        self.discrete_audio
            .as_ref()
            .is_some_and(|audio| audio.iter().any(|c| c.id == id))
    }

    pub fn has_muxed_audio(&self, id: ComponentId) -> bool {
        self.audio_tracks
            .as_ref()
            .is_some_and(|tracks| tracks.iter().any(|t| t.audio_track.id == id))
    }
}

// ---------------------------------------------------------------------------
// SubclipMarker
// ---------------------------------------------------------------------------

/// An in/out pair used to batch-create subclips.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubclipMarker {
    pub start: Frame,
    pub end: Frame,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
