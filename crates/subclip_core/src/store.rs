use crate::error::{CoreError, Result};
use crate::services::{ComponentInventory, SubclipStorage};
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::path::Path;

/// Everything known about one item: its components and its subclips.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Library {
    #[serde(default)]
    pub video_components: Vec<VideoComponent>,
    #[serde(default)]
    pub audio_components: Vec<AudioComponent>,
    /// Video shown in the player, used when no original shape exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_video: Option<ComponentId>,
    #[serde(default)]
    pub subclips: Vec<Subclip>,
}

impl Library {
    /// Save as pretty-printed JSON.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref()).map_err(CoreError::Io)?;
        let library: Library = serde_json::from_str(&data)?;
        Ok(library)
    }
}

/// In-memory [`SubclipStorage`] and [`ComponentInventory`] over a [`Library`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    library: RefCell<Library>,
}

impl MemoryStore {
    pub fn new(library: Library) -> Self {
        Self {
            library: RefCell::new(library),
        }
    }

    pub fn snapshot(&self) -> Library {
        self.library.borrow().clone()
    }

    pub fn subclips(&self) -> Vec<Subclip> {
        self.library.borrow().subclips.clone()
    }

    pub fn subclip(&self, id: SubclipId) -> Option<Subclip> {
        self.library
            .borrow()
            .subclips
            .iter()
            .find(|c| c.id == Some(id))
            .cloned()
    }

    pub fn set_current_video(&self, id: Option<ComponentId>) {
        self.library.borrow_mut().current_video = id;
    }

    fn position(library: &Library, id: SubclipId) -> Result<usize> {
        library
            .subclips
            .iter()
            .position(|c| c.id == Some(id))
            .ok_or(CoreError::SubclipNotFound(id))
    }
}

impl SubclipStorage for MemoryStore {
    fn add(&self, mut clip: Subclip) -> Result<Subclip> {
        let id = *clip.id.get_or_insert_with(SubclipId::new);
        let mut library = self.library.borrow_mut();
        if library.subclips.iter().any(|c| c.id == Some(id)) {
            return Err(CoreError::Other(format!("Subclip already exists: {}", id)));
        }
        library.subclips.push(clip.clone());
        Ok(clip)
    }

    fn update(&self, clip: Subclip) -> Result<()> {
        let id = clip
            .id
            .ok_or_else(|| CoreError::Other("cannot update a subclip without id".into()))?;
        let mut library = self.library.borrow_mut();
        let pos = Self::position(&library, id)?;
        library.subclips[pos] = clip;
        Ok(())
    }

    fn remove(&self, id: SubclipId) -> Result<()> {
        let mut library = self.library.borrow_mut();
        let pos = Self::position(&library, id)?;
        library.subclips.remove(pos);
        Ok(())
    }
}

impl ComponentInventory for MemoryStore {
    fn video_components(&self) -> Vec<VideoComponent> {
        self.library.borrow().video_components.clone()
    }

    fn current_video_component(&self) -> Option<VideoComponent> {
        let library = self.library.borrow();
        let current = library.current_video?;
        library
            .video_components
            .iter()
            .find(|v| v.id == current)
            .cloned()
    }

    fn audio_components(&self) -> Vec<AudioComponent> {
        self.library.borrow().audio_components.clone()
    }
}
