use crate::error::{CoreError, Result};
use crate::frames::DEFAULT_FPS;
use crate::services::{FeatureToggle, Setting, SettingsLookup};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Feature toggles and settings read by the subclip form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FormSettings {
    /// Attach selected discrete audio to created subclips.
    pub discrete_subclips: bool,
    /// Shape used when exporting subclip audio. Discrete audio is only
    /// offered when this is set.
    pub subclip_audio_export_shape: Option<String>,
    pub fps: u32,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            discrete_subclips: false,
            subclip_audio_export_shape: None,
            fps: DEFAULT_FPS,
        }
    }
}

impl FormSettings {
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load settings from a JSON file. Missing keys take their defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref()).map_err(CoreError::Io)?;
        let settings: FormSettings = serde_json::from_str(&data)?;
        Ok(settings)
    }
}

impl SettingsLookup for FormSettings {
    fn feature_enabled(&self, toggle: FeatureToggle) -> bool {
        match toggle {
            FeatureToggle::DiscreteSubclips => self.discrete_subclips,
        }
    }

    fn setting(&self, setting: Setting) -> Option<String> {
        match setting {
            Setting::SubclipAudioExportShape => self.subclip_audio_export_shape.clone(),
        }
    }
}
