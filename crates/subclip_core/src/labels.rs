use crate::services::LabelFormatter;
use crate::types::AudioComponent;

/// English display names for the language codes seen on audio components.
const LANGUAGES: &[(&str, &str)] = &[
    ("ar", "Arabic"),
    ("da", "Danish"),
    ("de", "German"),
    ("en", "English"),
    ("es", "Spanish"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("nl", "Dutch"),
    ("no", "Norwegian"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("sv", "Swedish"),
    ("und", "Undetermined"),
    ("zh", "Chinese"),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLabels;

impl LabelFormatter for DefaultLabels {
    fn component_name(&self, component: &AudioComponent) -> String {
        match component.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => "Track".to_string(),
        }
    }

    fn language(&self, code: Option<&str>) -> String {
        let Some(code) = code.map(str::trim).filter(|c| !c.is_empty()) else {
            return "Unknown".to_string();
        };
        let lower = code.to_ascii_lowercase();
        // Region subtags ("en-GB") share the base language's name.
        let base = lower.split(['-', '_']).next().unwrap_or(lower.as_str());
        LANGUAGES
            .iter()
            .find(|(c, _)| *c == base)
            .map(|(_, name)| name.to_string())
            .unwrap_or_else(|| code.to_ascii_uppercase())
    }
}
