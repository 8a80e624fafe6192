use crate::error::{CoreError, Result};
use crate::types::*;

pub const NO_TRACKS_LABEL: &str = "No audio tracks selected";

/// Above this many selected tracks the label only shows the count.
const MAX_LISTED_TRACKS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct AudioSelection {
    pub component: AudioComponent,
    pub selected: bool,
}

/// Audio components with their selection state, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionMap {
    entries: Vec<AudioSelection>,
}

impl SelectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discrete (external) audio. Entries start selected when the persisted
    /// clip carries them; for a new clip nothing is selected.
    pub fn discrete(components: &[AudioComponent], clip: Option<&Subclip>) -> Self {
        Self::build(components, |c| {
            clip.is_some_and(|clip| clip.has_discrete_audio(c.id))
        })
    }

    /// Muxed audio of the selected video. For a new clip every track is on.
    pub fn muxed(tracks: &[AudioComponent], clip: Option<&Subclip>) -> Self {
        Self::build(tracks, |c| match clip {
            Some(clip) => clip.has_muxed_audio(c.id),
            None => true,
        })
    }

    fn build(components: &[AudioComponent], selected: impl Fn(&AudioComponent) -> bool) -> Self {
        let mut map = Self::new();
        for component in components {
            map.insert(component.clone(), selected(component));
        }
        map
    }

    /// Insert or replace an entry. Replacing keeps the original position.
    pub fn insert(&mut self, component: AudioComponent, selected: bool) {
        match self.entries.iter_mut().find(|e| e.component.id == component.id) {
            Some(entry) => {
                entry.component = component;
                entry.selected = selected;
            }
            None => self.entries.push(AudioSelection {
                component,
                selected,
            }),
        }
    }

    pub fn get(&self, id: ComponentId) -> Option<&AudioSelection> {
        self.entries.iter().find(|e| e.component.id == id)
    }

    /// Flip the selection of `id`. Returns the new state.
    pub fn toggle(&mut self, id: ComponentId) -> Result<bool> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.component.id == id)
            .ok_or(CoreError::AudioNotFound(id))?;
        entry.selected = !entry.selected;
        Ok(entry.selected)
    }

    pub fn is_selected(&self, id: ComponentId) -> bool {
        self.get(id).is_some_and(|e| e.selected)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AudioSelection> {
        self.entries.iter()
    }

    pub fn selected(&self) -> impl Iterator<Item = &AudioComponent> {
        self.entries
            .iter()
            .filter(|e| e.selected)
            .map(|e| &e.component)
    }

    pub fn selected_count(&self) -> usize {
        self.selected().count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Summary of the selected entries for the form's dropdown button.
    pub fn label(&self, describe: impl Fn(&AudioComponent) -> String) -> String {
        let selected: Vec<&AudioComponent> = self.selected().collect();
        match selected.len() {
            0 => NO_TRACKS_LABEL.to_string(),
            n if n > MAX_LISTED_TRACKS => format!("{} selected", n),
            _ => selected
                .into_iter()
                .map(describe)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(name: &str) -> AudioComponent {
        AudioComponent {
            id: ComponentId::new(),
            name: Some(name.to_string()),
            shape_tag: "audio".to_string(),
            language: None,
        }
    }

    fn tracks(n: usize) -> Vec<AudioComponent> {
        (0..n).map(|i| track(&format!("T{}", i))).collect()
    }

    fn name_of(c: &AudioComponent) -> String {
        c.name.clone().unwrap_or_default()
    }

    #[test]
    fn discrete_new_clip_selects_nothing() {
        let map = SelectionMap::discrete(&tracks(3), None);
        assert_eq!(map.len(), 3);
        assert_eq!(map.selected_count(), 0);
    }

    #[test]
    fn muxed_new_clip_selects_everything() {
        let map = SelectionMap::muxed(&tracks(3), None);
        assert_eq!(map.selected_count(), 3);
    }

    #[test]
    fn persisted_clip_drives_selection() {
        let all = tracks(3);
        let clip = Subclip {
            discrete_audio: Some(vec![all[1].clone()]),
            audio_tracks: Some(vec![AudioTrackRef::new(&all[2], &all)]),
            ..Subclip::default()
        };

        let discrete = SelectionMap::discrete(&all, Some(&clip));
        assert!(!discrete.is_selected(all[0].id));
        assert!(discrete.is_selected(all[1].id));
        assert!(!discrete.is_selected(all[2].id));

        let muxed = SelectionMap::muxed(&all, Some(&clip));
        assert!(!muxed.is_selected(all[0].id));
        assert!(muxed.is_selected(all[2].id));
    }

    #[test]
    fn persisted_clip_without_tracks_selects_no_muxed_audio() {
        let all = tracks(2);
        let clip = Subclip::named("old");
        assert_eq!(SelectionMap::muxed(&all, Some(&clip)).selected_count(), 0);
    }

    #[test]
    fn toggle_flips_and_reports_unknown_ids() {
        let all = tracks(2);
        let mut map = SelectionMap::discrete(&all, None);
        assert!(map.toggle(all[0].id).unwrap());
        assert!(map.is_selected(all[0].id));
        assert!(!map.toggle(all[0].id).unwrap());

        let missing = ComponentId::new();
        assert!(matches!(
            map.toggle(missing),
            Err(CoreError::AudioNotFound(id)) if id == missing
        ));
    }

    #[test]
    fn insert_replaces_in_place() {
        let all = tracks(3);
        let mut map = SelectionMap::muxed(&all, None);
        let mut renamed = all[0].clone();
        renamed.name = Some("Renamed".to_string());
        map.insert(renamed, false);

        assert_eq!(map.len(), 3);
        let first = map.iter().next().unwrap();
        assert_eq!(first.component.name.as_deref(), Some("Renamed"));
        assert!(!first.selected);
    }

    #[test]
    fn label_with_nothing_selected() {
        let map = SelectionMap::discrete(&tracks(2), None);
        assert_eq!(map.label(name_of), NO_TRACKS_LABEL);
        assert_eq!(SelectionMap::new().label(name_of), NO_TRACKS_LABEL);
    }

    #[test]
    fn label_lists_up_to_three_in_order() {
        let all = tracks(5);
        let mut map = SelectionMap::discrete(&all, None);
        map.toggle(all[3].id).unwrap();
        map.toggle(all[1].id).unwrap();
        assert_eq!(map.label(name_of), "T1, T3");

        map.toggle(all[4].id).unwrap();
        assert_eq!(map.label(name_of), "T1, T3, T4");
    }

    #[test]
    fn label_counts_above_three() {
        let map = SelectionMap::muxed(&tracks(4), None);
        assert_eq!(map.label(name_of), "4 selected");
        let map = SelectionMap::muxed(&tracks(7), None);
        assert_eq!(map.label(name_of), "7 selected");
    }
}
