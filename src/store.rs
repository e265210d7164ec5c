use crate::api::types::{Label, LabelsMap, NotesMap};
use crate::error::{PlannerError, Result};

/// Client-side copy of every note, replaced wholesale on each load.
#[derive(Debug, Clone, Default)]
pub struct NotesStore {
    notes: NotesMap,
}

impl NotesStore {
    pub fn replace(&mut self, notes: NotesMap) {
        self.notes = notes;
    }

    pub fn clear(&mut self) {
        self.notes.clear();
    }

    pub fn notes_for(&self, date: &str) -> &[String] {
        self.notes.get(date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn as_map(&self) -> &NotesMap {
        &self.notes
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Copy of the list for `date` with `index` replaced. The store itself
    /// is left untouched.
    pub fn replaced_contents(&self, date: &str, index: usize, content: &str) -> Option<Vec<String>> {
        let mut contents = self.notes.get(date)?.clone();
        let slot = contents.get_mut(index)?;
        *slot = content.to_string();
        Some(contents)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LabelStore {
    labels: LabelsMap,
}

impl LabelStore {
    pub fn replace(&mut self, labels: LabelsMap) {
        self.labels = labels;
    }

    pub fn clear(&mut self) {
        self.labels.clear();
    }

    pub fn get(&self, date: &str) -> Option<&Label> {
        self.labels.get(date)
    }

    pub fn as_map(&self) -> &LabelsMap {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels ordered by date key.
    pub fn sorted(&self) -> Vec<(&str, &Label)> {
        let mut entries: Vec<(&str, &Label)> =
            self.labels.iter().map(|(k, v)| (k.as_str(), v)).collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

/// Trimmed note text, or the alert to show for blank input.
pub fn validate_note_content(content: &str) -> Result<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(PlannerError::Validation("Please enter note content".into()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> NotesStore {
        let mut store = NotesStore::default();
        let mut map = NotesMap::new();
        map.insert("2024-01-15".into(), vec!["a".into(), "b".into(), "c".into()]);
        store.replace(map);
        store
    }

    #[test]
    fn notes_for_missing_date_is_empty() {
        assert!(store().notes_for("2024-02-01").is_empty());
    }

    #[test]
    fn replaced_contents_does_not_mutate_store() {
        let store = store();
        let copy = store.replaced_contents("2024-01-15", 1, "B").unwrap();
        assert_eq!(copy, vec!["a", "B", "c"]);
        assert_eq!(store.notes_for("2024-01-15"), ["a", "b", "c"]);
    }

    #[test]
    fn replaced_contents_out_of_range() {
        assert_eq!(store().replaced_contents("2024-01-15", 3, "x"), None);
        assert_eq!(store().replaced_contents("2024-01-16", 0, "x"), None);
    }

    #[test]
    fn replace_is_wholesale() {
        let mut store = store();
        let mut map = NotesMap::new();
        map.insert("2024-03-01".into(), vec!["x".into()]);
        store.replace(map);
        assert!(store.notes_for("2024-01-15").is_empty());
        assert_eq!(store.notes_for("2024-03-01"), ["x"]);
    }

    #[test]
    fn validate_trims_and_rejects_blank() {
        assert_eq!(validate_note_content("  Gym \n").unwrap(), "Gym");
        let err = validate_note_content("   ").unwrap_err();
        assert_eq!(err.to_string(), "Please enter note content");
    }

    #[test]
    fn labels_sorted_by_date() {
        let mut labels = LabelStore::default();
        let mut map = LabelsMap::new();
        for (date, text) in [("2024-02-01", "B"), ("2024-01-01", "A"), ("2024-03-01", "C")] {
            map.insert(
                date.into(),
                Label {
                    label: text.into(),
                    color: "#fff".into(),
                },
            );
        }
        labels.replace(map);
        let order: Vec<&str> = labels.sorted().iter().map(|(d, _)| *d).collect();
        assert_eq!(order, vec!["2024-01-01", "2024-02-01", "2024-03-01"]);
    }
}
