//! Colleague editor: form-driven create/edit of colleague records.
//!
//! The editor holds either a working copy of an existing record or a
//! new-record draft, mutates the working copy's ordered description list by
//! index, and on save yields a typed payload for the store. It performs no
//! I/O itself; routing the payload is the composition layer's job.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::core::{Colleague, ColleagueId};

/// Save payload produced by the editor.
///
/// `id` is `Some` for an update of an existing record, `None` for a create.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColleagueSave {
    pub id: Option<ColleagueId>,
    pub name: String,
    pub photo: String,
    pub descriptions: Vec<String>,
}

impl From<&Colleague> for ColleagueSave {
    fn from(colleague: &Colleague) -> Self {
        Self {
            id: Some(colleague.id),
            name: colleague.name.clone(),
            photo: colleague.photo.clone(),
            descriptions: colleague.descriptions.clone(),
        }
    }
}

/// Working state for the colleague form.
pub struct ColleagueEditor {
    colleagues: Vec<Colleague>,
    editing: Option<ColleagueSave>,
    draft: ColleagueSave,
}

impl ColleagueEditor {
    #[must_use]
    pub fn new(colleagues: Vec<Colleague>) -> Self {
        Self {
            colleagues,
            editing: None,
            draft: Self::empty_draft(),
        }
    }

    fn empty_draft() -> ColleagueSave {
        ColleagueSave {
            id: None,
            name: String::new(),
            photo: String::new(),
            // A fresh form starts with one empty description row.
            descriptions: vec![String::new()],
        }
    }

    /// Records available for editing.
    #[must_use]
    pub fn colleagues(&self) -> &[Colleague] {
        &self.colleagues
    }

    /// Is an existing record being edited, as opposed to drafting a new one?
    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// The record the form mutators currently apply to.
    #[must_use]
    pub fn working(&self) -> &ColleagueSave {
        self.editing.as_ref().unwrap_or(&self.draft)
    }

    fn working_mut(&mut self) -> &mut ColleagueSave {
        self.editing.as_mut().unwrap_or(&mut self.draft)
    }

    /// Load a working copy of an existing record.
    pub fn edit(&mut self, colleague: &Colleague) {
        self.editing = Some(ColleagueSave::from(colleague));
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.working_mut().name = name.into();
    }

    pub fn set_photo(&mut self, photo: impl Into<String>) {
        self.working_mut().photo = photo.into();
    }

    /// Append an empty description row.
    pub fn add_description(&mut self) {
        self.working_mut().descriptions.push(String::new());
    }

    /// Remove the description at `index`, shifting later rows left.
    /// Out-of-range indices are ignored.
    pub fn remove_description(&mut self, index: usize) {
        let working = self.working_mut();
        if index < working.descriptions.len() {
            working.descriptions.remove(index);
        }
    }

    /// Replace the description at `index`. Out-of-range writes are ignored.
    pub fn set_description(&mut self, index: usize, value: impl Into<String>) {
        if let Some(slot) = self.working_mut().descriptions.get_mut(index) {
            *slot = value.into();
        }
    }

    /// Store an uploaded photo on the working copy as an embeddable
    /// `data:` URI, sniffing the MIME type from the file extension.
    pub fn attach_photo(&mut self, filename: &str, bytes: &[u8]) {
        self.working_mut().photo = photo_data_uri(filename, bytes);
    }

    /// Finish the form, yielding the save payload and clearing form state.
    ///
    /// Yields the edited copy when editing, the new-record draft otherwise.
    #[must_use]
    pub fn save(&mut self) -> ColleagueSave {
        let edited = self.editing.take();
        let draft = std::mem::replace(&mut self.draft, Self::empty_draft());
        edited.unwrap_or(draft)
    }
}

fn photo_data_uri(filename: &str, bytes: &[u8]) -> String {
    let extension = filename.rsplit('.').next().map(str::to_ascii_lowercase);
    let mime = match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    };
    format!("data:{mime};base64,{}", BASE64.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colleague() -> Colleague {
        Colleague {
            id: ColleagueId::new(1),
            name: "Alex".to_string(),
            photo: String::new(),
            descriptions: vec!["first".to_string(), "second".to_string()],
        }
    }

    #[test]
    fn test_draft_starts_with_one_empty_row() {
        let editor = ColleagueEditor::new(vec![]);

        assert!(!editor.is_editing());
        assert_eq!(editor.working().descriptions, vec![String::new()]);
    }

    #[test]
    fn test_edit_loads_a_working_copy() {
        let original = colleague();
        let mut editor = ColleagueEditor::new(vec![original.clone()]);

        editor.edit(&original);
        editor.set_description(0, "changed");

        // The working copy changed; the listed record did not.
        assert_eq!(editor.working().descriptions[0], "changed");
        assert_eq!(editor.colleagues()[0].descriptions[0], "first");
    }

    #[test]
    fn test_save_while_editing_yields_update_payload() {
        let original = colleague();
        let mut editor = ColleagueEditor::new(vec![original.clone()]);

        editor.edit(&original);
        editor.set_name("Alexandra");
        let save = editor.save();

        assert_eq!(save.id, Some(ColleagueId::new(1)));
        assert_eq!(save.name, "Alexandra");
        assert!(!editor.is_editing());
    }

    #[test]
    fn test_save_without_editing_yields_create_payload() {
        let mut editor = ColleagueEditor::new(vec![]);

        editor.set_name("Robin");
        editor.set_description(0, "new hire");
        let save = editor.save();

        assert_eq!(save.id, None);
        assert_eq!(save.name, "Robin");
        assert_eq!(save.descriptions, vec!["new hire"]);

        // Saving resets the draft for the next record.
        assert!(editor.working().name.is_empty());
        assert_eq!(editor.working().descriptions, vec![String::new()]);
    }

    #[test]
    fn test_remove_description_shifts_left() {
        let original = colleague();
        let mut editor = ColleagueEditor::new(vec![original.clone()]);
        editor.edit(&original);

        editor.remove_description(0);

        assert_eq!(editor.working().descriptions, vec!["second"]);
    }

    #[test]
    fn test_remove_all_descriptions_leaves_empty_list() {
        let original = colleague();
        let mut editor = ColleagueEditor::new(vec![original.clone()]);
        editor.edit(&original);

        editor.remove_description(1);
        editor.remove_description(0);

        assert!(editor.working().descriptions.is_empty());
        assert!(editor.save().descriptions.is_empty());
    }

    #[test]
    fn test_out_of_range_mutations_are_ignored() {
        let mut editor = ColleagueEditor::new(vec![]);

        editor.remove_description(5);
        editor.set_description(5, "nowhere");

        assert_eq!(editor.working().descriptions, vec![String::new()]);
    }

    #[test]
    fn test_attach_photo_builds_data_uri() {
        let mut editor = ColleagueEditor::new(vec![]);

        editor.attach_photo("portrait.PNG", &[1, 2, 3]);

        let photo = &editor.working().photo;
        assert!(photo.starts_with("data:image/png;base64,"));

        editor.attach_photo("unknown", &[1]);
        assert!(editor
            .working()
            .photo
            .starts_with("data:application/octet-stream;base64,"));
    }
}
