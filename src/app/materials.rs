use crate::error::Result;
use crate::store::materials::normalize;

/// One row of the materials window: the stored name plus whatever the user is typing over it.
#[derive(Debug)]
pub struct EditingMaterial {
    pub editing_value: String,
    pub is_edited: bool,
    original_value: String,
}

impl EditingMaterial {
    pub fn new(original_value: &str) -> Self {
        Self {
            editing_value: original_value.to_owned(),
            is_edited: false,
            original_value: original_value.to_owned(),
        }
    }

    pub fn original(&self) -> &str {
        &self.original_value
    }

    pub fn has_changes(&self) -> bool {
        self.editing_value.trim() != self.original_value
    }

    /// The name the row would be renamed to. Checked before the user is asked to confirm.
    pub fn new_name(&self) -> Result<String> {
        normalize(&self.editing_value)
    }

    pub fn reset_editor_value(&mut self) {
        self.editing_value = self.original_value.clone();
        self.is_edited = false;
    }
}

pub fn editing_rows(materials: &[String]) -> Vec<EditingMaterial> {
    materials.iter().map(|m| EditingMaterial::new(m)).collect()
}
