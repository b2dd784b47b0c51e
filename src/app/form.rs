use crate::job::LabelRequest;

/// Contents of the main print form.
#[derive(Debug, Default)]
pub struct LabelForm {
    pub selected_material: usize,
    pub operator: String,
    pub origin: String,
    pub destination: String,
}

impl LabelForm {
    pub fn selected<'a>(&self, materials: &'a [String]) -> Option<&'a str> {
        materials.get(self.selected_material).map(String::as_str)
    }

    pub fn request(&self, materials: &[String]) -> LabelRequest {
        LabelRequest {
            description: self.selected(materials).unwrap_or_default().to_owned(),
            operator: self.operator.trim().to_owned(),
            origin: self.origin.trim().to_owned(),
            destination: self.destination.trim().to_owned(),
        }
    }

    /// Back to the first material with empty text fields.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Keeps `previous` selected after the material list changed, else falls back to the first.
    pub fn reselect(&mut self, previous: Option<&str>, materials: &[String]) {
        self.selected_material = previous
            .and_then(|name| materials.iter().position(|m| m == name))
            .unwrap_or(0);
    }
}
