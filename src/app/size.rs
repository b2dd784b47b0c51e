use crate::commonvals::{SizeChoice, LABEL_PRESETS};
use crate::error::{Error, Result};
use crate::label::LabelSize;
use crate::util::{format_mm, parse_mm};

/// State of the label size window.
#[derive(Debug)]
pub struct SizeEditor {
    pub choice: SizeChoice,
    pub custom_width: String,
    pub custom_height: String,
}

impl SizeEditor {
    pub fn for_size(size: LabelSize) -> Self {
        Self {
            choice: SizeChoice::for_size(size),
            custom_width: format_mm(size.width_mm),
            custom_height: format_mm(size.height_mm),
        }
    }

    pub fn selected_size(&self) -> Result<LabelSize> {
        let size = match self.choice {
            SizeChoice::Preset(i) => LABEL_PRESETS
                .get(i)
                .map(|preset| preset.size())
                .ok_or_else(|| Error::InvalidSize(format!("no preset #{i}")))?,
            SizeChoice::Custom => {
                let width = parse_mm(&self.custom_width);
                let height = parse_mm(&self.custom_height);
                match (width, height) {
                    (Some(width), Some(height)) => LabelSize::new(width, height),
                    _ => return Err(Error::InvalidSize("enter numeric values for width and height".to_owned())),
                }
            }
        };

        size.validate()?;
        Ok(size)
    }
}
