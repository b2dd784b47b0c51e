use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util::format_mm;

pub const DOTS_PER_INCH: f64 = 203.0;
pub const MM_PER_INCH: f64 = 25.4;

pub const DEFAULT_WIDTH_MM: f64 = 76.0;
pub const DEFAULT_HEIGHT_MM: f64 = 51.0;

/// Longest side accepted for a label. Well past any roll a desktop thermal printer takes, and
/// far below the printer's coordinate limit.
pub const MAX_SIDE_MM: f64 = 1000.0;

/// Converts millimeters to print-head dots at 203 dpi, rounding to the nearest dot.
pub fn mm_to_dots(mm: f64) -> u32 {
    if !mm.is_finite() || mm <= 0.0 {
        return 0;
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let dots = (mm / MM_PER_INCH * DOTS_PER_INCH).round() as u32;
    dots
}

/// Physical label size as stored on disk, in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelSize {
    #[serde(rename = "ancho", default = "default_width")]
    pub width_mm: f64,
    #[serde(rename = "alto", default = "default_height")]
    pub height_mm: f64,
}

fn default_width() -> f64 {
    DEFAULT_WIDTH_MM
}

fn default_height() -> f64 {
    DEFAULT_HEIGHT_MM
}

impl Default for LabelSize {
    fn default() -> Self {
        Self {
            width_mm: DEFAULT_WIDTH_MM,
            height_mm: DEFAULT_HEIGHT_MM,
        }
    }
}

impl LabelSize {
    pub fn new(width_mm: f64, height_mm: f64) -> Self {
        Self { width_mm, height_mm }
    }

    /// Rejects sizes that would not produce at least one dot in each direction, or that exceed
    /// [`MAX_SIDE_MM`].
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("width", self.width_mm), ("height", self.height_mm)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidSize(format!("{name} must be a positive number, got {value}")));
            }
            if value > MAX_SIDE_MM {
                return Err(Error::InvalidSize(format!("{name} of {value} mm exceeds {MAX_SIDE_MM} mm")));
            }
            if mm_to_dots(value) == 0 {
                return Err(Error::InvalidSize(format!("{name} of {value} mm is smaller than one dot")));
            }
        }

        Ok(())
    }

    pub fn dimensions(&self) -> Result<LabelDimensions> {
        self.validate()?;

        Ok(LabelDimensions {
            width_dots: mm_to_dots(self.width_mm),
            height_dots: mm_to_dots(self.height_mm),
        })
    }
}

impl fmt::Display for LabelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {} mm", format_mm(self.width_mm), format_mm(self.height_mm))
    }
}

/// Label size in the printer's native coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelDimensions {
    pub width_dots: u32,
    pub height_dots: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_mm_is_zero_dots() {
        assert_eq!(mm_to_dots(0.0), 0);
    }

    #[test]
    fn conversion_is_monotonic() {
        let mut previous = 0;
        for tenth in 1..3000 {
            let dots = mm_to_dots(f64::from(tenth) / 10.0);
            assert!(dots >= previous, "{} mm went backwards", f64::from(tenth) / 10.0);
            previous = dots;
        }
    }

    #[test]
    fn one_inch_is_full_resolution() {
        assert_eq!(mm_to_dots(25.4), 203);
    }

    #[test]
    fn default_label_dimensions() {
        let dims = LabelSize::default().dimensions().unwrap();
        assert_eq!(dims, LabelDimensions { width_dots: 607, height_dots: 408 });
    }

    #[test]
    fn narrow_label_dimensions() {
        let dims = LabelSize::new(25.0, 76.0).dimensions().unwrap();
        assert_eq!(dims, LabelDimensions { width_dots: 200, height_dots: 607 });
    }

    #[test]
    fn rejects_non_positive_sizes() {
        assert!(matches!(LabelSize::new(0.0, 51.0).validate(), Err(Error::InvalidSize(_))));
        assert!(matches!(LabelSize::new(76.0, -3.0).validate(), Err(Error::InvalidSize(_))));
        assert!(matches!(LabelSize::new(f64::NAN, 51.0).validate(), Err(Error::InvalidSize(_))));
        assert!(matches!(LabelSize::new(0.05, 51.0).validate(), Err(Error::InvalidSize(_))));
    }

    #[test]
    fn rejects_oversized_labels() {
        assert!(matches!(LabelSize::new(4.0e8, 4.0e8).validate(), Err(Error::InvalidSize(_))));
        assert!(matches!(LabelSize::new(76.0, MAX_SIDE_MM + 0.5).dimensions(), Err(Error::InvalidSize(_))));
        assert!(LabelSize::new(MAX_SIDE_MM, MAX_SIDE_MM).validate().is_ok());
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let size: LabelSize = serde_json::from_str(r#"{"ancho": 100}"#).unwrap();
        assert_eq!(size, LabelSize::new(100.0, DEFAULT_HEIGHT_MM));
    }

    #[test]
    fn displays_in_millimeters() {
        assert_eq!(LabelSize::new(101.6, 50.8).to_string(), "101.6 x 50.8 mm");
        assert_eq!(LabelSize::default().to_string(), "76 x 51 mm");
    }
}
