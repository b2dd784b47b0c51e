use crate::label::LabelSize;

/// Stock thermal label size offered in the settings window.
pub struct LabelPreset {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl LabelPreset {
    const fn new(width_mm: f64, height_mm: f64) -> Self {
        Self { width_mm, height_mm }
    }

    pub fn size(&self) -> LabelSize {
        LabelSize::new(self.width_mm, self.height_mm)
    }
}

// Smallest to largest, width x height.
pub const LABEL_PRESETS: [LabelPreset; 33] = [
    LabelPreset::new(25.0, 76.0),
    LabelPreset::new(31.0, 22.0),
    LabelPreset::new(32.0, 25.0),
    LabelPreset::new(38.0, 25.0),
    LabelPreset::new(39.0, 25.0),
    LabelPreset::new(51.0, 25.0),
    LabelPreset::new(51.0, 32.0),
    LabelPreset::new(57.0, 19.0),
    LabelPreset::new(57.0, 32.0),
    LabelPreset::new(57.0, 51.0),
    LabelPreset::new(58.0, 40.0),
    LabelPreset::new(70.0, 30.0),
    LabelPreset::new(70.0, 32.0),
    LabelPreset::new(70.0, 38.0),
    LabelPreset::new(76.0, 25.0),
    LabelPreset::new(76.0, 51.0),
    LabelPreset::new(76.0, 76.0),
    LabelPreset::new(76.0, 102.0),
    LabelPreset::new(100.0, 50.0),
    LabelPreset::new(101.6, 50.8),
    LabelPreset::new(102.0, 25.0),
    LabelPreset::new(102.0, 38.0),
    LabelPreset::new(102.0, 51.0),
    LabelPreset::new(102.0, 64.0),
    LabelPreset::new(102.0, 102.0),
    LabelPreset::new(102.0, 127.0),
    LabelPreset::new(102.0, 150.0),
    LabelPreset::new(102.0, 152.0),
    LabelPreset::new(102.0, 165.0),
    LabelPreset::new(102.0, 210.0),
    LabelPreset::new(105.0, 148.0),
    LabelPreset::new(148.0, 210.0),
    LabelPreset::new(152.0, 216.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeChoice {
    Preset(usize),
    Custom,
}

impl SizeChoice {
    pub fn all() -> impl Iterator<Item = SizeChoice> {
        (0..LABEL_PRESETS.len()).map(Self::Preset).chain(std::iter::once(Self::Custom))
    }

    pub fn as_string(&self) -> String {
        match self {
            Self::Preset(i) => LABEL_PRESETS
                .get(*i)
                .map_or_else(|| String::from("(None)"), |preset| preset.size().to_string()),
            Self::Custom => String::from("Custom"),
        }
    }

    /// The preset matching `size`, or `Custom` when it is not a stock size.
    pub fn for_size(size: LabelSize) -> Self {
        LABEL_PRESETS
            .iter()
            .position(|preset| preset.size() == size)
            .map_or(Self::Custom, Self::Preset)
    }
}
