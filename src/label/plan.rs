use super::fields::FIELD_COUNT;
use super::units::LabelDimensions;

/// Empirical ratios tuned for the printer's scalable font 0 at 203 dpi.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutTuning {
    /// Share of the short side used by the text block.
    pub content_ratio: f64,
    /// Font height as a fraction of the line spacing.
    pub font_ratio: f64,
    /// Average glyph width as a fraction of the font height.
    pub char_width_ratio: f64,
    /// Characters subtracted from the estimated line budget.
    pub char_safety_margin: i32,
    pub top_margin_ratio: f64,
    pub side_margin_ratio: f64,
    /// Pushes the first rotated line away from the label edge.
    pub rotated_edge_ratio: f64,
}

impl Default for LayoutTuning {
    fn default() -> Self {
        Self {
            content_ratio: 0.7,
            font_ratio: 0.80,
            char_width_ratio: 0.6,
            char_safety_margin: 4,
            top_margin_ratio: 0.07,
            side_margin_ratio: 0.03,
            rotated_edge_ratio: 0.15,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutPlan {
    pub rotate: bool,
    pub effective_width: u32,
    pub effective_height: u32,
    pub line_spacing: u32,
    pub font_size: u32,
    pub x_offset: u32,
    pub y_offset: u32,
    /// Zero or negative when the font is too large for even one character.
    pub max_chars_per_line: i32,
    /// First position along the long axis when printing rotated.
    pub rotated_start: i64,
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn floor_dots(value: f64) -> u32 {
    value.floor().max(0.0) as u32
}

impl LayoutPlan {
    pub fn compute(dims: LabelDimensions, tuning: &LayoutTuning) -> Self {
        let rotate = dims.width_dots < dims.height_dots;
        let (effective_width, effective_height) = if rotate {
            (dims.height_dots, dims.width_dots)
        } else {
            (dims.width_dots, dims.height_dots)
        };

        let num_lines = FIELD_COUNT as u32;
        let height = f64::from(effective_height);
        let width = f64::from(effective_width);

        let line_spacing = floor_dots(height * tuning.content_ratio / f64::from(num_lines));
        let font_size = floor_dots(f64::from(line_spacing) * tuning.font_ratio);
        let y_offset = floor_dots(height * tuning.top_margin_ratio);
        let x_offset = floor_dots(width * tuning.side_margin_ratio);

        let block_width = i64::from(effective_width) - 2 * i64::from(x_offset);
        let max_chars_per_line = if font_size == 0 {
            0
        } else {
            let estimate = (block_width as f64 / (f64::from(font_size) * tuning.char_width_ratio)).floor();
            #[allow(clippy::cast_possible_truncation)]
            let estimate = estimate as i32;
            estimate - tuning.char_safety_margin
        };

        let edge = floor_dots(height * tuning.rotated_edge_ratio);
        let rotated_start =
            i64::from(y_offset) + i64::from(num_lines - 1) * i64::from(line_spacing) + i64::from(edge);

        let plan = Self {
            rotate,
            effective_width,
            effective_height,
            line_spacing,
            font_size,
            x_offset,
            y_offset,
            max_chars_per_line,
            rotated_start,
        };
        log::debug!("layout for {}x{} dots: {:?}", dims.width_dots, dims.height_dots, plan);
        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(width_dots: u32, height_dots: u32) -> LayoutPlan {
        LayoutPlan::compute(LabelDimensions { width_dots, height_dots }, &LayoutTuning::default())
    }

    #[test]
    fn wide_label_is_not_rotated() {
        let p = plan(607, 408);
        assert!(!p.rotate);
        assert_eq!((p.effective_width, p.effective_height), (607, 408));
        assert_eq!(p.line_spacing, 40);
        assert_eq!(p.font_size, 32);
        assert_eq!(p.y_offset, 28);
        assert_eq!(p.x_offset, 18);
        assert_eq!(p.max_chars_per_line, 25);
    }

    #[test]
    fn square_label_is_not_rotated() {
        let p = plan(400, 400);
        assert!(!p.rotate);
    }

    #[test]
    fn tall_label_is_rotated_and_swapped() {
        let p = plan(200, 607);
        assert!(p.rotate);
        assert_eq!((p.effective_width, p.effective_height), (607, 200));
        assert_eq!(p.line_spacing, 20);
        assert_eq!(p.font_size, 16);
        assert_eq!(p.x_offset, 18);
    }

    #[test]
    fn rotated_start_clears_every_line() {
        let p = plan(200, 607);
        let last_line = p.rotated_start - 6 * i64::from(p.line_spacing);
        assert!(last_line >= i64::from(p.y_offset));
        assert!(p.rotated_start > i64::from(p.y_offset + 6 * p.line_spacing));
    }

    #[test]
    fn line_spacing_stays_within_content_area() {
        for height in 1..2000u32 {
            for width in [height, height + 1, height * 2] {
                let p = plan(width, height);
                let limit = 0.7 * f64::from(p.effective_height) + 7.0;
                assert!(f64::from(p.line_spacing * 7) <= limit, "{width}x{height}");
            }
        }
    }

    #[test]
    fn largest_dimensions_do_not_overflow() {
        let p = plan(u32::MAX, u32::MAX - 1);
        assert!(!p.rotate);
        assert!(p.rotated_start > i64::from(i32::MAX));
        assert!(p.max_chars_per_line > 0);
    }

    #[test]
    fn tiny_label_has_no_character_budget() {
        let p = plan(20, 8);
        assert_eq!(p.font_size, 0);
        assert_eq!(p.max_chars_per_line, 0);
    }

    #[test]
    fn tuning_is_applied() {
        let tuning = LayoutTuning {
            char_safety_margin: 0,
            ..LayoutTuning::default()
        };
        let loose = LayoutPlan::compute(LabelDimensions { width_dots: 607, height_dots: 408 }, &tuning);
        assert_eq!(loose.max_chars_per_line, plan(607, 408).max_chars_per_line + 4);
    }
}
