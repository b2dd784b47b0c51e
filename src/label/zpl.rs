//! ZPL II output for the fixed seven-field label.
//!
//! Normal labels print top to bottom starting at the top margin. Labels taller than they are
//! wide are printed with `^FWR`: every line sits at the same vertical position and the
//! horizontal position walks back from `rotated_start`, so the text reads in field order once
//! the label is turned.

use std::fmt;

use super::fields::LabelField;
use super::plan::LayoutPlan;
use super::wrap::field_lines;

pub const START_FORMAT: &str = "^XA";
pub const END_FORMAT: &str = "^XZ";
pub const UTF8_ENCODING: &str = "^CI28";
pub const ROTATE_90: &str = "^FWR";
pub const HEX_INDICATOR: char = '_';

/// A finished printer job. Sent as-is, never edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandStream(String);

impl CommandStream {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for CommandStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn needs_escape(text: &str) -> bool {
    text.contains(['^', '~'])
}

/// `^FH` field data with the command prefixes and the hex indicator itself encoded.
fn escape_field_data(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '^' | '~' | HEX_INDICATOR => escaped.push_str(&format!("{HEX_INDICATOR}{:02X}", ch as u32)),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn field_command(x: i64, y: i64, text: &str) -> String {
    if needs_escape(text) {
        format!("^FO{x},{y}^FH^FD{}^FS", escape_field_data(text))
    } else {
        format!("^FO{x},{y}^FD{text}^FS")
    }
}

pub fn render(fields: &[LabelField], plan: &LayoutPlan) -> CommandStream {
    let mut commands = vec![START_FORMAT.to_owned()];
    if plan.rotate {
        commands.push(ROTATE_90.to_owned());
    }
    commands.push(UTF8_ENCODING.to_owned());
    commands.push(format!("^CF0,{}", plan.font_size));

    let step = i64::from(plan.line_spacing);
    let lines = fields.iter().flat_map(|field| field_lines(field, plan.max_chars_per_line));

    if plan.rotate {
        let fixed_y = i64::from(plan.x_offset);
        let mut x = plan.rotated_start;
        for line in lines {
            commands.push(field_command(x, fixed_y, &line));
            x -= step;
        }
    } else {
        let x = i64::from(plan.x_offset);
        let mut y = i64::from(plan.y_offset);
        for line in lines {
            commands.push(field_command(x, y, &line));
            y += step;
        }
    }

    commands.push(END_FORMAT.to_owned());
    CommandStream(commands.join("\n"))
}
