pub mod fields;
pub mod plan;
pub mod units;
pub mod wrap;
pub mod zpl;

pub use fields::{generate_weight, LabelContent};
pub use plan::{LayoutPlan, LayoutTuning};
pub use units::LabelSize;
pub use zpl::{render, CommandStream};
