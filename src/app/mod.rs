pub mod form;
pub mod materials;
pub mod size;
