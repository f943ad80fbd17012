pub mod render;
pub mod theme;

pub use render::{color_enabled, Printer};
