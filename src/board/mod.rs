//! The board pipeline: discover clips, color them, render the page

pub mod clip;
pub mod color;
pub mod pipeline;
pub mod render;
pub mod scan;
pub mod title;

pub use clip::Clip;
pub use color::{assigner_for, ColorAssigner, RandomDark, SeededDark};
pub use pipeline::Soundboard;
pub use render::{PageRenderer, TemplateSource};
pub use scan::{discover_clips, is_supported, ClipScanner};
pub use title::format_title;
