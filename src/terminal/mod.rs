mod command;
mod render;

pub use command::{parse, Command, PasteBuffer, HELP};
pub use render::{render_health, render_model, render_view};
