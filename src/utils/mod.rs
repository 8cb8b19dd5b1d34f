pub mod escape;
pub mod progress;
pub mod size;

pub use escape::escape_html;
pub use size::{format_file_size, format_kb};
