pub mod analyze;
pub mod model;

// Re-export commonly used types/functions for the binary and tests
pub use analyze::{summarize, Summary};
pub use model::{load_input, render_listing, InputFormat, Image, ShaderMeta};
