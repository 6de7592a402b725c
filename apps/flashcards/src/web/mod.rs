//! Presentation helpers shared by the route handlers.

pub mod history;
pub mod markdown;
pub mod share;
pub mod templates;

pub use history::History;
pub use markdown::render_markdown;
pub use templates::Templates;
