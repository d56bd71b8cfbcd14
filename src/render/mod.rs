//! HTML rendering for the dashboard
//!
//! Query results are laid out as [`ResultTable`]s, projected for display
//! (internal `id` / `pr_number` columns removed) and rendered through
//! minijinja templates with HTML auto-escaping.

mod engine;
mod errors;
mod filters;
mod pages;
mod table;

pub use engine::PageRenderer;
pub use errors::RenderError;
pub use pages::{Chrome, DetailPage, ListPage, ScoresPage};
pub use table::{Cell, ResultTable, TableSection};
