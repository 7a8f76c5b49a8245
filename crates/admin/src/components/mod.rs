//! Reusable screen components.
//!
//! Every admin screen is an instance of the same list-and-mutate pattern;
//! the pieces shared across all four live here: the reconciled list cache
//! and the form editor state machine.

pub mod editor;
pub mod list_store;

pub use editor::EditorState;
pub use list_store::{Keyed, ListStore};
