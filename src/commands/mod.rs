pub mod check;
pub mod collection;

// Re-export command functions for convenience
pub use check::check;
pub use collection::{add, edit, list, manual, remove, reorder, show, EditFields, ManualEntry};
