mod entry;
mod listing;
mod tree_fs;

pub use entry::{Entry, EntryId, EntryType, NewEntry, ROOT_ID};
pub use listing::{ListEntry, render_table};
pub use tree_fs::TreeFS;
