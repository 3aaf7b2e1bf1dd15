//! An in-memory hierarchical filesystem for Rust.
//! Models a tree of directories and files navigated through a current working directory.
//! Ideal for testing, teaching path semantics, and sandboxing without touching the disk.
//!
//! ### Overview
//!
//! `vfs-tree` keeps the whole hierarchy in process memory: nothing is persisted and the host
//! filesystem is never touched. The `TreeFS` type implements the generic `FsBackend` trait,
//! which the interactive `shell` drives line by line (`touch`, `mkdir`, `ls`, `pwd`, `cd`).
//!
//! **Key ideas**:
//! - **Tree model**: Directories own their children in insertion order; every entry knows its
//!   parent.
//! - **Path resolution**: Absolute and relative paths, `.` and `..`, with the working directory
//!   updated only when the whole path resolves.
//! - **Thread safety**: Appends are serialized per directory, navigation per filesystem.
//! - **Clarity**: Errors are returned as `anyhow::Error` with descriptive messages.

pub mod cli;
mod core;
pub mod logging;
pub mod shell;
mod vfs;

pub use crate::core::{FsBackend, Result, utils};
pub use shell::{Command, Flow, Shell};
pub use vfs::{Entry, EntryId, EntryType, ListEntry, NewEntry, ROOT_ID, TreeFS, render_table};
