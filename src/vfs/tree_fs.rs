//! This module provides a purely in-memory hierarchical filesystem with a current working
//! directory.
//!
//! ### Key Features:
//! - **Arena storage**: Every file and directory lives in an index-addressed table; a directory
//!   owns the ids of its children, a child refers back to its parent by id.
//! - **Ordered children**: Listings and name lookups follow insertion order.
//! - **Atomic navigation**: `change_directory()` moves the working directory only after the whole
//!   path resolved.
//! - **Shareable**: All operations take `&self`; wrap in `Arc` to drive from several threads.

use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::anyhow;
use tracing::debug;

use crate::core::{FsBackend, Result, utils};
use crate::vfs::{Entry, EntryId, EntryType, ListEntry, NewEntry, ROOT_ID};

/// An in-memory tree of directories and files navigated through a working directory.
///
/// ### Internal state
///
/// * `entries` — The arena. Slot `ROOT_ID` holds the root directory (name `""`, no parent).
///   Slots are only ever appended; nothing is removed or renamed.
/// * `wd` — Id of the current working directory. Always a directory reachable from the root.
///
/// ### Invariants
///
/// 1. **Root**: the root is the only entry without a parent.
/// 2. **Parent consistency**: if `e.parent() == Some(p)`, then `p` is a directory listing `e`
///    among its children exactly once.
/// 3. **Exclusive ownership**: every non-root entry is the child of exactly one directory.
/// 4. **Duplicates**: sibling names may repeat; lookup picks the first directory by insertion
///    order.
///
/// ### Thread Safety
///
/// Appending to a directory is serialized by that directory's own lock. Reassigning `wd` is
/// serialized by a filesystem-wide lock. Locks are always taken in the order `wd`, then
/// `entries`, then a directory; the `entries` write lock is never requested while holding
/// another one.
///
/// ### Example
///
/// ```
/// use vfs_tree::TreeFS;
///
/// let fs = TreeFS::new();
/// fs.create_directory("docs", Vec::new()).unwrap();
/// fs.change_directory("docs").unwrap();
/// fs.create_file("note.txt", b"Hello").unwrap();
///
/// assert_eq!(fs.current_directory(), "/docs/");
/// assert_eq!(fs.list(false).len(), 1);
/// ```
#[derive(Debug)]
pub struct TreeFS {
    entries: RwLock<Vec<Entry>>,
    wd: Mutex<EntryId>,
}

impl TreeFS {
    /// Creates a filesystem holding only the root directory, which is also the working one.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(vec![Entry::root()]),
            wd: Mutex::new(ROOT_ID),
        }
    }

    /// Returns the id of the root directory.
    pub fn root(&self) -> EntryId {
        ROOT_ID
    }

    /// Returns the id of the current working directory.
    pub fn wd(&self) -> EntryId {
        *self.lock_wd()
    }

    /// Runs `f` against the entry `id` and returns its result, or `None` for an unknown id.
    ///
    /// The filesystem is read-locked while `f` runs: `f` must not call back into `self`.
    /// Even a nested read may deadlock once a writer is queued.
    pub fn with_entry<R>(&self, id: EntryId, f: impl FnOnce(&Entry) -> R) -> Option<R> {
        self.read_entries().get(id).map(f)
    }

    /// Creates a file named `name` holding `content` inside the working directory.
    /// Sibling names are not checked for uniqueness.
    /// Returns the id of the new file.
    pub fn create_file(&self, name: &str, content: &[u8]) -> Result<EntryId> {
        if name.is_empty() {
            return Err(anyhow!("invalid name: empty"));
        }

        let wd = self.wd();
        let id = self.push(Entry::file(name.to_string(), Some(wd), content.to_vec()));
        self.attach(wd, id);

        debug!(name, id, parent = wd, size = content.len(), "file created");
        Ok(id)
    }

    /// Creates a directory named `name` inside the working directory.
    /// * `children` - initial content of the directory, created recursively.
    ///
    /// Every name in the subtree must be non-empty; nothing is created otherwise.
    /// Returns the id of the new directory.
    pub fn create_directory(&self, name: &str, children: Vec<NewEntry>) -> Result<EntryId> {
        let new = NewEntry::dir(name, children);
        if let Err(e) = Self::validate(&new) {
            Self::discard(new);
            return Err(e);
        }

        let wd = self.wd();
        let id = {
            let mut entries = self.write_entries();
            Self::materialize(&mut entries, wd, new)
        };
        self.attach(wd, id);

        debug!(name, id, parent = wd, "directory created");
        Ok(id)
    }

    /// Changes the current working directory.
    ///
    /// * `path` is split on `/`. A leading `/` resolves it from the root, otherwise from the
    ///   working directory. `.` and empty segments are skipped, `..` moves to the parent
    ///   (staying put at the root), any other segment names a child directory.
    ///
    /// The working directory changes only if the whole path resolves. The error names the
    /// requested `path`, not the segment that failed.
    pub fn change_directory(&self, path: &str) -> Result<()> {
        let mut wd = self.lock_wd();

        if path == "/" {
            *wd = ROOT_ID;
            debug!(path, wd = ROOT_ID, "working directory changed");
            return Ok(());
        }

        let entries = self.read_entries();
        let mut cur = if utils::is_absolute(path) { ROOT_ID } else { *wd };

        for segment in utils::split_segments(path) {
            match segment {
                "" | "." => continue,
                ".." => {
                    if let Some(parent) = entries[cur].parent() {
                        cur = parent;
                    }
                }
                name => {
                    cur = Self::find_dir(&entries, cur, name)
                        .ok_or_else(|| anyhow!("the directory '{}' does not exist", path))?;
                }
            }
        }

        *wd = cur;
        debug!(path, wd = cur, "working directory changed");
        Ok(())
    }

    /// Returns the absolute path of the working directory, e.g. `/quz/foo/`.
    /// The root renders as `/`.
    pub fn current_directory(&self) -> String {
        let wd = self.wd();
        Self::compose_path(&self.read_entries(), wd)
    }

    /// Returns the absolute path of any entry, built like `current_directory()`.
    pub fn path_of(&self, id: EntryId) -> Option<String> {
        let entries = self.read_entries();
        if id >= entries.len() {
            return None;
        }
        Some(Self::compose_path(&entries, id))
    }

    /// Lists the working directory in insertion order.
    ///
    /// With `recursive`, every directory row is immediately followed by its own content
    /// (pre-order), whose names are prefixed with the directory's display name and `/`.
    pub fn list(&self, recursive: bool) -> Vec<ListEntry> {
        let wd = self.wd();
        let entries = self.read_entries();
        Self::collect_rows(&entries, wd, recursive)
    }

    /// Pre-order walk with an explicit stack, so depth is bounded by memory, not by the
    /// call stack.
    fn collect_rows(entries: &[Entry], dir: EntryId, recursive: bool) -> Vec<ListEntry> {
        let mut rows = Vec::new();
        let mut pending: Vec<(EntryId, String)> = entries[dir]
            .children()
            .into_iter()
            .rev()
            .map(|child| (child, entries[child].name().to_string()))
            .collect();

        while let Some((id, name)) = pending.pop() {
            let entry = &entries[id];
            match entry.entry_type() {
                EntryType::File => rows.push(ListEntry::new(EntryType::File, entry.size(), name)),
                EntryType::Directory => {
                    if recursive {
                        // Reversed, so the first child is popped next
                        for child in entry.children().into_iter().rev() {
                            let child_name = format!("{}/{}", name, entries[child].name());
                            pending.push((child, child_name));
                        }
                    }
                    rows.push(ListEntry::new(EntryType::Directory, None, name));
                }
            }
        }
        rows
    }

    /// First child directory of `dir` called `name`. Files never match.
    fn find_dir(entries: &[Entry], dir: EntryId, name: &str) -> Option<EntryId> {
        entries[dir]
            .children()
            .into_iter()
            .find(|&child| entries[child].is_dir() && entries[child].name() == name)
    }

    fn compose_path(entries: &[Entry], id: EntryId) -> String {
        let mut names = Vec::new();
        let mut cur = Some(id);
        while let Some(entry) = cur.map(|id| &entries[id]) {
            names.push(entry.name());
            cur = entry.parent();
        }
        // The root's empty name yields the leading slash
        names.iter().rev().fold(String::new(), |mut path, name| {
            path.push_str(name);
            path.push('/');
            path
        })
    }

    fn validate(new: &NewEntry) -> Result<()> {
        let mut pending = vec![new];
        while let Some(new) = pending.pop() {
            if new.name().is_empty() {
                return Err(anyhow!("invalid name: empty"));
            }
            if let NewEntry::Directory { children, .. } = new {
                pending.extend(children);
            }
        }
        Ok(())
    }

    /// Drops a subtree one level at a time instead of through nested drops.
    fn discard(new: NewEntry) {
        let mut pending = vec![new];
        while let Some(new) = pending.pop() {
            if let NewEntry::Directory { children, .. } = new {
                pending.extend(children);
            }
        }
    }

    /// Stores `new` and its whole subtree below `parent`.
    /// Children are linked to their directory in the given order; linking the top entry to
    /// `parent` is up to the caller.
    fn materialize(entries: &mut Vec<Entry>, parent: EntryId, new: NewEntry) -> EntryId {
        let top = entries.len();
        let mut pending = vec![(parent, new)];

        while let Some((parent, new)) = pending.pop() {
            let id = entries.len();
            match new {
                NewEntry::File { name, content } => {
                    entries.push(Entry::file(name, Some(parent), content));
                }
                NewEntry::Directory { name, children } => {
                    entries.push(Entry::directory(name, Some(parent)));
                    pending.extend(children.into_iter().rev().map(|child| (id, child)));
                }
            }
            if id != top {
                entries[parent].add(id);
            }
        }
        top
    }

    fn push(&self, entry: Entry) -> EntryId {
        let mut entries = self.write_entries();
        entries.push(entry);
        entries.len() - 1
    }

    /// Links `child` under `dir` through the directory's own lock.
    /// `dir` is always the working directory captured by the caller, hence a directory.
    fn attach(&self, dir: EntryId, child: EntryId) {
        let added = self.read_entries()[dir].add(child);
        debug_assert!(added, "working directory {} is not a directory", dir);
    }

    // Every mutation is a single push or assignment, so a poisoned lock still guards
    // consistent data.
    fn read_entries(&self) -> RwLockReadGuard<'_, Vec<Entry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_entries(&self) -> RwLockWriteGuard<'_, Vec<Entry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_wd(&self) -> MutexGuard<'_, EntryId> {
        self.wd.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for TreeFS {
    fn default() -> Self {
        Self::new()
    }
}

impl FsBackend for TreeFS {
    /// Returns the absolute path of the working directory.
    fn cwd(&self) -> Result<String> {
        Ok(self.current_directory())
    }

    fn cd(&self, path: &str) -> Result<()> {
        self.change_directory(path)
    }

    /// Creates an empty directory in the working directory.
    fn mkdir(&self, name: &str) -> Result<()> {
        self.create_directory(name, Vec::new()).map(|_| ())
    }

    /// Creates a file in the working directory.
    fn mkfile(&self, name: &str, content: &[u8]) -> Result<()> {
        self.create_file(name, content).map(|_| ())
    }

    fn ls(&self, recursive: bool) -> Result<Vec<ListEntry>> {
        Ok(self.list(recursive))
    }
}
