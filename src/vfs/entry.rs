use std::sync::{Mutex, PoisonError};

/// Index of an entry in the filesystem arena.
pub type EntryId = usize;

/// The root directory always occupies the first arena slot.
pub const ROOT_ID: EntryId = 0;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EntryType {
    File,
    Directory,
}

/// Payload of an arena slot: a leaf with content, or a directory with ordered children.
#[derive(Debug)]
pub enum EntryBody {
    File { content: Vec<u8> },
    Directory { children: Mutex<Vec<EntryId>> },
}

/// A file or directory stored in the arena.
///
/// `parent` is a plain index, never an owning link. Only the root has no parent.
#[derive(Debug)]
pub struct Entry {
    name: String,
    parent: Option<EntryId>,
    body: EntryBody,
}

impl Entry {
    pub fn root() -> Entry {
        Entry::directory(String::new(), None)
    }

    pub fn file(name: String, parent: Option<EntryId>, content: Vec<u8>) -> Entry {
        Entry {
            name,
            parent,
            body: EntryBody::File { content },
        }
    }

    pub fn directory(name: String, parent: Option<EntryId>) -> Entry {
        Entry {
            name,
            parent,
            body: EntryBody::Directory {
                children: Mutex::new(Vec::new()),
            },
        }
    }

    /// Returns the entry name; empty only for the root.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<EntryId> {
        self.parent
    }

    pub fn entry_type(&self) -> EntryType {
        match self.body {
            EntryBody::File { .. } => EntryType::File,
            EntryBody::Directory { .. } => EntryType::Directory,
        }
    }

    pub fn is_file(&self) -> bool {
        self.entry_type() == EntryType::File
    }

    pub fn is_dir(&self) -> bool {
        self.entry_type() == EntryType::Directory
    }

    /// Returns the stored payload of a file, `None` for a directory.
    pub fn content(&self) -> Option<&[u8]> {
        match &self.body {
            EntryBody::File { content } => Some(content),
            EntryBody::Directory { .. } => None,
        }
    }

    /// Payload length in bytes, `None` for a directory.
    pub fn size(&self) -> Option<usize> {
        self.content().map(<[u8]>::len)
    }

    /// Returns a snapshot of the children in insertion order.
    /// Files have no children. The snapshot may be stale as soon as it is returned.
    pub fn children(&self) -> Vec<EntryId> {
        match &self.body {
            EntryBody::File { .. } => Vec::new(),
            EntryBody::Directory { children } => children
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
        }
    }

    /// Appends `child` to the end of the children list.
    /// Returns `false` (and does nothing) if this entry is a file.
    pub fn add(&self, child: EntryId) -> bool {
        match &self.body {
            EntryBody::File { .. } => false,
            EntryBody::Directory { children } => {
                children
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(child);
                true
            }
        }
    }
}

/// Description of an entry to be created, used to seed a new directory with initial children.
#[derive(Debug, Clone, PartialEq)]
pub enum NewEntry {
    File { name: String, content: Vec<u8> },
    Directory { name: String, children: Vec<NewEntry> },
}

impl NewEntry {
    pub fn file<S: Into<String>>(name: S, content: &[u8]) -> NewEntry {
        NewEntry::File {
            name: name.into(),
            content: content.to_vec(),
        }
    }

    pub fn dir<S: Into<String>>(name: S, children: Vec<NewEntry>) -> NewEntry {
        NewEntry::Directory {
            name: name.into(),
            children,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            NewEntry::File { name, .. } | NewEntry::Directory { name, .. } => name,
        }
    }
}
