use crate::vfs::ListEntry;

/// The command surface a filesystem exposes to the shell.
///
/// Every method works relative to the current working directory, except `cd` with an
/// absolute path.
pub trait FsBackend {
    /// Returns the absolute path of the current working directory, always ending with `/`.
    fn cwd(&self) -> Result<String>;

    /// Changes the current working directory.
    /// * `path` can be in relative or absolute form.
    /// On error the working directory is left unchanged.
    fn cd(&self, path: &str) -> Result<()>;

    /// Creates an empty directory named `name` in the working directory.
    fn mkdir(&self, name: &str) -> Result<()>;

    /// Creates a file named `name` holding `content` in the working directory.
    fn mkfile(&self, name: &str, content: &[u8]) -> Result<()>;

    /// Lists the working directory, descending into subdirectories if `recursive`.
    fn ls(&self, recursive: bool) -> Result<Vec<ListEntry>>;
}

pub type Result<T> = std::result::Result<T, anyhow::Error>;

pub mod utils {
    /// Returns `true` if `path` is resolved from the root.
    pub fn is_absolute(path: &str) -> bool {
        path.starts_with('/')
    }

    /// Strips leading and trailing slashes and splits the rest into segments.
    /// An empty remainder yields a single empty segment.
    pub fn split_segments(path: &str) -> Vec<&str> {
        path.trim_matches('/').split('/').collect()
    }

}
