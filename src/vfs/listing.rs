use crate::vfs::EntryType;

const HEADER: [&str; 3] = ["TYPE", "SIZE", "NAME"];
const PADDING: usize = 4;

/// One row of a directory listing.
///
/// `name` is the display name: nested entries of a recursive listing carry their parent's
/// display name as a prefix, e.g. `docs/notes.txt`.
#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry {
    entry_type: EntryType,
    size: Option<usize>,
    name: String,
}

impl ListEntry {
    pub fn new(entry_type: EntryType, size: Option<usize>, name: String) -> ListEntry {
        ListEntry {
            entry_type,
            size,
            name,
        }
    }

    pub fn entry_type(&self) -> EntryType {
        self.entry_type
    }

    /// Size in bytes, `None` for directories.
    pub fn size(&self) -> Option<usize> {
        self.size
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_column(&self) -> &'static str {
        match self.entry_type {
            EntryType::File => "file",
            EntryType::Directory => "dir",
        }
    }

    /// Whole kilobytes (truncated) for files, `-` for directories.
    pub fn size_column(&self) -> String {
        match self.size {
            Some(bytes) => format!("{}kb", bytes / 1024),
            None => "-".to_string(),
        }
    }
}

/// Renders `rows` as a table under a `TYPE SIZE NAME` header.
///
/// Every column but the last is padded with spaces to its widest cell plus four.
pub fn render_table(rows: &[ListEntry]) -> String {
    let mut lines: Vec<[String; 3]> = Vec::with_capacity(rows.len() + 1);
    lines.push(HEADER.map(str::to_string));
    for row in rows {
        lines.push([
            row.type_column().to_string(),
            row.size_column(),
            row.name().to_string(),
        ]);
    }

    let mut widths = [0usize; 2];
    for line in &lines {
        for (width, cell) in widths.iter_mut().zip(line.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut table = String::new();
    for [kind, size, name] in &lines {
        for (cell, width) in [kind, size].into_iter().zip(widths) {
            table.push_str(cell);
            let fill = width + PADDING - cell.chars().count();
            table.extend(std::iter::repeat_n(' ', fill));
        }
        table.push_str(name);
        table.push('\n');
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_column() {
        let small = ListEntry::new(EntryType::File, Some(1023), "a".into());
        assert_eq!(small.size_column(), "0kb");

        let exact = ListEntry::new(EntryType::File, Some(1024), "b".into());
        assert_eq!(exact.size_column(), "1kb");

        let large = ListEntry::new(EntryType::File, Some(5 * 1024 + 1000), "c".into());
        assert_eq!(large.size_column(), "5kb");

        let dir = ListEntry::new(EntryType::Directory, None, "d".into());
        assert_eq!(dir.size_column(), "-");
        assert_eq!(dir.type_column(), "dir");
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_table(&[]), "TYPE    SIZE    NAME\n");
    }

    #[test]
    fn test_render_aligned() {
        let rows = vec![
            ListEntry::new(EntryType::File, Some(0), "test".into()),
            ListEntry::new(EntryType::Directory, None, "docs".into()),
            ListEntry::new(EntryType::File, Some(20480), "docs/big.bin".into()),
        ];
        let expected = "\
TYPE    SIZE    NAME
file    0kb     test
dir     -       docs
file    20kb    docs/big.bin
";
        assert_eq!(render_table(&rows), expected);
    }
}
