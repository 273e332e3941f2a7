use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::item::{ItemId, ItemType};

/// What the enclosing path was resolved to before this candidate.
///
/// This is a lookup value, never a handle to the parent item itself: resolvers
/// only read the parent's type and cannot reach back into the item graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParentRef {
    /// The library root. Its direct children are whole libraries.
    Root,
    /// A folder no resolver claimed (collection folders, plain directories).
    Folder(ItemId),
    /// A folder that was resolved into a typed item.
    Item {
        /// Lookup key of the parent item.
        id: ItemId,
        /// Type the parent was resolved as.
        item_type: ItemType,
    },
}

impl ParentRef {
    /// Returns `true` for the library root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        matches!(self, Self::Root)
    }

    /// Returns the parent's item type if it was resolved into one.
    #[must_use]
    pub fn item_type(&self) -> Option<ItemType> {
        match self {
            Self::Item { item_type, .. } => Some(*item_type),
            Self::Root | Self::Folder(_) => None,
        }
    }

    /// Returns the parent's lookup key, if it has one.
    #[must_use]
    pub fn id(&self) -> Option<ItemId> {
        match self {
            Self::Root => None,
            Self::Folder(id) | Self::Item { id, .. } => Some(*id),
        }
    }
}

/// A child entry enumerated for the candidate path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileEntry {
    /// File or directory name (final path segment only).
    pub name: String,
    /// Whether the entry is a directory.
    pub is_dir: bool,
}

impl FileEntry {
    /// A regular file entry.
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }

    /// A directory entry.
    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }

    /// Lowercased extension without the leading dot.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
    }
}

/// Everything a resolver may look at for one candidate path.
///
/// Built by the enumerator before resolution and never modified while
/// resolvers run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveContext {
    path: PathBuf,
    is_dir: bool,
    parent: Option<ParentRef>,
    children: Vec<FileEntry>,
    metadata_files: Vec<String>,
}

impl ResolveContext {
    /// Context for a directory candidate with no parent, children or sidecars.
    pub fn directory(path: impl Into<PathBuf>) -> Self {
        Self::new(path, true)
    }

    /// Context for a file candidate.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::new(path, false)
    }

    fn new(path: impl Into<PathBuf>, is_dir: bool) -> Self {
        Self {
            path: path.into(),
            is_dir,
            parent: None,
            children: Vec::new(),
            metadata_files: Vec::new(),
        }
    }

    /// Sets what the enclosing path was resolved as.
    #[must_use]
    pub fn with_parent(mut self, parent: ParentRef) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Sets the enumerated children of the candidate.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = FileEntry>) -> Self {
        self.children = children.into_iter().collect();
        self
    }

    /// Sets the sidecar metadata filenames detected for the candidate.
    #[must_use]
    pub fn with_metadata_files<S: Into<String>>(
        mut self,
        files: impl IntoIterator<Item = S>,
    ) -> Self {
        self.metadata_files = files.into_iter().map(Into::into).collect();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    pub fn parent(&self) -> Option<&ParentRef> {
        self.parent.as_ref()
    }

    pub fn children(&self) -> &[FileEntry] {
        &self.children
    }

    pub fn metadata_files(&self) -> &[String] {
        &self.metadata_files
    }

    /// Final path segment, or `None` when the path has no usable name
    /// (empty, `/`, `..`, or not valid UTF-8).
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.trim().is_empty())
    }

    /// Full path of a detected sidecar file, looked up case-insensitively.
    #[must_use]
    pub fn metadata_file_path(&self, name: &str) -> Option<PathBuf> {
        self.metadata_files
            .iter()
            .find(|f| f.eq_ignore_ascii_case(name))
            .map(|f| self.path.join(f))
    }
}
