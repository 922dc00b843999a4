use std::path::{Path, PathBuf};

/// Extensions accepted by the file picker, lowercase and without the dot.
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["png", "jpg", "pdf"];

/// Error type for file selection.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("Unsupported file type: {name} (expected .png, .jpg or .pdf)")]
    UnsupportedExtension { name: String },

    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reference to a file chosen in the file picker.
///
/// The file contents are never read; only the reference travels with the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    name: String,
    path: PathBuf,
    size: Option<u64>,
}

impl FileRef {
    /// Create a reference without touching the filesystem.
    ///
    /// Fails if the extension is not one of [`ACCEPTED_EXTENSIONS`].
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, FileError> {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if !has_accepted_extension(&path) {
            return Err(FileError::UnsupportedExtension { name });
        }

        Ok(Self {
            name,
            path,
            size: None,
        })
    }

    /// Create a reference to an existing file, recording its size.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, FileError> {
        let file = Self::new(path)?;
        let metadata = std::fs::metadata(&file.path).map_err(|source| FileError::Io {
            path: file.path.clone(),
            source,
        })?;
        Ok(file.with_size(metadata.len()))
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> Option<u64> {
        self.size
    }
}

fn has_accepted_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|accepted| ext.eq_ignore_ascii_case(accepted))
        })
        .unwrap_or(false)
}
