//! Upload sources for the bulk job and bulk preview endpoints.
//!
//! A list is either a file on disk or bytes already in memory. Both end up
//! as a single multipart field named `file`.

use std::{
    fs::File,
    io::{self, Cursor, Read},
    path::{Path, PathBuf},
};

use crate::api::ApiClientError;

/// Multipart field every upload is attached under.
pub const FIELD_NAME: &str = "file";

/// File name given to in-memory content when the caller doesn't pick one.
pub const CONTENT_FILE_NAME: &str = "file";

/// Strings at least this long are never treated as paths.
pub const MAX_PATH_LEN: usize = 4096;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    Path {
        path: PathBuf,
        file_name: Option<String>,
    },
    Content {
        bytes: Vec<u8>,
        file_name: String,
    },
}

impl FileSource {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path {
            path: path.into(),
            file_name: None,
        }
    }

    pub fn content(bytes: impl Into<Vec<u8>>, file_name: impl Into<String>) -> Self {
        Self::Content {
            bytes: bytes.into(),
            file_name: file_name.into(),
        }
    }

    /// Overrides the file name sent with the upload.
    #[must_use]
    pub fn with_file_name(self, name: impl Into<String>) -> Self {
        match self {
            Self::Path { path, .. } => Self::Path {
                path,
                file_name: Some(name.into()),
            },
            Self::Content { bytes, .. } => Self::Content {
                bytes,
                file_name: name.into(),
            },
        }
    }

    /// Decides whether `raw` names a file or is the list itself.
    ///
    /// A single leading `@` is stripped before looking at the filesystem.
    /// If no regular file exists at the resulting path, the whole of `raw`
    /// is uploaded as content named [`CONTENT_FILE_NAME`].
    pub fn infer(raw: &str) -> Self {
        let candidate = raw.strip_prefix('@').unwrap_or(raw);

        if candidate.len() < MAX_PATH_LEN && Path::new(candidate).is_file() {
            log::trace!("Upload source {candidate} is a file on disk");
            Self::path(candidate)
        } else {
            log::trace!("Upload source is {} bytes of inline content", raw.len());
            Self::content(raw.as_bytes(), CONTENT_FILE_NAME)
        }
    }

    pub const fn is_path_backed(&self) -> bool {
        matches!(self, Self::Path { .. })
    }

    /// # Errors
    ///
    /// Returns [`ApiClientError::FileNotReadable`] if a path-backed source
    /// can't be opened.
    pub fn open(self) -> Result<Upload, ApiClientError> {
        match self {
            Self::Path { path, file_name } => {
                let unreadable = |source: io::Error| ApiClientError::FileNotReadable {
                    path: path.clone(),
                    source,
                };
                let file = File::open(&path).map_err(unreadable)?;
                let len = file.metadata().map_err(unreadable)?.len();
                let file_name = file_name.or_else(|| {
                    path.file_name()
                        .map(|name| name.to_string_lossy().into_owned())
                });

                Ok(Upload {
                    field: FIELD_NAME,
                    file_name,
                    stream: UploadStream::File { file, path, len },
                })
            }
            Self::Content { bytes, file_name } => Ok(Upload {
                field: FIELD_NAME,
                file_name: Some(file_name),
                stream: UploadStream::Buffer(Cursor::new(bytes)),
            }),
        }
    }
}

impl From<&str> for FileSource {
    fn from(raw: &str) -> Self {
        Self::infer(raw)
    }
}

impl From<PathBuf> for FileSource {
    fn from(path: PathBuf) -> Self {
        Self::path(path)
    }
}

impl From<&Path> for FileSource {
    fn from(path: &Path) -> Self {
        Self::path(path)
    }
}

/// One multipart field ready to be sent. Dropping it closes any file it
/// holds.
#[derive(Debug)]
pub struct Upload {
    pub field: &'static str,
    pub file_name: Option<String>,
    pub stream: UploadStream,
}

#[derive(Debug)]
pub enum UploadStream {
    File { file: File, path: PathBuf, len: u64 },
    Buffer(Cursor<Vec<u8>>),
}

impl UploadStream {
    pub fn len(&self) -> u64 {
        match self {
            Self::File { len, .. } => *len,
            Self::Buffer(buffer) => buffer.get_ref().len() as u64,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub const fn is_path_backed(&self) -> bool {
        matches!(self, Self::File { .. })
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File { path, .. } => Some(path),
            Self::Buffer(_) => None,
        }
    }
}

impl Read for UploadStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::File { file, .. } => file.read(buf),
            Self::Buffer(buffer) => buffer.read(buf),
        }
    }
}
