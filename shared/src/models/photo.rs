//! Photo Model

use serde::{Deserialize, Serialize};

/// Most photos accepted from a single attach call; extra files in the
/// same batch are dropped, not queued.
pub const MAX_BATCH_UPLOAD: usize = 6;

/// Most photos kept per place; the merged list is truncated newest-first.
pub const MAX_PHOTOS: usize = 12;

/// One attached image.
///
/// Created only by the photo attach path; never edited or individually
/// deleted afterwards (the whole list is rewritten instead).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    /// Locally generated at upload time
    pub id: String,
    /// Retrievable address of the stored binary; immutable once set
    pub url: String,
    /// ISO-8601 string, client clock at upload time
    pub created_at: String,
}

/// One binary asset submitted for upload.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    /// Original file name, kept in the storage path as a human-readable trace
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl PhotoUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}
