//! Uploaded file payloads (certification documents, product images).

/// Raw uploaded bytes with their declared content type.
#[derive(Clone)]
pub struct FileUpload {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

// Keep raw bytes out of debug output
impl std::fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileUpload")
            .field("content_type", &self.content_type)
            .field("bytes", &format_args!("{} bytes", self.bytes.len()))
            .finish()
    }
}
