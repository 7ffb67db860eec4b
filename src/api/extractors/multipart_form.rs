//! Multipart form parsing helper.
//!
//! Registration and product forms mix text fields with file parts, so
//! the raw `Multipart` stream is drained once into a field map that
//! handlers read typed values out of.

use std::collections::HashMap;
use std::str::FromStr;

use axum::extract::Multipart;

use crate::domain::FileUpload;
use crate::errors::{AppError, AppResult};

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Text and file fields collected from a multipart request.
#[derive(Debug, Default)]
pub struct FormFields {
    texts: HashMap<String, String>,
    files: HashMap<String, Vec<FileUpload>>,
}

impl FormFields {
    /// Drain a multipart stream into a field map.
    ///
    /// Parts with a filename are treated as file uploads, everything
    /// else as UTF-8 text. Repeated file parts under one name (for
    /// example several `images`) are kept in order.
    pub async fn parse(mut multipart: Multipart) -> AppResult<Self> {
        let mut fields = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::bad_request(format!("Malformed multipart body: {e}")))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if field.file_name().is_some() {
                let content_type = field
                    .content_type()
                    .unwrap_or(DEFAULT_CONTENT_TYPE)
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::bad_request(format!("Failed to read file: {e}")))?;

                fields.files.entry(name).or_default().push(FileUpload {
                    content_type,
                    bytes: bytes.to_vec(),
                });
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::bad_request(format!("Failed to read field: {e}")))?;
                fields.texts.insert(name, value);
            }
        }

        Ok(fields)
    }

    /// Required text field
    pub fn text(&self, name: &str) -> AppResult<String> {
        self.texts
            .get(name)
            .cloned()
            .ok_or_else(|| AppError::validation(format!("{name} is required")))
    }

    /// Optional text field, empty strings collapse to None
    pub fn text_opt(&self, name: &str) -> Option<String> {
        self.texts.get(name).filter(|v| !v.is_empty()).cloned()
    }

    /// Required text field parsed into a typed value
    pub fn parsed<T: FromStr>(&self, name: &str) -> AppResult<T> {
        self.text(name)?
            .parse()
            .map_err(|_| AppError::validation(format!("{name} is invalid")))
    }

    /// Optional text field parsed into a typed value
    pub fn parsed_opt<T: FromStr>(&self, name: &str) -> AppResult<Option<T>> {
        match self.text_opt(name) {
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| AppError::validation(format!("{name} is invalid"))),
            None => Ok(None),
        }
    }

    /// All file uploads submitted under a name, possibly empty
    pub fn files(&mut self, name: &str) -> Vec<FileUpload> {
        self.files.remove(name).unwrap_or_default()
    }

    /// Required single file upload
    pub fn file(&mut self, name: &str) -> AppResult<FileUpload> {
        self.files(name)
            .into_iter()
            .next()
            .ok_or_else(|| AppError::validation(format!("{name} file is required")))
    }
}
