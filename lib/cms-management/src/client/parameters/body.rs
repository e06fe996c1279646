use std::path::Path;

use bytes::Bytes;
use mime::Mime;
use serde::Serialize;
use serde_json::Value;

use crate::client::ManagementError;

/// The body of a management API request.
///
/// Bodies stay inspectable until the request is sent; multipart forms are only
/// converted into a `reqwest` form at execution time.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// A JSON document, sent as `application/json`.
    Json(Value),
    /// A multipart form, sent as `multipart/form-data`.
    Multipart(MultipartForm),
}

impl RequestBody {
    /// Creates a JSON body from any serializable value.
    ///
    /// # Errors
    ///
    /// Fails when the value cannot be represented as JSON.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, ManagementError> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }

    /// Returns the media type announced in the `Content-Type` header.
    pub fn content_type(&self) -> Mime {
        match self {
            Self::Json(_) => mime::APPLICATION_JSON,
            Self::Multipart(_) => mime::MULTIPART_FORM_DATA,
        }
    }

    /// Returns the JSON document, if this is a JSON body.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Multipart(_) => None,
        }
    }

    /// Returns the multipart form, if this is a multipart body.
    pub fn as_multipart(&self) -> Option<&MultipartForm> {
        match self {
            Self::Json(_) => None,
            Self::Multipart(form) => Some(form),
        }
    }
}

impl From<Value> for RequestBody {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<MultipartForm> for RequestBody {
    fn from(value: MultipartForm) -> Self {
        Self::Multipart(value)
    }
}

/// One field of a multipart form.
#[derive(Clone, PartialEq, derive_more::Debug)]
pub enum FormPart {
    /// A plain text field.
    Text {
        /// The field name, e.g. `asset[title]`.
        name: String,
        /// The field value.
        value: String,
    },
    /// A file field.
    File {
        /// The field name, e.g. `asset[upload]`.
        name: String,
        /// The file name announced to the server.
        file_name: String,
        /// The media type of the file.
        mime_type: Mime,
        /// The file content.
        #[debug(ignore)]
        data: Bytes,
    },
}

impl FormPart {
    /// Returns the field name.
    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => name,
        }
    }
}

/// An ordered multipart form, used to upload assets and import schemas.
///
/// ```rust
/// use cms_management::MultipartForm;
///
/// let form = MultipartForm::new()
///     .text("asset[title]", "Logo")
///     .file("asset[upload]", "logo.png", mime::IMAGE_PNG, vec![0x89_u8, 0x50]);
///
/// assert_eq!(form.len(), 2);
/// assert_eq!(form.text_value("asset[title]"), Some("Logo"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartForm {
    parts: Vec<FormPart>,
}

impl MultipartForm {
    /// Creates an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a text field.
    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Adds a file field from in-memory content.
    #[must_use]
    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        mime_type: Mime,
        data: impl Into<Bytes>,
    ) -> Self {
        self.parts.push(FormPart::File {
            name: name.into(),
            file_name: file_name.into(),
            mime_type,
            data: data.into(),
        });
        self
    }

    /// Adds a file field read from disk.
    ///
    /// The media type is guessed from the file extension and defaults to
    /// `application/octet-stream`.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read.
    pub fn file_from_path(
        self,
        name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> std::io::Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|it| it.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime_type = guess_mime(path);
        Ok(self.file(name, file_name, mime_type, data))
    }

    /// Returns the parts in insertion order.
    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    /// Returns the value of the first text field with the given name.
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|part| match part {
            FormPart::Text { name: part_name, value } if part_name == name => Some(value.as_str()),
            _ => None,
        })
    }

    /// Checks if the form is empty.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Returns the number of parts.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub(in crate::client) fn to_reqwest(&self) -> Result<reqwest::multipart::Form, ManagementError> {
        let mut form = reqwest::multipart::Form::new();
        for part in &self.parts {
            form = match part {
                FormPart::Text { name, value } => form.text(name.clone(), value.clone()),
                FormPart::File {
                    name,
                    file_name,
                    mime_type,
                    data,
                } => {
                    let part = reqwest::multipart::Part::bytes(data.to_vec())
                        .file_name(file_name.clone())
                        .mime_str(mime_type.as_ref())?;
                    form.part(name.clone(), part)
                }
            };
        }
        Ok(form)
    }
}

fn guess_mime(path: &Path) -> Mime {
    let extension = path
        .extension()
        .map(|it| it.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "json" => mime::APPLICATION_JSON,
        "png" => mime::IMAGE_PNG,
        "jpg" | "jpeg" => mime::IMAGE_JPEG,
        "gif" => mime::IMAGE_GIF,
        "svg" => mime::IMAGE_SVG,
        "pdf" => mime::APPLICATION_PDF,
        "txt" => mime::TEXT_PLAIN,
        "html" | "htm" => mime::TEXT_HTML,
        "css" => mime::TEXT_CSS,
        "js" => mime::APPLICATION_JAVASCRIPT,
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}
