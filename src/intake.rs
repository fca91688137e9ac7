//! Upload Surface
//!
//! The drop / click-to-browse target that hands exactly one CSV file to the
//! rest of the pipeline. The surface is generic over the file handle so the
//! same filter serves local paths and browser `File` objects.

use thiserror::Error;

/// Declared MIME type accepted by the default filter
pub const CSV_MIME: &str = "text/csv";

/// File extension accepted by the default filter
pub const CSV_EXTENSION: &str = ".csv";

/// Prompt while a drag hovers over the surface
pub const PROMPT_ACTIVE: &str = "Drop the CSV file here...";

/// Prompt at rest
pub const PROMPT_IDLE: &str = "Drag and drop a CSV file here, or click to select one";

/// A file offered to the surface by a drop or a browse dialog
#[derive(Debug, Clone, PartialEq)]
pub struct FileCandidate<F> {
    /// File name as reported by the platform
    pub name: String,
    /// Declared MIME type; empty when the platform does not know it
    pub mime: String,
    /// Platform handle used later to read or upload the contents
    pub handle: F,
}

impl<F> FileCandidate<F> {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, handle: F) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            handle,
        }
    }
}

/// Why the surface refused a drop
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Rejection {
    #[error("{name} is not a CSV file")]
    UnsupportedType { name: String, mime: String },

    #[error("Only one file can be analyzed at a time ({0} were dropped)")]
    TooManyFiles(usize),
}

/// Event emitted by the surface for one user interaction
#[derive(Debug, Clone, PartialEq)]
pub enum IntakeEvent<F> {
    FileSelected(FileCandidate<F>),
    FileRejected(Rejection),
}

/// Accepted MIME types and extensions
///
/// A file passes when either its declared type or its extension matches.
#[derive(Debug, Clone)]
pub struct AcceptFilter {
    mime_types: Vec<String>,
    extensions: Vec<String>,
}

impl Default for AcceptFilter {
    fn default() -> Self {
        Self {
            mime_types: vec![CSV_MIME.to_string()],
            extensions: vec![CSV_EXTENSION.to_string()],
        }
    }
}

impl AcceptFilter {
    pub fn new(mime_types: Vec<String>, extensions: Vec<String>) -> Self {
        Self {
            mime_types,
            extensions: extensions.into_iter().map(|e| e.to_lowercase()).collect(),
        }
    }

    pub fn accepts(&self, name: &str, mime: &str) -> bool {
        let mime = mime.trim();
        let name = name.to_lowercase();
        self.mime_types.iter().any(|m| m.eq_ignore_ascii_case(mime))
            || self.extensions.iter().any(|ext| name.ends_with(ext.as_str()))
    }
}

/// The drop / browse target
///
/// Drag state is a depth counter: browsers fire `dragenter` and `dragleave`
/// for every child element crossed, so the surface stays active until each
/// enter has been matched by a leave.
#[derive(Debug, Clone, Default)]
pub struct UploadSurface {
    filter: AcceptFilter,
    drag_depth: u32,
}

impl UploadSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(filter: AcceptFilter) -> Self {
        Self {
            filter,
            drag_depth: 0,
        }
    }

    pub fn drag_enter(&mut self) {
        self.drag_depth += 1;
    }

    pub fn drag_leave(&mut self) {
        self.drag_depth = self.drag_depth.saturating_sub(1);
    }

    pub fn is_drag_active(&self) -> bool {
        self.drag_depth > 0
    }

    /// Prompt text for the current drag state
    pub fn prompt(&self) -> &'static str {
        prompt_for(self.is_drag_active())
    }

    /// Files released over the surface
    pub fn drop_files<F>(&mut self, files: Vec<FileCandidate<F>>) -> Option<IntakeEvent<F>> {
        self.drag_depth = 0;
        self.intake(files)
    }

    /// Files picked in the browse dialog
    pub fn browse<F>(&self, files: Vec<FileCandidate<F>>) -> Option<IntakeEvent<F>> {
        self.intake(files)
    }

    /// Apply the single-file, CSV-only filter
    ///
    /// Returns `None` for an empty interaction (cancelled dialog, drop with
    /// no files).
    pub fn intake<F>(&self, mut files: Vec<FileCandidate<F>>) -> Option<IntakeEvent<F>> {
        match files.len() {
            0 => None,
            1 => {
                let file = files.remove(0);
                if self.filter.accepts(&file.name, &file.mime) {
                    tracing::debug!(file = %file.name, mime = %file.mime, "File accepted");
                    Some(IntakeEvent::FileSelected(file))
                } else {
                    tracing::info!(file = %file.name, mime = %file.mime, "Rejected non-CSV file");
                    Some(IntakeEvent::FileRejected(Rejection::UnsupportedType {
                        name: file.name,
                        mime: file.mime,
                    }))
                }
            }
            n => {
                tracing::info!(count = n, "Rejected multi-file drop");
                Some(IntakeEvent::FileRejected(Rejection::TooManyFiles(n)))
            }
        }
    }
}

/// Prompt text for a drag state
pub fn prompt_for(drag_active: bool) -> &'static str {
    if drag_active {
        PROMPT_ACTIVE
    } else {
        PROMPT_IDLE
    }
}
