//! New-issue composer controller.
//!
//! Collects title, body, and facet selections; validates and uploads an
//! attached image, inlining it into the body as a markdown reference; and
//! posts the new issue. Submission is refused while the title is empty.

use tracing::warn;

use crate::api::IssueApi;
use crate::error::{DeskError, Result};
use crate::pages::lifetime::PageLifetime;
use crate::selection::SelectionState;
use crate::types::NewIssue;

/// Upload size cap: 1 MiB.
pub const MAX_UPLOAD_BYTES: usize = 1_048_576;

/// Author id sent until sign-in exists.
pub const PLACEHOLDER_AUTHOR_ID: i64 = 1;

/// Outcome flags of the most recent attach attempt. All flags are reset at
/// the start of each attempt; a view checks each one rather than branching
/// on a single tagged result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileUploadStatus {
    pub size_error: bool,
    pub type_error: bool,
    pub is_uploading: bool,
    pub upload_failed: bool,
}

impl FileUploadStatus {
    fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn has_error(&self) -> bool {
        self.size_error || self.type_error || self.upload_failed
    }
}

#[derive(Debug, Default)]
pub struct ComposePage {
    title: String,
    body: String,
    pub selections: SelectionState,
    upload: FileUploadStatus,
    pub lifetime: PageLifetime,
}

impl ComposePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn upload_status(&self) -> FileUploadStatus {
        self.upload
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    /// Validate and upload an attachment, then inline it into the body.
    ///
    /// Checks run in order and short-circuit: size cap first, then MIME
    /// prefix, then the upload itself. On success the markdown reference
    /// `![name](url)` is appended to the body.
    pub async fn attach(
        &mut self,
        api: &impl IssueApi,
        name: &str,
        mime: &str,
        bytes: Vec<u8>,
    ) -> Result<()> {
        self.upload.reset();

        if bytes.len() > MAX_UPLOAD_BYTES {
            self.upload.size_error = true;
            return Err(DeskError::Validation(format!(
                "file '{}' exceeds the {} byte upload limit",
                name, MAX_UPLOAD_BYTES
            )));
        }

        if !mime.starts_with("image/") {
            self.upload.type_error = true;
            return Err(DeskError::Validation(format!(
                "file '{}' is not an image ({})",
                name, mime
            )));
        }

        self.upload.is_uploading = true;
        let result = self.lifetime.scoped(api.upload_file(name, mime, bytes)).await;
        self.upload.is_uploading = false;

        match result {
            Ok(uploaded) => {
                self.body.push_str(&format!("![{}]({})", name, uploaded.file_url));
                Ok(())
            }
            Err(e) => {
                warn!(name, error = %e, "file upload failed");
                self.upload.upload_failed = true;
                Err(e)
            }
        }
    }

    /// The submit control is disabled while the title is empty.
    pub fn can_submit(&self) -> bool {
        !self.title.is_empty()
    }

    /// Post the new issue, returning its id. An empty title is rejected
    /// before any network call.
    pub async fn submit(&self, api: &impl IssueApi) -> Result<i64> {
        if !self.can_submit() {
            return Err(DeskError::Validation("title must not be empty".to_string()));
        }

        let issue = NewIssue {
            title: self.title.clone(),
            contents: self.body.clone(),
            author_id: PLACEHOLDER_AUTHOR_ID,
            assignee_ids: self.selections.assignees.ids().to_vec(),
            label_ids: self.selections.labels.ids().to_vec(),
            milestone_id: self.selections.milestone.selected(),
        };

        self.lifetime.scoped(api.create_issue(&issue)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_default_clear() {
        let status = FileUploadStatus::default();
        assert!(!status.has_error());
        assert!(!status.is_uploading);
    }

    #[test]
    fn test_can_submit_requires_title() {
        let mut page = ComposePage::new();
        assert!(!page.can_submit());
        page.set_title("crash on save");
        assert!(page.can_submit());
        page.set_title("");
        assert!(!page.can_submit());
    }
}
