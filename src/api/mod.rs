//! External interface to the tracker backend.
//!
//! `IssueApi` is the abstract contract the page controllers talk to; the
//! production implementation is `HttpApi` over reqwest. Tests substitute an
//! in-memory fake.

pub mod error;
pub mod http;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::filter::FilterQuery;
use crate::types::{Comment, IssueDetail, IssueSummary, Label, Milestone, NewIssue, User};

pub use error::ApiError;
pub use http::HttpApi;

/// Issue listing page: rows plus the open/closed tab counts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueListing {
    pub open_count: u64,
    pub closed_count: u64,
    #[serde(default)]
    pub issues: Vec<IssueSummary>,
}

/// Response of `POST /file-upload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub file_url: String,
}

/// Abstract contract over the tracker backend.
pub trait IssueApi: Send + Sync {
    /// Fetch all users (assignee/author panel options)
    fn get_users(&self) -> impl std::future::Future<Output = Result<Vec<User>>> + Send;

    /// Fetch all labels
    fn get_labels(&self) -> impl std::future::Future<Output = Result<Vec<Label>>> + Send;

    /// Fetch all milestones
    fn get_milestones(&self) -> impl std::future::Future<Output = Result<Vec<Milestone>>> + Send;

    /// Fetch the issue listing for a filter query
    fn list_issues(
        &self,
        query: &FilterQuery,
    ) -> impl std::future::Future<Output = Result<IssueListing>> + Send;

    /// Fetch one issue's full record
    fn get_issue_detail(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<IssueDetail>> + Send;

    /// Replace the full assignee set of an issue
    fn edit_issue_assignees(
        &self,
        id: i64,
        assignee_ids: &[i64],
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Replace the full label set of an issue
    fn edit_issue_label(
        &self,
        id: i64,
        label_ids: &[i64],
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Set or clear the milestone of an issue
    fn edit_issue_milestone(
        &self,
        id: i64,
        milestone_id: Option<i64>,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Add a comment to an issue, returning the stored record
    fn add_comment(
        &self,
        id: i64,
        contents: &str,
    ) -> impl std::future::Future<Output = Result<Comment>> + Send;

    /// Upload a file, returning its public URL
    fn upload_file(
        &self,
        name: &str,
        mime: &str,
        bytes: Vec<u8>,
    ) -> impl std::future::Future<Output = Result<UploadedFile>> + Send;

    /// Create a new issue, returning its id
    fn create_issue(
        &self,
        issue: &NewIssue,
    ) -> impl std::future::Future<Output = Result<i64>> + Send;
}
