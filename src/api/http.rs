//! HTTP implementation of `IssueApi` over reqwest.
//!
//! The API token is attached as a default `Authorization` header built from
//! a redacting wrapper, so enabling request logging never prints the secret.

use std::time::Duration;

use reqwest::header;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::config::Config;
use crate::error::{DeskError, Result};
use crate::filter::FilterQuery;
use crate::types::{Comment, IssueDetail, Label, Milestone, NewIssue, User};

use super::error::ApiError;
use super::{IssueApi, IssueListing, UploadedFile};

/// HTTP client for the tracker backend.
pub struct HttpApi {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct CreatedIssue {
    id: i64,
}

impl HttpApi {
    /// Create a client from configuration. Fails when no backend URL is set.
    pub fn from_config(config: &Config) -> Result<Self> {
        let base_url = config.api_url().ok_or_else(|| {
            DeskError::Config(
                "backend URL not configured. Set ISSUEDESK_API_URL or run: idesk config set api.url <url>"
                    .to_string(),
            )
        })?;

        Self::new(&base_url, config.token(), config.timeout)
    }

    /// Create a client for `base_url` with an optional bearer token.
    pub fn new(base_url: &str, token: Option<String>, timeout_secs: u64) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = token {
            let secret = SecretString::from(token);
            let mut value =
                header::HeaderValue::from_str(&format!("Bearer {}", secret.expose_secret()))
                    .map_err(|_| DeskError::Auth("API token is not a valid header value".to_string()))?;
            value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a non-success response into a structured error.
    async fn check(resp: reqwest::Response) -> Result<reqwest::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let retry_after = resp
            .headers()
            .get(header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());

        let body = resp.text().await.unwrap_or_default();
        let message = if body.is_empty() {
            status.to_string()
        } else {
            body
        };

        let mut error = ApiError::with_status(message, status);
        if let Some(seconds) = retry_after {
            error = error.with_retry_after(seconds);
        }
        Err(error.into())
    }
}

impl IssueApi for HttpApi {
    async fn get_users(&self) -> Result<Vec<User>> {
        debug!("GET /users");
        let resp = self.client.get(self.url("/users")).send().await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    async fn get_labels(&self) -> Result<Vec<Label>> {
        debug!("GET /labels");
        let resp = self.client.get(self.url("/labels")).send().await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    async fn get_milestones(&self) -> Result<Vec<Milestone>> {
        debug!("GET /milestones");
        let resp = self.client.get(self.url("/milestones")).send().await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    async fn list_issues(&self, query: &FilterQuery) -> Result<IssueListing> {
        let q = query.to_string();
        debug!(query = %q, "GET /issues");
        let mut request = self.client.get(self.url("/issues"));
        if !q.is_empty() {
            request = request.query(&[("q", q.as_str())]);
        }
        let resp = request.send().await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    async fn get_issue_detail(&self, id: i64) -> Result<IssueDetail> {
        debug!(id, "GET /issues/{{id}}");
        let resp = self
            .client
            .get(self.url(&format!("/issues/{}", id)))
            .send()
            .await?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Err(DeskError::IssueNotFound(id));
        }
        Ok(Self::check(resp).await?.json().await?)
    }

    async fn edit_issue_assignees(&self, id: i64, assignee_ids: &[i64]) -> Result<()> {
        debug!(id, ?assignee_ids, "PUT /issues/{{id}}/assignees");
        let resp = self
            .client
            .put(self.url(&format!("/issues/{}/assignees", id)))
            .json(&json!({ "assigneeIds": assignee_ids }))
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    async fn edit_issue_label(&self, id: i64, label_ids: &[i64]) -> Result<()> {
        debug!(id, ?label_ids, "PUT /issues/{{id}}/labels");
        let resp = self
            .client
            .put(self.url(&format!("/issues/{}/labels", id)))
            .json(&json!({ "labelIds": label_ids }))
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    async fn edit_issue_milestone(&self, id: i64, milestone_id: Option<i64>) -> Result<()> {
        debug!(id, ?milestone_id, "PUT /issues/{{id}}/milestone");
        let resp = self
            .client
            .put(self.url(&format!("/issues/{}/milestone", id)))
            .json(&json!({ "milestoneId": milestone_id }))
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    async fn add_comment(&self, id: i64, contents: &str) -> Result<Comment> {
        debug!(id, "POST /issues/{{id}}/comments");
        let resp = self
            .client
            .post(self.url(&format!("/issues/{}/comments", id)))
            .json(&json!({ "contents": contents }))
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    async fn upload_file(&self, name: &str, mime: &str, bytes: Vec<u8>) -> Result<UploadedFile> {
        debug!(name, mime, size = bytes.len(), "POST /file-upload");
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(name.to_string())
            .mime_str(mime)?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let resp = self
            .client
            .post(self.url("/file-upload"))
            .multipart(form)
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    async fn create_issue(&self, issue: &NewIssue) -> Result<i64> {
        debug!(title = %issue.title, "POST /issues/new");
        let resp = self
            .client
            .post(self.url("/issues/new"))
            .json(issue)
            .send()
            .await?;
        let created: CreatedIssue = Self::check(resp).await?.json().await?;
        Ok(created.id)
    }
}
