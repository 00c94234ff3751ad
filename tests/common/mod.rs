//! In-memory backend fake shared by the integration tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use issuedesk::api::{IssueApi, IssueListing, UploadedFile};
use issuedesk::error::{DeskError, Result};
use issuedesk::filter::{Facet, FilterQuery};
use issuedesk::types::{
    Comment, IssueDetail, IssueStatus, IssueSummary, Label, Milestone, NewIssue, User,
};

pub fn user(id: i64, login: &str) -> User {
    User {
        user_id: id,
        login_id: login.to_string(),
        image: format!("http://img/{}.png", id),
    }
}

pub fn label(id: i64, name: &str) -> Label {
    Label {
        id,
        name: name.to_string(),
        text_color: "#ffffff".to_string(),
        background_color: "#d73a4a".to_string(),
    }
}

pub fn milestone(id: i64, name: &str) -> Milestone {
    Milestone {
        id,
        name: name.to_string(),
        progress: 50,
    }
}

pub fn issue(id: i64, title: &str, status: IssueStatus) -> IssueDetail {
    IssueDetail {
        id,
        title: title.to_string(),
        contents: String::new(),
        status,
        created_at: "2024-05-01T10:00:00Z".to_string(),
        author: user(1, "bono"),
        assignees: vec![],
        labels: vec![],
        milestone: None,
        comments: vec![],
    }
}

/// Scriptable in-memory `IssueApi`. Records every call and can be told to
/// fail specific operations.
#[derive(Default)]
pub struct FakeApi {
    pub users: Vec<User>,
    pub labels: Vec<Label>,
    pub milestones: Vec<Milestone>,
    pub issues: Mutex<HashMap<i64, IssueDetail>>,
    pub calls: Mutex<Vec<String>>,
    pub failing: Mutex<Vec<&'static str>>,
    next_id: AtomicI64,
}

impl FakeApi {
    pub fn new() -> Self {
        let mut issues = HashMap::new();
        issues.insert(1, issue(1, "login broken", IssueStatus::Open));
        issues.insert(2, issue(2, "dark mode", IssueStatus::Open));
        issues.insert(3, issue(3, "old crash", IssueStatus::Closed));

        Self {
            users: vec![user(1, "bono"), user(2, "jian"), user(3, "khundi")],
            labels: vec![label(10, "bug"), label(11, "feat")],
            milestones: vec![milestone(20, "v1"), milestone(21, "v2")],
            issues: Mutex::new(issues),
            next_id: AtomicI64::new(100),
            ..Self::default()
        }
    }

    /// Make the named operation fail with an API error.
    pub fn fail_on(&self, op: &'static str) {
        self.failing.lock().unwrap().push(op);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, op: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(op))
            .count()
    }

    fn record(&self, call: String, op: &'static str) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if self.failing.lock().unwrap().contains(&op) {
            return Err(DeskError::Api(format!("{} failed", op)));
        }
        Ok(())
    }

    fn summary(detail: &IssueDetail) -> IssueSummary {
        IssueSummary {
            id: detail.id,
            title: detail.title.clone(),
            status: detail.status,
            author: detail.author.login_id.clone(),
            labels: detail.labels.iter().map(|l| l.name.clone()).collect(),
            milestone: detail.milestone.as_ref().map(|m| m.name.clone()),
            created_at: detail.created_at.clone(),
        }
    }
}

impl IssueApi for FakeApi {
    async fn get_users(&self) -> Result<Vec<User>> {
        self.record("get_users".to_string(), "get_users")?;
        Ok(self.users.clone())
    }

    async fn get_labels(&self) -> Result<Vec<Label>> {
        self.record("get_labels".to_string(), "get_labels")?;
        Ok(self.labels.clone())
    }

    async fn get_milestones(&self) -> Result<Vec<Milestone>> {
        self.record("get_milestones".to_string(), "get_milestones")?;
        Ok(self.milestones.clone())
    }

    async fn list_issues(&self, query: &FilterQuery) -> Result<IssueListing> {
        self.record(format!("list_issues q='{}'", query), "list_issues")?;

        let issues = self.issues.lock().unwrap();
        let matches_facets = |detail: &IssueDetail| {
            query
                .values(Facet::Assignee)
                .iter()
                .all(|name| detail.assignees.iter().any(|u| u.login_id == *name))
                && query
                    .values(Facet::Label)
                    .iter()
                    .all(|name| detail.labels.iter().any(|l| l.name == *name))
                && query
                    .value(Facet::Milestone)
                    .is_none_or(|name| detail.milestone.as_ref().is_some_and(|m| m.name == name))
                && query
                    .value(Facet::Author)
                    .is_none_or(|name| detail.author.login_id == name)
                && query
                    .search_terms()
                    .iter()
                    .all(|term| detail.title.contains(term))
        };

        let mut by_facet: Vec<&IssueDetail> =
            issues.values().filter(|d| matches_facets(d)).collect();
        by_facet.sort_by_key(|d| d.id);

        let open_count = by_facet
            .iter()
            .filter(|d| d.status == IssueStatus::Open)
            .count() as u64;
        let closed_count = by_facet.len() as u64 - open_count;

        let rows = by_facet
            .into_iter()
            .filter(|d| query.status().is_none_or(|s| d.status == s))
            .map(Self::summary)
            .collect();

        Ok(IssueListing {
            open_count,
            closed_count,
            issues: rows,
        })
    }

    async fn get_issue_detail(&self, id: i64) -> Result<IssueDetail> {
        self.record(format!("get_issue_detail {}", id), "get_issue_detail")?;
        self.issues
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(DeskError::IssueNotFound(id))
    }

    async fn edit_issue_assignees(&self, id: i64, assignee_ids: &[i64]) -> Result<()> {
        self.record(
            format!("edit_issue_assignees {} {:?}", id, assignee_ids),
            "edit_issue_assignees",
        )?;
        let mut issues = self.issues.lock().unwrap();
        let detail = issues.get_mut(&id).ok_or(DeskError::IssueNotFound(id))?;
        detail.assignees = assignee_ids
            .iter()
            .map(|&uid| user(uid, &format!("user{}", uid)))
            .collect();
        Ok(())
    }

    async fn edit_issue_label(&self, id: i64, label_ids: &[i64]) -> Result<()> {
        self.record(
            format!("edit_issue_label {} {:?}", id, label_ids),
            "edit_issue_label",
        )?;
        let mut issues = self.issues.lock().unwrap();
        let detail = issues.get_mut(&id).ok_or(DeskError::IssueNotFound(id))?;
        detail.labels = label_ids
            .iter()
            .map(|&lid| label(lid, &format!("label{}", lid)))
            .collect();
        Ok(())
    }

    async fn edit_issue_milestone(&self, id: i64, milestone_id: Option<i64>) -> Result<()> {
        self.record(
            format!("edit_issue_milestone {} {:?}", id, milestone_id),
            "edit_issue_milestone",
        )?;
        let mut issues = self.issues.lock().unwrap();
        let detail = issues.get_mut(&id).ok_or(DeskError::IssueNotFound(id))?;
        detail.milestone = milestone_id.map(|mid| milestone(mid, &format!("m{}", mid)));
        Ok(())
    }

    async fn add_comment(&self, id: i64, contents: &str) -> Result<Comment> {
        self.record(format!("add_comment {}", id), "add_comment")?;
        let comment = Comment {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            author: user(1, "bono"),
            contents: contents.to_string(),
            created_at: "2024-05-02T09:00:00Z".to_string(),
        };
        let mut issues = self.issues.lock().unwrap();
        let detail = issues.get_mut(&id).ok_or(DeskError::IssueNotFound(id))?;
        detail.comments.push(comment.clone());
        Ok(comment)
    }

    async fn upload_file(&self, name: &str, mime: &str, bytes: Vec<u8>) -> Result<UploadedFile> {
        self.record(
            format!("upload_file {} {} {}b", name, mime, bytes.len()),
            "upload_file",
        )?;
        Ok(UploadedFile {
            file_url: format!("http://files/{}", name),
        })
    }

    async fn create_issue(&self, new_issue: &NewIssue) -> Result<i64> {
        self.record(
            format!(
                "create_issue '{}' author={} assignees={:?} labels={:?} milestone={:?}",
                new_issue.title,
                new_issue.author_id,
                new_issue.assignee_ids,
                new_issue.label_ids,
                new_issue.milestone_id
            ),
            "create_issue",
        )?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut detail = issue(id, &new_issue.title, IssueStatus::Open);
        detail.contents = new_issue.contents.clone();
        self.issues.lock().unwrap().insert(id, detail);
        Ok(id)
    }
}
