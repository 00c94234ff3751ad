//! Terminal output formatting for the CLI.

use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::pages::ListTab;
use crate::types::{IssueDetail, IssueStatus, IssueSummary};

/// A row in the issue listing table
#[derive(Tabled)]
struct IssueRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "Labels")]
    labels: String,
    #[tabled(rename = "Milestone")]
    milestone: String,
}

pub fn colored_status(status: IssueStatus) -> String {
    match status {
        IssueStatus::Open => status.to_string().green().to_string(),
        IssueStatus::Closed => status.to_string().purple().to_string(),
    }
}

/// Render the listing as a table.
pub fn issue_table(issues: &[IssueSummary]) -> String {
    let rows: Vec<IssueRow> = issues
        .iter()
        .map(|issue| IssueRow {
            id: issue.id,
            status: colored_status(issue.status),
            title: issue.title.clone(),
            author: issue.author.clone(),
            labels: issue.labels.join(", "),
            milestone: issue.milestone.clone().unwrap_or_default(),
        })
        .collect();

    Table::new(rows).with(Style::sharp()).to_string()
}

/// Render the open/closed tab line, bolding the active tab.
pub fn tab_line(open_count: u64, closed_count: u64, active: ListTab) -> String {
    let open = format!("open ({})", open_count);
    let closed = format!("closed ({})", closed_count);
    match active {
        ListTab::Open => format!("{}  {}", open.bold(), closed.dimmed()),
        ListTab::Closed => format!("{}  {}", open.dimmed(), closed.bold()),
    }
}

/// Render one issue's full record.
pub fn issue_detail(detail: &IssueDetail) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "#{} {} [{}]\n",
        detail.id,
        detail.title.bold(),
        colored_status(detail.status)
    ));
    out.push_str(&format!(
        "by {} at {}\n",
        detail.author.login_id, detail.created_at
    ));

    if !detail.assignees.is_empty() {
        let names: Vec<&str> = detail
            .assignees
            .iter()
            .map(|u| u.login_id.as_str())
            .collect();
        out.push_str(&format!("assignees: {}\n", names.join(", ")));
    }
    if !detail.labels.is_empty() {
        let names: Vec<&str> = detail.labels.iter().map(|l| l.name.as_str()).collect();
        out.push_str(&format!("labels: {}\n", names.join(", ")));
    }
    if let Some(milestone) = &detail.milestone {
        out.push_str(&format!(
            "milestone: {} ({}%)\n",
            milestone.name, milestone.progress
        ));
    }

    if !detail.contents.is_empty() {
        out.push('\n');
        out.push_str(&detail.contents);
        out.push('\n');
    }

    for comment in &detail.comments {
        out.push_str(&format!(
            "\n{} commented at {}:\n{}\n",
            comment.author.login_id, comment.created_at, comment.contents
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Comment, User};

    #[test]
    fn test_issue_table_includes_rows() {
        let issues = vec![IssueSummary {
            id: 3,
            title: "broken build".to_string(),
            status: IssueStatus::Open,
            author: "bono".to_string(),
            labels: vec!["bug".to_string(), "ci".to_string()],
            milestone: Some("v1".to_string()),
            created_at: "2024-05-01T10:00:00Z".to_string(),
        }];

        let table = issue_table(&issues);
        assert!(table.contains("broken build"));
        assert!(table.contains("bug, ci"));
        assert!(table.contains("v1"));
    }

    #[test]
    fn test_detail_lists_comments_in_order() {
        let author = User {
            user_id: 1,
            login_id: "bono".to_string(),
            image: String::new(),
        };
        let comment = |id, contents: &str| Comment {
            id,
            author: author.clone(),
            contents: contents.to_string(),
            created_at: "2024-05-02T09:00:00Z".to_string(),
        };
        let comments = vec![comment(10, "first"), comment(11, "second")];
        let detail = IssueDetail {
            id: 1,
            title: "t".to_string(),
            contents: "body".to_string(),
            status: IssueStatus::Closed,
            created_at: "2024-05-01T10:00:00Z".to_string(),
            author,
            assignees: vec![],
            labels: vec![],
            milestone: None,
            comments,
        };

        let out = issue_detail(&detail);
        assert!(out.contains("#1"));
        assert!(out.contains("body"));
        let first = out.find("first").unwrap();
        let second = out.find("second").unwrap();
        assert!(first < second);
    }
}
