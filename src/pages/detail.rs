//! Issue detail page controller.
//!
//! Loads one issue's full record and lets the user edit its assignees,
//! labels, and milestone. Each facet submits the entire current selection in
//! its own request; there is no cross-facet transaction. A failed submit
//! reverts the local selection to the last server-confirmed state instead of
//! leaving the client silently diverged.

use std::fmt;

use tracing::warn;

use crate::api::IssueApi;
use crate::error::Result;
use crate::pages::lifetime::PageLifetime;
use crate::selection::SelectionState;
use crate::types::{Comment, IssueDetail};

/// One editable facet of the detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditFacet {
    Assignees,
    Labels,
    Milestone,
}

impl fmt::Display for EditFacet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditFacet::Assignees => write!(f, "assignees"),
            EditFacet::Labels => write!(f, "labels"),
            EditFacet::Milestone => write!(f, "milestone"),
        }
    }
}

#[derive(Debug)]
pub struct DetailPage {
    detail: IssueDetail,
    selections: SelectionState,
    /// Last selection state the server acknowledged, per facet.
    confirmed: SelectionState,
    pub lifetime: PageLifetime,
}

impl DetailPage {
    /// Fetch the issue and seed the selection state from its record.
    pub async fn load(api: &impl IssueApi, id: i64) -> Result<Self> {
        let detail = api.get_issue_detail(id).await?;
        Ok(Self::from_detail(detail))
    }

    pub fn from_detail(detail: IssueDetail) -> Self {
        let mut selections = SelectionState::new();
        selections
            .assignees
            .replace(detail.assignees.iter().map(|u| u.user_id).collect());
        selections
            .labels
            .replace(detail.labels.iter().map(|l| l.id).collect());
        selections
            .milestone
            .replace(detail.milestone.as_ref().map(|m| m.id));

        let confirmed = selections.clone();
        Self {
            detail,
            selections,
            confirmed,
            lifetime: PageLifetime::new(),
        }
    }

    pub fn detail(&self) -> &IssueDetail {
        &self.detail
    }

    pub fn selections(&self) -> &SelectionState {
        &self.selections
    }

    pub fn selections_mut(&mut self) -> &mut SelectionState {
        &mut self.selections
    }

    pub fn toggle_assignee(&mut self, user_id: i64) {
        self.selections.assignees.toggle(user_id);
    }

    pub fn toggle_label(&mut self, label_id: i64) {
        self.selections.labels.toggle(label_id);
    }

    pub fn toggle_milestone(&mut self, milestone_id: i64) {
        self.selections.milestone.toggle(milestone_id);
    }

    /// Whether the local selection for a facet differs from the last
    /// server-confirmed state.
    pub fn has_unsubmitted(&self, facet: EditFacet) -> bool {
        match facet {
            EditFacet::Assignees => self.selections.assignees != self.confirmed.assignees,
            EditFacet::Labels => self.selections.labels != self.confirmed.labels,
            EditFacet::Milestone => self.selections.milestone != self.confirmed.milestone,
        }
    }

    /// Send the entire current selection for one facet to the server.
    ///
    /// On success the confirmed snapshot advances; on failure the local
    /// selection rolls back to it and the error propagates.
    pub async fn submit_facet(&mut self, api: &impl IssueApi, facet: EditFacet) -> Result<()> {
        let id = self.detail.id;

        let result = match facet {
            EditFacet::Assignees => {
                self.lifetime
                    .scoped(api.edit_issue_assignees(id, self.selections.assignees.ids()))
                    .await
            }
            EditFacet::Labels => {
                self.lifetime
                    .scoped(api.edit_issue_label(id, self.selections.labels.ids()))
                    .await
            }
            EditFacet::Milestone => {
                self.lifetime
                    .scoped(api.edit_issue_milestone(id, self.selections.milestone.selected()))
                    .await
            }
        };

        match result {
            Ok(()) => {
                match facet {
                    EditFacet::Assignees => {
                        self.confirmed.assignees = self.selections.assignees.clone();
                    }
                    EditFacet::Labels => self.confirmed.labels = self.selections.labels.clone(),
                    EditFacet::Milestone => self.confirmed.milestone = self.selections.milestone,
                }
                Ok(())
            }
            Err(e) => {
                warn!(issue = id, %facet, error = %e, "facet edit failed, reverting selection");
                match facet {
                    EditFacet::Assignees => {
                        self.selections.assignees = self.confirmed.assignees.clone();
                    }
                    EditFacet::Labels => self.selections.labels = self.confirmed.labels.clone(),
                    EditFacet::Milestone => self.selections.milestone = self.confirmed.milestone,
                }
                Err(e)
            }
        }
    }

    /// Append a comment that the server already accepted. Order preserved,
    /// existing comments untouched.
    pub fn add_comment(&mut self, comment: Comment) {
        self.detail.comments.push(comment);
    }
}
