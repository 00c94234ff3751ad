//! Dropdown panel controller for the list page filter bar.
//!
//! Four panels (assignees, label, milestone, author) share one invariant: at
//! most one is open at a time. Each panel's option list is fetched from the
//! backend on first open and cached with a fetch timestamp, so a long-lived
//! page refetches instead of showing stale options forever. The assignee and
//! author panels share the user list.

use std::fmt;

use jiff::{SignedDuration, Timestamp};
use tracing::debug;

use crate::api::IssueApi;
use crate::error::Result;
use crate::types::{Label, Milestone, User};

/// Default maximum age of a cached option list.
pub const DEFAULT_OPTIONS_MAX_AGE: SignedDuration = SignedDuration::from_secs(5 * 60);

/// One dropdown filter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Assignees,
    Label,
    Milestone,
    Author,
}

impl Panel {
    pub const ALL: &[Panel] = &[Panel::Assignees, Panel::Label, Panel::Milestone, Panel::Author];
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Panel::Assignees => write!(f, "assignees"),
            Panel::Label => write!(f, "label"),
            Panel::Milestone => write!(f, "milestone"),
            Panel::Author => write!(f, "author"),
        }
    }
}

/// Cached option list with a fetch timestamp.
#[derive(Debug, Clone)]
struct OptionCache<T> {
    items: Vec<T>,
    fetched_at: Option<Timestamp>,
}

impl<T> Default for OptionCache<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            fetched_at: None,
        }
    }
}

impl<T> OptionCache<T> {
    fn needs_fetch(&self, now: Timestamp, max_age: SignedDuration) -> bool {
        match self.fetched_at {
            None => true,
            Some(at) => now.duration_since(at) > max_age,
        }
    }

    fn set(&mut self, items: Vec<T>, now: Timestamp) {
        self.items = items;
        self.fetched_at = Some(now);
    }

    fn invalidate(&mut self) {
        self.fetched_at = None;
    }
}

/// Tracks which panel is open and owns the option-list caches.
#[derive(Debug, Default)]
pub struct PanelController {
    open: Option<Panel>,
    users: OptionCache<User>,
    labels: OptionCache<Label>,
    milestones: OptionCache<Milestone>,
    max_age: Option<SignedDuration>,
}

impl PanelController {
    pub fn new() -> Self {
        Self {
            max_age: Some(DEFAULT_OPTIONS_MAX_AGE),
            ..Self::default()
        }
    }

    /// Override the option-list max age. `None` disables staleness refetch.
    pub fn with_max_age(mut self, max_age: Option<SignedDuration>) -> Self {
        self.max_age = max_age;
        self
    }

    pub fn is_open(&self, panel: Panel) -> bool {
        self.open == Some(panel)
    }

    pub fn open_panel(&self) -> Option<Panel> {
        self.open
    }

    /// Open `panel`, closing any other, and make sure its option list is
    /// loaded. The list is fetched only when never loaded or stale.
    pub async fn open(&mut self, panel: Panel, api: &impl IssueApi) -> Result<()> {
        self.open = Some(panel);
        if let Err(e) = self.ensure_options(panel, api).await {
            // A panel with no options is useless, close it again.
            self.close(panel);
            return Err(e);
        }
        Ok(())
    }

    /// Outside-click signal: closes that one panel, leaves any other alone.
    pub fn close(&mut self, panel: Panel) {
        if self.open == Some(panel) {
            self.open = None;
        }
    }

    /// Drop the cached options of a panel so the next open refetches.
    pub fn invalidate(&mut self, panel: Panel) {
        match panel {
            Panel::Assignees | Panel::Author => self.users.invalidate(),
            Panel::Label => self.labels.invalidate(),
            Panel::Milestone => self.milestones.invalidate(),
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users.items
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels.items
    }

    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones.items
    }

    async fn ensure_options(&mut self, panel: Panel, api: &impl IssueApi) -> Result<()> {
        let now = Timestamp::now();
        let max_age = self.max_age.unwrap_or(SignedDuration::MAX);

        match panel {
            Panel::Assignees | Panel::Author => {
                if self.users.needs_fetch(now, max_age) {
                    debug!(%panel, "fetching user options");
                    let users = api.get_users().await?;
                    self.users.set(users, now);
                }
            }
            Panel::Label => {
                if self.labels.needs_fetch(now, max_age) {
                    debug!(%panel, "fetching label options");
                    let labels = api.get_labels().await?;
                    self.labels.set(labels, now);
                }
            }
            Panel::Milestone => {
                if self.milestones.needs_fetch(now, max_age) {
                    debug!(%panel, "fetching milestone options");
                    let milestones = api.get_milestones().await?;
                    self.milestones.set(milestones, now);
                }
            }
        }

        Ok(())
    }
}
