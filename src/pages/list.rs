//! Issue list page controller.
//!
//! Owns the committed filter query (the page's single source of truth),
//! the fetched listing with its open/closed counts, and the dropdown panel
//! controller. Filter edits are pure query transforms followed by a reload.

use crate::api::{IssueApi, IssueListing};
use crate::error::Result;
use crate::filter::{Facet, FilterQuery, FilterToken};
use crate::pages::lifetime::PageLifetime;
use crate::pages::panel::PanelController;
use crate::types::{IssueStatus, IssueSummary};

/// Which listing tab is active, derived from the query's status token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListTab {
    #[default]
    Open,
    Closed,
}

impl ListTab {
    pub fn status(self) -> IssueStatus {
        match self {
            ListTab::Open => IssueStatus::Open,
            ListTab::Closed => IssueStatus::Closed,
        }
    }
}

#[derive(Debug)]
pub struct ListPage {
    query: FilterQuery,
    listing: IssueListing,
    pub panels: PanelController,
    pub lifetime: PageLifetime,
}

impl ListPage {
    pub fn new(query: FilterQuery) -> Self {
        Self {
            query,
            listing: IssueListing::default(),
            panels: PanelController::new(),
            lifetime: PageLifetime::new(),
        }
    }

    pub fn query(&self) -> &FilterQuery {
        &self.query
    }

    pub fn listing(&self) -> &IssueListing {
        &self.listing
    }

    pub fn issues(&self) -> &[IssueSummary] {
        &self.listing.issues
    }

    pub fn open_count(&self) -> u64 {
        self.listing.open_count
    }

    pub fn closed_count(&self) -> u64 {
        self.listing.closed_count
    }

    /// The empty query and an exact `status:open` token both select the open
    /// tab; only an exact `status:closed` token selects the closed one.
    pub fn active_tab(&self) -> ListTab {
        match self.query.status() {
            Some(IssueStatus::Closed) => ListTab::Closed,
            _ => ListTab::Open,
        }
    }

    /// Fetch the listing for the current query.
    pub async fn load(&mut self, api: &impl IssueApi) -> Result<()> {
        let listing = self.lifetime.scoped(api.list_issues(&self.query)).await?;
        self.listing = listing;
        Ok(())
    }

    /// Toggle a filter token and reload.
    pub async fn toggle_filter(&mut self, api: &impl IssueApi, token: FilterToken) -> Result<()> {
        self.query = self.query.toggle(token);
        self.load(api).await
    }

    /// Switch the open/closed tab by replacing the status token and reload.
    pub async fn select_tab(&mut self, api: &impl IssueApi, tab: ListTab) -> Result<()> {
        self.query = self
            .query
            .with_token(FilterToken::new(Facet::Status, tab.status().to_string()));
        self.load(api).await
    }

    /// Replace the whole query (address-bar navigation) and reload.
    pub async fn apply_query(&mut self, api: &impl IssueApi, query: FilterQuery) -> Result<()> {
        self.query = query;
        self.load(api).await
    }
}
