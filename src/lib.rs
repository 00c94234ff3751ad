pub mod api;
pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod filter;
pub mod pages;
pub mod selection;
pub mod types;

pub use api::{ApiError, HttpApi, IssueApi, IssueListing, UploadedFile};
pub use config::Config;
pub use error::{DeskError, Result};
pub use filter::{Facet, FilterQuery, FilterToken};
pub use pages::{
    ComposePage, DetailPage, EditFacet, FileUploadStatus, ListPage, ListTab, PageLifetime, Panel,
    PanelController,
};
pub use selection::{MultiSelect, SelectionState, SingleSelect};
pub use types::{
    Comment, IssueDetail, IssueStatus, IssueSummary, Label, Milestone, NewIssue, User,
    VALID_STATUSES,
};
