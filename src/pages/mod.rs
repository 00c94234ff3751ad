//! Page controllers.
//!
//! One controller per page of the tracker UI: listing, detail, composer.
//! Controllers own their page-scoped state (selections, panel flags, option
//! caches) and drive the backend through an `IssueApi`. Rendering is the
//! host's job; everything here is state and transitions.

pub mod compose;
pub mod detail;
pub mod lifetime;
pub mod list;
pub mod panel;

pub use compose::{ComposePage, FileUploadStatus, MAX_UPLOAD_BYTES};
pub use detail::{DetailPage, EditFacet};
pub use lifetime::PageLifetime;
pub use list::{ListPage, ListTab};
pub use panel::{Panel, PanelController};
