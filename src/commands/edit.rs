use crate::commands::api_from_config;
use crate::error::Result;
use crate::pages::{DetailPage, EditFacet};

#[derive(Debug, Default)]
pub struct EditOptions {
    /// Replacement assignee set, when given
    pub assignees: Option<Vec<i64>>,
    /// Replacement label set, when given
    pub labels: Option<Vec<i64>>,
    /// Replacement milestone, when given
    pub milestone: Option<i64>,
    /// Clear the milestone
    pub clear_milestone: bool,
}

/// Edit an issue's facets. Each given facet is submitted independently, so a
/// failure in one leaves the others applied.
pub async fn cmd_edit(id: i64, options: EditOptions) -> Result<()> {
    let api = api_from_config()?;
    let mut page = DetailPage::load(&api, id).await?;

    if let Some(assignees) = options.assignees {
        page.selections_mut().assignees.replace(assignees);
        page.submit_facet(&api, EditFacet::Assignees).await?;
        println!("assignees updated");
    }

    if let Some(labels) = options.labels {
        page.selections_mut().labels.replace(labels);
        page.submit_facet(&api, EditFacet::Labels).await?;
        println!("labels updated");
    }

    if options.clear_milestone {
        page.selections_mut().milestone.clear();
        page.submit_facet(&api, EditFacet::Milestone).await?;
        println!("milestone cleared");
    } else if let Some(milestone) = options.milestone {
        page.selections_mut().milestone.replace(Some(milestone));
        page.submit_facet(&api, EditFacet::Milestone).await?;
        println!("milestone updated");
    }

    Ok(())
}
