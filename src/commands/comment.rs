use crate::api::IssueApi;
use crate::commands::api_from_config;
use crate::error::Result;
use crate::pages::DetailPage;

/// Add a comment to an issue.
pub async fn cmd_comment(id: i64, message: &str) -> Result<()> {
    let api = api_from_config()?;
    let mut page = DetailPage::load(&api, id).await?;

    let comment = api.add_comment(id, message).await?;
    page.add_comment(comment);

    println!("comment added ({} total)", page.detail().comments.len());
    Ok(())
}
