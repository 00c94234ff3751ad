use crate::commands::{api_from_config, print_json};
use crate::display::issue_detail;
use crate::error::Result;
use crate::pages::DetailPage;

/// Show one issue's full record.
pub async fn cmd_show(id: i64, output_json: bool) -> Result<()> {
    let api = api_from_config()?;
    let page = DetailPage::load(&api, id).await?;

    if output_json {
        return print_json(page.detail());
    }

    print!("{}", issue_detail(page.detail()));
    Ok(())
}
