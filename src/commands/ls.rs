use crate::commands::{api_from_config, print_json};
use crate::display::{issue_table, tab_line};
use crate::error::Result;
use crate::filter::FilterQuery;
use crate::pages::ListPage;

/// List issues matching a filter query string.
pub async fn cmd_ls(query: Option<&str>, output_json: bool) -> Result<()> {
    let api = api_from_config()?;

    let query = query.map(FilterQuery::parse).unwrap_or_default();
    let mut page = ListPage::new(query);
    page.load(&api).await?;

    if output_json {
        return print_json(page.listing());
    }

    println!(
        "{}",
        tab_line(page.open_count(), page.closed_count(), page.active_tab())
    );
    if page.issues().is_empty() {
        println!("no issues match '{}'", page.query());
    } else {
        println!("{}", issue_table(page.issues()));
    }

    Ok(())
}
