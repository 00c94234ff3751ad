use std::fs;
use std::path::{Path, PathBuf};

use crate::commands::api_from_config;
use crate::error::{DeskError, Result};
use crate::pages::ComposePage;

pub struct CreateOptions {
    pub title: String,
    pub body: Option<String>,
    pub assignees: Vec<i64>,
    pub labels: Vec<i64>,
    pub milestone: Option<i64>,
    pub attachments: Vec<PathBuf>,
}

/// Create a new issue, uploading any attachments into the body first.
pub async fn cmd_create(options: CreateOptions) -> Result<()> {
    let api = api_from_config()?;

    let mut page = ComposePage::new();
    page.set_title(options.title);
    if let Some(body) = options.body {
        page.set_body(body);
    }
    page.selections.assignees.replace(options.assignees);
    page.selections.labels.replace(options.labels);
    page.selections.milestone.replace(options.milestone);

    for path in &options.attachments {
        let name = file_name(path)?;
        let mime = guess_mime(path);
        let bytes = fs::read(path)?;

        page.attach(&api, &name, mime, bytes).await?;
    }

    let id = page.submit(&api).await?;
    println!("{}", id);
    Ok(())
}

fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| DeskError::Validation(format!("invalid attachment path: {}", path.display())))
}

/// Best-effort MIME type from the file extension. Anything unrecognized is
/// octet-stream, which the composer then rejects as a non-image.
fn guess_mime(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_mime() {
        assert_eq!(guess_mime(Path::new("shot.PNG")), "image/png");
        assert_eq!(guess_mime(Path::new("photo.jpeg")), "image/jpeg");
        assert_eq!(guess_mime(Path::new("notes.txt")), "application/octet-stream");
        assert_eq!(guess_mime(Path::new("noext")), "application/octet-stream");
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name(Path::new("dir/shot.png")).unwrap(), "shot.png");
    }
}
