use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use issuedesk::commands::{
    CreateOptions, EditOptions, cmd_comment, cmd_config_get, cmd_config_set, cmd_config_show,
    cmd_create, cmd_edit, cmd_ls, cmd_show,
};

#[derive(Parser)]
#[command(name = "idesk")]
#[command(about = "Issue tracker client")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List issues matching a filter query
    #[command(visible_alias = "l")]
    Ls {
        /// Filter query, e.g. "status:open label:bug fix"
        query: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one issue
    #[command(visible_alias = "s")]
    Show {
        /// Issue id
        id: i64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a new issue
    #[command(visible_alias = "c")]
    Create {
        /// Issue title
        title: String,

        /// Body text
        #[arg(short, long)]
        body: Option<String>,

        /// Assignee user ids
        #[arg(short, long = "assignee")]
        assignees: Vec<i64>,

        /// Label ids
        #[arg(short, long = "label")]
        labels: Vec<i64>,

        /// Milestone id
        #[arg(short, long)]
        milestone: Option<i64>,

        /// Image files to upload and inline into the body
        #[arg(long = "attach")]
        attachments: Vec<PathBuf>,
    },

    /// Edit an issue's assignees, labels, or milestone
    Edit {
        /// Issue id
        id: i64,

        /// Replacement assignee user ids
        #[arg(short, long = "assignee")]
        assignees: Option<Vec<i64>>,

        /// Replacement label ids
        #[arg(short, long = "label")]
        labels: Option<Vec<i64>>,

        /// Replacement milestone id
        #[arg(short, long)]
        milestone: Option<i64>,

        /// Clear the milestone
        #[arg(long, conflicts_with = "milestone")]
        clear_milestone: bool,
    },

    /// Comment on an issue
    Comment {
        /// Issue id
        id: i64,

        /// Comment text
        message: String,
    },

    /// Get or set configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show all configuration
    Show,
    /// Get a value (api.url, api.token, timeout)
    Get { key: String },
    /// Set a value
    Set { key: String, value: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Ls { query, json } => cmd_ls(query.as_deref(), json).await,
        Commands::Show { id, json } => cmd_show(id, json).await,
        Commands::Create {
            title,
            body,
            assignees,
            labels,
            milestone,
            attachments,
        } => {
            cmd_create(CreateOptions {
                title,
                body,
                assignees,
                labels,
                milestone,
                attachments,
            })
            .await
        }
        Commands::Edit {
            id,
            assignees,
            labels,
            milestone,
            clear_milestone,
        } => {
            cmd_edit(
                id,
                EditOptions {
                    assignees,
                    labels,
                    milestone,
                    clear_milestone,
                },
            )
            .await
        }
        Commands::Comment { id, message } => cmd_comment(id, &message).await,
        Commands::Config { action } => match action {
            ConfigAction::Show => cmd_config_show(),
            ConfigAction::Get { key } => cmd_config_get(&key),
            ConfigAction::Set { key, value } => cmd_config_set(&key, &value),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
