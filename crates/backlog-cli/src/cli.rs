use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "backlog")]
#[command(about = "Reorder backlog items and move them onto boards", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Base URL of the backlog API (or set BACKLOG_API_URL)
    #[arg(long, value_name = "URL", env = "BACKLOG_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Bearer token sent with every request (or set BACKLOG_API_TOKEN)
    #[arg(long, value_name = "TOKEN", env = "BACKLOG_API_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Config file to use instead of the platform default
    #[arg(long, value_name = "FILE", env = "BACKLOG_CONFIG", global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List backlog items in order
    List(ListArgs),
    /// List boards items can be moved into
    Boards {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Drop one item onto another item's position
    Move {
        /// Item being dragged
        #[arg(long)]
        item: String,
        /// Item whose position it takes
        #[arg(long)]
        onto: String,
    },
    /// Move selected items into an existing board
    Convert {
        #[arg(long, value_delimiter = ',')]
        items: Vec<String>,
        #[arg(long)]
        board: Option<String>,
    },
    /// Start this week's board from the selected items
    Weekly {
        #[arg(long, value_delimiter = ',')]
        items: Vec<String>,
        /// Base title; the server decides the final name
        #[arg(long)]
        title: Option<String>,
    },
    /// Add a backlog item
    Add(AddArgs),
    /// Edit a backlog item
    Edit(EditArgs),
    /// Delete a backlog item
    Remove {
        #[arg(long)]
        id: String,
    },
}

#[derive(Args)]
pub struct ListArgs {
    #[arg(long)]
    pub search: Option<String>,
    /// high, medium or low
    #[arg(long)]
    pub priority: Option<String>,
}

#[derive(Args)]
pub struct AddArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long, default_value = "medium")]
    pub priority: String,
    #[arg(long)]
    pub points: Option<u32>,
}

#[derive(Args)]
pub struct EditArgs {
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub priority: Option<String>,
    #[arg(long, conflicts_with = "clear_points")]
    pub points: Option<u32>,
    #[arg(long)]
    pub clear_points: bool,
}
