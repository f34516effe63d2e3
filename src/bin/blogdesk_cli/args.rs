//! Command-line surface for `blogdesk`.

use std::path::PathBuf;

use blogdesk::config::ConfigOverrides;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "blogdesk", version, about = "Blog admin client", long_about = None)]
pub struct Cli {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "BLOGDESK_CONFIG_FILE", value_name = "PATH", global = true)]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: ConfigOverrides,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Post management
    Posts(PostsArgs),
    /// Category management
    Categories(CategoriesArgs),
    /// Tag management
    Tags(TagsArgs),
    /// Totals and most recent posts
    Dashboard,
}

#[derive(Parser, Debug)]
pub struct PostsArgs {
    #[command(subcommand)]
    pub action: PostsCmd,
}

#[derive(Subcommand, Debug)]
pub enum PostsCmd {
    /// List posts with optional filters (`all` clears a filter)
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long, value_name = "ID|all")]
        category: Option<String>,
        #[arg(long, value_name = "ID|all")]
        tag: Option<String>,
        #[arg(long, value_name = "1-12|all")]
        month: Option<String>,
        #[arg(long, value_name = "YEAR|all")]
        year: Option<String>,
        /// week, month, 3months, year, 3years, 5years or all
        #[arg(long = "time-range", value_name = "RANGE")]
        time_range: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get a post by id
    Get { id: String },
    /// Create a post
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        content_file: Option<PathBuf>,
        #[arg(long)]
        excerpt: String,
        #[arg(long = "category-id")]
        category_id: i64,
        /// Comma-separated tag ids
        #[arg(long)]
        tags: String,
    },
    /// Update selected fields of a post
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        content_file: Option<PathBuf>,
        #[arg(long)]
        excerpt: Option<String>,
        #[arg(long = "category-id")]
        category_id: Option<i64>,
        /// Comma-separated tag ids; replaces the current set
        #[arg(long)]
        tags: Option<String>,
    },
    /// Delete a post
    Delete { id: String },
}

#[derive(Parser, Debug)]
pub struct CategoriesArgs {
    #[command(subcommand)]
    pub action: CategoriesCmd,
}

#[derive(Subcommand, Debug)]
pub enum CategoriesCmd {
    /// List categories with post counts
    List,
    /// Get a category by id
    Get { id: i64 },
    /// Create a category
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
    },
    /// Replace name and description of a category
    Update {
        id: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
    },
    /// Delete a category
    Delete { id: i64 },
}

#[derive(Parser, Debug)]
pub struct TagsArgs {
    #[command(subcommand)]
    pub action: TagsCmd,
}

#[derive(Subcommand, Debug)]
pub enum TagsCmd {
    /// List tags with post counts
    List,
    /// Get a tag by id
    Get { id: i64 },
    /// Create a tag
    Create {
        #[arg(long)]
        name: String,
    },
    /// Rename a tag
    Update {
        id: i64,
        #[arg(long)]
        name: String,
    },
    /// Delete a tag
    Delete { id: i64 },
}
