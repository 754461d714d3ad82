use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use learnlog_core::VERSION;

/// Learnlog - a learning journal that keeps working when its backend is down
#[derive(Parser)]
#[command(name = "learnlog")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Backend base URL
    #[arg(long, global = true, env = "LEARNLOG_URL")]
    pub url: Option<String>,

    /// Path to the offline snapshot file
    #[arg(long, global = true, env = "LEARNLOG_OFFLINE_PATH")]
    pub offline_path: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log requests and fallbacks to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use ASCII symbols only
    #[arg(long, global = true)]
    pub ascii: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a config file
    Init(InitArgs),

    /// Add a new entry
    Add(AddArgs),

    /// Edit an existing entry
    Edit(EditArgs),

    /// Delete an entry
    #[command(alias = "rm")]
    Delete(DeleteArgs),

    /// List entries, newest first
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show a single entry
    Show(ShowArgs),

    /// Show connection mode, backend, snapshot, and session
    Status(StatusArgs),

    /// Probe the backend again and leave offline mode if it answers
    Retry,

    /// Push entries created offline to the backend
    Publish(PublishArgs),

    /// Log in to the backend
    Login(LoginArgs),

    /// Create an account on the backend
    Register(RegisterArgs),

    /// Forget the stored session
    Logout,

    /// Show the logged-in user
    Whoami(WhoamiArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Backend base URL to store in the config
    #[arg(long = "remote-url", value_name = "URL")]
    pub remote_url: Option<String>,

    /// Request timeout in seconds (3-8)
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Require login for entry commands
    #[arg(long)]
    pub auth: bool,

    /// Offline snapshot location to store in the config
    #[arg(long = "snapshot", value_name = "PATH")]
    pub snapshot: Option<String>,

    /// Display timezone (IANA name, e.g. Europe/Berlin)
    #[arg(long)]
    pub timezone: Option<String>,

    /// Default editor command
    #[arg(long)]
    pub editor: Option<String>,

    /// Overwrite an existing config
    #[arg(long)]
    pub force: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Entry title
    #[arg(value_name = "TITLE")]
    pub title: Option<String>,

    /// Entry content (overrides stdin/editor)
    #[arg(long, alias = "body")]
    pub content: Option<String>,

    /// Tags (repeatable, or comma separated)
    #[arg(short, long, value_name = "TAG")]
    pub tag: Vec<String>,

    /// Entry date (YYYY-MM-DD or ISO-8601), defaults to today
    #[arg(long)]
    pub date: Option<String>,

    /// Image URL or path to an image file
    #[arg(long, value_name = "URL_OR_PATH")]
    pub image: Option<String>,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `edit` command
#[derive(Args)]
pub struct EditArgs {
    /// Entry ID (full or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New content (overrides stdin/editor)
    #[arg(long, alias = "body")]
    pub content: Option<String>,

    /// Replace tags (repeatable, or comma separated)
    #[arg(short, long, value_name = "TAG")]
    pub tag: Vec<String>,

    /// Remove all tags
    #[arg(long, conflicts_with = "tag")]
    pub clear_tags: bool,

    /// New entry date (YYYY-MM-DD or ISO-8601)
    #[arg(long)]
    pub date: Option<String>,

    /// New image URL or path to an image file
    #[arg(long, value_name = "URL_OR_PATH")]
    pub image: Option<String>,

    /// Remove the image reference
    #[arg(long, conflicts_with = "image")]
    pub clear_image: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Entry ID (full or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Filter by tag
    #[arg(long)]
    pub tag: Option<String>,

    /// Start date (YYYY-MM-DD or ISO-8601)
    #[arg(long)]
    pub since: Option<String>,

    /// End date (YYYY-MM-DD or ISO-8601)
    #[arg(long)]
    pub until: Option<String>,

    /// Limit number of results
    #[arg(long)]
    pub limit: Option<usize>,

    /// Show every matching entry
    #[arg(long, conflicts_with = "limit")]
    pub all: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Entry ID (full or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `status` command
#[derive(Args)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `publish` command
#[derive(Args)]
pub struct PublishArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `login` command
#[derive(Args)]
pub struct LoginArgs {
    /// Account email
    #[arg(long)]
    pub email: Option<String>,

    /// Disable interactive prompts (password from LEARNLOG_PASSWORD)
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `register` command
#[derive(Args)]
pub struct RegisterArgs {
    /// Display name
    #[arg(long)]
    pub username: Option<String>,

    /// Account email
    #[arg(long)]
    pub email: Option<String>,

    /// Disable interactive prompts (password from LEARNLOG_PASSWORD)
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `whoami` command
#[derive(Args)]
pub struct WhoamiArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}
