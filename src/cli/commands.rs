use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "atrium")]
#[command(version, about = "Personal assistant dashboard, from the terminal")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize an atrium workspace in the current directory
    Init,

    /// Add a new item
    Add(AddCommand),

    /// List items of one kind (tasks, emails, transactions, notifications, chats)
    List {
        /// Kind to list (defaults to tasks)
        #[arg(value_name = "KIND")]
        kind: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single item by id prefix
    Get {
        /// Id prefix (any kind)
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Update a task's fields
    Update {
        /// Task id prefix
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description ("none" to clear)
        #[arg(long)]
        description: Option<String>,

        /// New status (todo, in-progress, completed, cancelled)
        #[arg(long)]
        status: Option<String>,

        /// New priority (low, medium, high, urgent)
        #[arg(long)]
        priority: Option<String>,

        /// New category (personal, work, health, finance, learning, other)
        #[arg(long)]
        category: Option<String>,

        /// New due date YYYY-MM-DD ("none" to clear)
        #[arg(long)]
        due: Option<String>,

        /// Tags to add (can be specified multiple times)
        #[arg(long = "tag", short = 't')]
        tags: Vec<String>,

        /// Tags to remove (can be specified multiple times)
        #[arg(long = "remove-tag")]
        remove_tags: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Toggle a task between completed and todo
    Done {
        /// Task id prefix
        id: String,
    },

    /// Delete an item by id prefix
    Delete {
        /// Id prefix (any kind)
        id: String,

        /// Skip the confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Search tasks with filters (status:todo priority:high tag:x due:<YYYY-MM-DD text)
    Search {
        /// Query string
        #[arg(trailing_var_arg = true)]
        query: Vec<String>,

        /// Sort field (title, priority, due, created, updated)
        #[arg(long, default_value = "due")]
        sort: String,

        /// Sort order (asc, desc)
        #[arg(long, default_value = "asc")]
        order: String,

        /// Maximum number of results
        #[arg(long)]
        limit: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mark an email as read
    Read {
        /// Email id prefix
        id: String,
    },

    /// Dashboard summary across all stores
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render the markdown daily brief
    Digest,

    /// Set the UI theme preference (light, dark, system)
    Theme {
        value: String,
    },
}

#[derive(Args, Debug)]
pub struct AddCommand {
    #[command(subcommand)]
    pub entity: AddEntity,
}

#[derive(Subcommand, Debug)]
pub enum AddEntity {
    /// Add a task
    Task {
        /// Task title
        title: String,

        /// Status (todo, in-progress, completed, cancelled)
        #[arg(long, default_value = "todo")]
        status: String,

        /// Priority (low, medium, high, urgent)
        #[arg(long, default_value = "medium")]
        priority: String,

        /// Category (personal, work, health, finance, learning, other)
        #[arg(long, default_value = "personal")]
        category: String,

        /// Due date YYYY-MM-DD
        #[arg(long)]
        due: Option<String>,

        /// Tags (can be specified multiple times)
        #[arg(long = "tag", short = 't')]
        tags: Vec<String>,

        /// Read the description from stdin
        #[arg(long)]
        stdin: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add an email summary
    Email {
        /// Subject line
        subject: String,

        /// Sender ("Name <addr>" or a bare address)
        #[arg(long)]
        from: String,

        /// Importance (low, medium, high)
        #[arg(long, default_value = "medium")]
        importance: String,

        /// Category (work, personal, finance, shopping, social, promotions, spam)
        #[arg(long, default_value = "personal")]
        category: String,

        /// Flag the email as needing action
        #[arg(long)]
        action_required: bool,

        /// Summary text
        #[arg(long)]
        summary: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a transaction
    Tx {
        /// Description
        description: String,

        /// Amount (non-negative)
        amount: f64,

        /// Type (income, expense)
        #[arg(long, default_value = "expense")]
        kind: String,

        /// Category (food, transport, ..., other)
        #[arg(long, default_value = "other")]
        category: String,

        /// Currency code
        #[arg(long, default_value = "USD")]
        currency: String,

        /// Account name
        #[arg(long)]
        account: Option<String>,

        /// Mark as recurring
        #[arg(long)]
        recurring: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a notification
    Notification {
        /// Title
        title: String,

        /// Body text
        message: String,

        /// Type (task, email, finance, security, system, reminder)
        #[arg(long, default_value = "system")]
        kind: String,

        /// Priority (low, medium, high)
        #[arg(long, default_value = "medium")]
        priority: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
