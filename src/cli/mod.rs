pub mod commands;
pub mod handlers;

pub use commands::{AddCommand, AddEntity, Cli, Commands};
pub use handlers::{
    handle_add_email, handle_add_notification, handle_add_task, handle_add_tx, handle_delete,
    handle_digest, handle_done, handle_get, handle_init, handle_list, handle_read, handle_search,
    handle_stats, handle_theme, handle_update,
};
