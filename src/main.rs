use clap::Parser;

use atrium::cli::{
    handle_add_email, handle_add_notification, handle_add_task, handle_add_tx, handle_delete,
    handle_digest, handle_done, handle_get, handle_init, handle_list, handle_read, handle_search,
    handle_stats, handle_theme, handle_update, AddEntity, Cli, Commands,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => handle_init(),
        Commands::Add(add) => match add.entity {
            AddEntity::Task {
                title,
                status,
                priority,
                category,
                due,
                tags,
                stdin,
                json,
            } => handle_add_task(title, status, priority, category, due, tags, stdin, json),
            AddEntity::Email {
                subject,
                from,
                importance,
                category,
                action_required,
                summary,
                json,
            } => handle_add_email(subject, from, importance, category, action_required, summary, json),
            AddEntity::Tx {
                description,
                amount,
                kind,
                category,
                currency,
                account,
                recurring,
                json,
            } => handle_add_tx(
                description, amount, kind, category, currency, account, recurring, json,
            ),
            AddEntity::Notification {
                title,
                message,
                kind,
                priority,
                json,
            } => handle_add_notification(title, message, kind, priority, json),
        },
        Commands::List { kind, json } => handle_list(kind, json),
        Commands::Get { id, json } => handle_get(id, json),
        Commands::Update {
            id,
            title,
            description,
            status,
            priority,
            category,
            due,
            tags,
            remove_tags,
            json,
        } => handle_update(
            id, title, description, status, priority, category, due, tags, remove_tags, json,
        ),
        Commands::Done { id } => handle_done(id),
        Commands::Delete { id, force } => handle_delete(id, force),
        Commands::Search {
            query,
            sort,
            order,
            limit,
            json,
        } => handle_search(query, sort, order, limit, json),
        Commands::Read { id } => handle_read(id),
        Commands::Stats { json } => handle_stats(json),
        Commands::Digest => handle_digest(),
        Commands::Theme { value } => handle_theme(value),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
