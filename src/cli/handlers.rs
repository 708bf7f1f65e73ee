use std::env;
use std::io::{self, Read};
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::digest::render_digest;
use crate::entity::{EmailContact, EmailSummary, Notification, Task, Transaction};
use crate::error::{AtriumError, Result};
use crate::format::{format_currency, truncate_text};
use crate::query::{filter_and_sort, parse_query, DashboardSummary, SortField, SortOrder};
use crate::store::TaskPatch;
use crate::workspace::Workspace;

/// Find the workspace root by looking for .atrium/ or .git/
fn find_workspace_root() -> PathBuf {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let mut current = cwd.as_path();
    loop {
        if current.join(".atrium").exists() || current.join(".git").exists() {
            return current.to_path_buf();
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return cwd,
        }
    }
}

fn parse_field<T: FromStr>(field: &'static str, value: &str) -> Result<T> {
    value.parse().map_err(|_| AtriumError::InvalidValue {
        field,
        value: value.to_string(),
    })
}

fn parse_due(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| AtriumError::InvalidValue {
        field: "due date",
        value: value.to_string(),
    })
}

fn short(id: &Uuid) -> String {
    id.to_string()[..8].to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Task,
    Email,
    Transaction,
    Notification,
}

impl Kind {
    fn label(&self) -> &'static str {
        match self {
            Kind::Task => "task",
            Kind::Email => "email",
            Kind::Transaction => "transaction",
            Kind::Notification => "notification",
        }
    }
}

/// Resolve an id prefix across all id-addressable stores. Exactly one match
/// is required.
fn resolve_id(ws: &Workspace, prefix: &str) -> Result<(Kind, Uuid)> {
    let mut matches = Vec::new();

    for t in ws.tasks.all() {
        if t.id.to_string().starts_with(prefix) {
            matches.push((Kind::Task, t.id));
        }
    }
    for e in ws.emails.all() {
        if e.id.to_string().starts_with(prefix) {
            matches.push((Kind::Email, e.id));
        }
    }
    for t in ws.finance.all() {
        if t.id.to_string().starts_with(prefix) {
            matches.push((Kind::Transaction, t.id));
        }
    }
    for n in ws.notifications.all() {
        if n.id.to_string().starts_with(prefix) {
            matches.push((Kind::Notification, n.id));
        }
    }

    match matches.len() {
        0 => Err(AtriumError::NotFound(prefix.to_string())),
        1 => Ok(matches.remove(0)),
        _ => Err(AtriumError::InvalidValue {
            field: "id (ambiguous prefix)",
            value: prefix.to_string(),
        }),
    }
}

fn resolve_in<'a, I: Iterator<Item = &'a Uuid>>(ids: I, prefix: &str) -> Result<Uuid> {
    let matches: Vec<Uuid> = ids
        .filter(|id| id.to_string().starts_with(prefix))
        .copied()
        .collect();
    match matches.len() {
        0 => Err(AtriumError::NotFound(prefix.to_string())),
        1 => Ok(matches[0]),
        _ => Err(AtriumError::InvalidValue {
            field: "id (ambiguous prefix)",
            value: prefix.to_string(),
        }),
    }
}

pub fn handle_init() -> Result<()> {
    let root = env::current_dir()?;

    let _workspace = Workspace::init(&root)?;

    println!("Initialized atrium workspace in {}", root.display());
    Ok(())
}

pub fn handle_add_task(
    title: String,
    status: String,
    priority: String,
    category: String,
    due: Option<String>,
    tags: Vec<String>,
    stdin: bool,
    json: bool,
) -> Result<()> {
    let root = find_workspace_root();
    let mut ws = Workspace::open(&root)?;
    let now = Utc::now();

    let mut task = Task::new(title, now);
    task.status = parse_field("status", &status)?;
    task.priority = parse_field("priority", &priority)?;
    task.category = parse_field("category", &category)?;
    task.due_date = due.as_deref().map(parse_due).transpose()?;
    task.tags = tags;

    if stdin {
        let mut description = String::new();
        io::stdin().read_to_string(&mut description)?;
        if !description.trim().is_empty() {
            task.description = Some(description.trim_end().to_string());
        }
    }

    let printable = task.clone();
    ws.tasks.add(task)?;
    ws.save()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&printable)?);
    } else {
        println!("Created task {} - {}", short(&printable.id), printable.title);
    }
    Ok(())
}

pub fn handle_add_email(
    subject: String,
    from: String,
    importance: String,
    category: String,
    action_required: bool,
    summary: Option<String>,
    json: bool,
) -> Result<()> {
    let root = find_workspace_root();
    let mut ws = Workspace::open(&root)?;
    let now = Utc::now();

    let mut email = EmailSummary::new(subject, EmailContact::parse(&from), now);
    email.importance = parse_field("importance", &importance)?;
    email.category = parse_field("category", &category)?;
    email.action_required = action_required;
    if let Some(summary) = summary {
        email.summary = summary;
    }

    let printable = email.clone();
    ws.emails.add(email)?;
    ws.save()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&printable)?);
    } else {
        println!(
            "Filed email {} - {} (from {})",
            short(&printable.id),
            printable.subject,
            printable.sender.email
        );
    }
    Ok(())
}

pub fn handle_add_tx(
    description: String,
    amount: f64,
    kind: String,
    category: String,
    currency: String,
    account: Option<String>,
    recurring: bool,
    json: bool,
) -> Result<()> {
    let root = find_workspace_root();
    let mut ws = Workspace::open(&root)?;
    let now = Utc::now();

    let mut tx = Transaction::new(description, amount, parse_field("type", &kind)?, now);
    tx.category = parse_field("category", &category)?;
    tx.currency = currency;
    if let Some(account) = account {
        tx.account = account;
    }
    tx.recurring = recurring;

    let printable = tx.clone();
    ws.finance.add(tx)?;
    ws.save()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&printable)?);
    } else {
        println!(
            "Recorded {} {} - {}",
            printable.kind,
            format_currency(printable.amount, &printable.currency),
            printable.description
        );
    }
    Ok(())
}

pub fn handle_add_notification(
    title: String,
    message: String,
    kind: String,
    priority: String,
    json: bool,
) -> Result<()> {
    let root = find_workspace_root();
    let mut ws = Workspace::open(&root)?;
    let now = Utc::now();

    let mut notification = Notification::new(title, message, parse_field("type", &kind)?, now);
    notification.priority = parse_field("priority", &priority)?;

    let printable = notification.clone();
    ws.notifications.add(notification)?;
    ws.save()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&printable)?);
    } else {
        println!(
            "Posted notification {} - {}",
            short(&printable.id),
            printable.title
        );
    }
    Ok(())
}

fn print_task_line(task: &Task) {
    let due = match task.due_date {
        Some(d) => format!("  due {}", d.format("%Y-%m-%d")),
        None => String::new(),
    };
    println!(
        "{}  {:<11}  {:<6}  {}{}",
        short(&task.id),
        task.status.to_string(),
        task.priority.to_string(),
        task.title,
        due
    );
}

pub fn handle_list(kind: Option<String>, json: bool) -> Result<()> {
    let root = find_workspace_root();
    let ws = Workspace::open(&root)?;
    let now = Utc::now();

    let kind = kind.unwrap_or_else(|| "tasks".to_string());
    match kind.as_str() {
        "tasks" | "task" => {
            if json {
                println!("{}", serde_json::to_string_pretty(ws.tasks.all())?);
            } else {
                for task in ws.tasks.all() {
                    print_task_line(task);
                }
            }
        }
        "emails" | "email" => {
            if json {
                println!("{}", serde_json::to_string_pretty(ws.emails.all())?);
            } else {
                for email in ws.emails.all() {
                    let marker = if email.is_unread() { "*" } else { " " };
                    println!(
                        "{} {}  {:<6}  {}  ({})",
                        marker,
                        short(&email.id),
                        email.importance.to_string(),
                        email.subject,
                        email.sender.email
                    );
                }
            }
        }
        "transactions" | "tx" => {
            if json {
                println!("{}", serde_json::to_string_pretty(ws.finance.all())?);
            } else {
                for tx in ws.finance.all() {
                    println!(
                        "{}  {:<7}  {:>12}  {}",
                        short(&tx.id),
                        tx.kind.to_string(),
                        format_currency(tx.amount, &tx.currency),
                        tx.description
                    );
                }
                println!(
                    "balance {}  spent this month {}",
                    format_currency(ws.finance.balance(), "USD"),
                    format_currency(ws.finance.monthly_spent(now), "USD")
                );
            }
        }
        "notifications" | "notification" => {
            if json {
                println!("{}", serde_json::to_string_pretty(ws.notifications.all())?);
            } else {
                for n in ws.notifications.all() {
                    let marker = if n.read { " " } else { "*" };
                    println!(
                        "{} {}  {:<8}  {}  - {}",
                        marker,
                        short(&n.id),
                        n.kind.to_string(),
                        n.title,
                        truncate_text(&n.message, 60)
                    );
                }
            }
        }
        "chats" | "chat" => {
            if json {
                println!("{}", serde_json::to_string_pretty(ws.chat.all())?);
            } else {
                for session in ws.chat.all() {
                    let flag = if session.archived { " (archived)" } else { "" };
                    println!(
                        "{}  {} messages  {}{}",
                        short(&session.id),
                        session.messages.len(),
                        session.title,
                        flag
                    );
                }
            }
        }
        other => {
            return Err(AtriumError::InvalidValue {
                field: "kind",
                value: other.to_string(),
            })
        }
    }
    Ok(())
}

pub fn handle_get(id: String, json: bool) -> Result<()> {
    let root = find_workspace_root();
    let ws = Workspace::open(&root)?;

    let (kind, resolved) = resolve_id(&ws, &id)?;
    let missing = || AtriumError::NotFound(resolved.to_string());
    match kind {
        Kind::Task => {
            let task = ws.tasks.get(&resolved).ok_or_else(missing)?;
            if json {
                println!("{}", serde_json::to_string_pretty(task)?);
            } else {
                print_task_line(task);
                if let Some(description) = &task.description {
                    println!("\n{}", description);
                }
                if !task.tags.is_empty() {
                    println!("tags: {}", task.tags.join(", "));
                }
            }
        }
        Kind::Email => {
            let email = ws.emails.get(&resolved).ok_or_else(missing)?;
            if json {
                println!("{}", serde_json::to_string_pretty(email)?);
            } else {
                println!("{} (from {})", email.subject, email.sender.email);
                if !email.summary.is_empty() {
                    println!("\n{}", email.summary);
                }
            }
        }
        Kind::Transaction => {
            let tx = ws.finance.get(&resolved).ok_or_else(missing)?;
            if json {
                println!("{}", serde_json::to_string_pretty(tx)?);
            } else {
                println!(
                    "{} {} - {} ({})",
                    tx.kind,
                    format_currency(tx.amount, &tx.currency),
                    tx.description,
                    tx.category
                );
            }
        }
        Kind::Notification => {
            let n = ws.notifications.get(&resolved).ok_or_else(missing)?;
            if json {
                println!("{}", serde_json::to_string_pretty(n)?);
            } else {
                println!("[{}] {} - {}", n.kind, n.title, n.message);
            }
        }
    }
    Ok(())
}

pub fn handle_update(
    id: String,
    title: Option<String>,
    description: Option<String>,
    status: Option<String>,
    priority: Option<String>,
    category: Option<String>,
    due: Option<String>,
    tags: Vec<String>,
    remove_tags: Vec<String>,
    json: bool,
) -> Result<()> {
    let root = find_workspace_root();
    let mut ws = Workspace::open(&root)?;
    let now = Utc::now();

    let task_id = resolve_in(ws.tasks.all().iter().map(|t| &t.id), &id)?;

    let patch = TaskPatch {
        title,
        description: description.map(|d| if d == "none" { None } else { Some(d) }),
        status: status.as_deref().map(|s| parse_field("status", s)).transpose()?,
        priority: priority
            .as_deref()
            .map(|p| parse_field("priority", p))
            .transpose()?,
        category: category
            .as_deref()
            .map(|c| parse_field("category", c))
            .transpose()?,
        due_date: due
            .as_deref()
            .map(|d| {
                if d == "none" {
                    Ok(None)
                } else {
                    parse_due(d).map(Some)
                }
            })
            .transpose()?,
        add_tags: tags,
        remove_tags,
    };

    ws.tasks.update(&task_id, patch, now)?;
    ws.save()?;

    let task = ws
        .tasks
        .get(&task_id)
        .ok_or_else(|| AtriumError::NotFound(task_id.to_string()))?;
    if json {
        println!("{}", serde_json::to_string_pretty(task)?);
    } else {
        println!("Updated task {} - {}", short(&task_id), task.title);
    }
    Ok(())
}

pub fn handle_done(id: String) -> Result<()> {
    let root = find_workspace_root();
    let mut ws = Workspace::open(&root)?;

    let task_id = resolve_in(ws.tasks.all().iter().map(|t| &t.id), &id)?;
    let status = ws.tasks.toggle_complete(&task_id, Utc::now())?;
    ws.save()?;

    println!("Task {} is now {}", short(&task_id), status);
    Ok(())
}

pub fn handle_delete(id: String, force: bool) -> Result<()> {
    let root = find_workspace_root();
    let mut ws = Workspace::open(&root)?;

    let (kind, resolved) = resolve_id(&ws, &id)?;

    if !force {
        println!("Delete {} {}? [y/N]", kind.label(), short(&resolved));

        // Only prompt when stdin is interactive.
        if atty::is(atty::Stream::Stdin) {
            let mut input = String::new();
            io::stdin().read_line(&mut input)?;
            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Aborted.");
                return Ok(());
            }
        }
    }

    match kind {
        Kind::Task => {
            ws.tasks.remove(&resolved)?;
        }
        Kind::Email => {
            ws.emails.remove(&resolved)?;
        }
        Kind::Transaction => {
            ws.finance.remove(&resolved)?;
        }
        Kind::Notification => {
            ws.notifications.remove(&resolved)?;
        }
    }
    ws.save()?;

    println!("Deleted {} {}", kind.label(), short(&resolved));
    Ok(())
}

pub fn handle_search(
    query: Vec<String>,
    sort: String,
    order: String,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let root = find_workspace_root();
    let ws = Workspace::open(&root)?;

    let filter = parse_query(&query.join(" "));
    let field: SortField = parse_field("sort field", &sort)?;
    let sort_order: SortOrder = parse_field("sort order", &order)?;

    let results = filter_and_sort(ws.tasks.all(), &filter, field, sort_order, limit);

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else if results.is_empty() {
        println!("No tasks matched.");
    } else {
        for task in &results {
            print_task_line(task);
        }
    }
    Ok(())
}

pub fn handle_read(id: String) -> Result<()> {
    let root = find_workspace_root();
    let mut ws = Workspace::open(&root)?;

    let email_id = resolve_in(ws.emails.all().iter().map(|e| &e.id), &id)?;
    ws.emails.mark_read(&email_id, Utc::now())?;
    let subject = ws
        .emails
        .get(&email_id)
        .map(|e| e.subject.clone())
        .unwrap_or_default();
    ws.save()?;

    println!("Marked read: {}", subject);
    Ok(())
}

pub fn handle_stats(json: bool) -> Result<()> {
    let root = find_workspace_root();
    let ws = Workspace::open(&root)?;
    let now = Utc::now();

    let summary = DashboardSummary::collect(&ws, now);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "Tasks          {} total, {} open, {} completed ({:.0}%), {} overdue",
        summary.tasks.total,
        summary.tasks.todo + summary.tasks.in_progress,
        summary.tasks.completed,
        summary.tasks.completion_rate,
        summary.tasks.overdue
    );
    println!(
        "Email          {} unread of {}, {} important, {} need action",
        summary.unread_emails,
        summary.total_emails,
        summary.important_emails,
        summary.action_required_emails
    );
    println!(
        "Finance        balance {}, spent this month {} ({} today)",
        format_currency(summary.balance, "USD"),
        format_currency(summary.monthly_spent, "USD"),
        summary.today_transactions
    );
    println!(
        "Notifications  {} unread, {} high priority",
        summary.unread_notifications, summary.critical_notifications
    );
    println!("System health  {}%", summary.system_health);
    Ok(())
}

pub fn handle_digest() -> Result<()> {
    let root = find_workspace_root();
    let ws = Workspace::open(&root)?;

    print!("{}", render_digest(&ws, Utc::now())?);
    Ok(())
}

pub fn handle_theme(value: String) -> Result<()> {
    let root = find_workspace_root();
    let mut ws = Workspace::open(&root)?;

    ws.app.set_theme(parse_field("theme", &value)?);
    ws.save()?;

    println!("Theme set to {}", ws.app.theme());
    Ok(())
}
