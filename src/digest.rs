//! Markdown daily brief rendered from the current workspace.

use chrono::{DateTime, Utc};

use crate::entity::TaskStatus;
use crate::error::Result;
use crate::format::{format_currency, format_relative_time};
use crate::query::{filter_and_sort, DashboardSummary, SortField, SortOrder, TaskFilter};
use crate::workspace::Workspace;

const MAX_DIGEST_TASKS: usize = 10;
const MAX_DIGEST_EMAILS: usize = 5;

/// Generate YAML frontmatter block
pub fn yaml_frontmatter<T: serde::Serialize>(data: &T) -> Result<String> {
    let yaml = serde_yaml::to_string(data)?;
    Ok(format!("---\n{}---\n", yaml))
}

/// Render the daily brief. Deterministic given the workspace and `now`.
pub fn render_digest(ws: &Workspace, now: DateTime<Utc>) -> Result<String> {
    let summary = DashboardSummary::collect(ws, now);

    let mut out = yaml_frontmatter(&summary)?;
    out.push_str(&format!("\n# Daily Brief - {}\n", now.format("%Y-%m-%d")));

    // Open tasks, soonest due first.
    let mut filter = TaskFilter::new();
    filter.status = vec![TaskStatus::Todo, TaskStatus::InProgress];
    let open = filter_and_sort(
        ws.tasks.all(),
        &filter,
        SortField::DueDate,
        SortOrder::Asc,
        Some(MAX_DIGEST_TASKS),
    );

    out.push_str("\n## Tasks\n\n");
    if open.is_empty() {
        out.push_str("Nothing open. Enjoy the quiet.\n");
    } else {
        for task in &open {
            let due = match task.due_date {
                Some(d) => format!(" (due {})", d.format("%Y-%m-%d")),
                None => String::new(),
            };
            out.push_str(&format!("- [ ] {} [{}]{}\n", task.title, task.priority, due));
        }
        if summary.tasks.overdue > 0 {
            out.push_str(&format!("\n{} overdue.\n", summary.tasks.overdue));
        }
    }

    out.push_str("\n## Unread Email\n\n");
    let unread = ws.emails.unread();
    if unread.is_empty() {
        out.push_str("Inbox clear.\n");
    } else {
        for email in unread.iter().take(MAX_DIGEST_EMAILS) {
            out.push_str(&format!(
                "- **{}** - {} ({})\n",
                email.subject,
                email.sender.name,
                format_relative_time(email.received_at, now)
            ));
        }
        if unread.len() > MAX_DIGEST_EMAILS {
            out.push_str(&format!("- ...and {} more\n", unread.len() - MAX_DIGEST_EMAILS));
        }
    }

    out.push_str("\n## Finances\n\n");
    out.push_str(&format!(
        "Balance {} | spent this month {}\n",
        format_currency(summary.balance, "USD"),
        format_currency(summary.monthly_spent, "USD")
    ));

    out.push_str("\n## Notifications\n\n");
    if summary.unread_notifications == 0 {
        out.push_str("No unread notifications.\n");
    } else {
        out.push_str(&format!("{} unread", summary.unread_notifications));
        if summary.critical_notifications > 0 {
            out.push_str(&format!(", {} high priority", summary.critical_notifications));
        }
        out.push('\n');
    }

    Ok(out)
}
