use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entity::{TaskPriority, TaskStatus};
use crate::store::TaskStore;
use crate::workspace::Workspace;

/// Per-store task roll-up, recomputed on demand.
#[derive(Debug, Clone, Serialize)]
pub struct TaskStats {
    pub total: usize,
    pub todo: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub cancelled: usize,
    pub overdue: usize,
    pub urgent: usize,
    pub high_priority: usize,
    /// Percentage of completed tasks; 0 when the store is empty.
    pub completion_rate: f64,
}

impl TaskStats {
    pub fn collect(store: &TaskStore, now: DateTime<Utc>) -> Self {
        let total = store.len();
        let completed = store.count_by_status(TaskStatus::Completed);
        let completion_rate = if total > 0 {
            completed as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        Self {
            total,
            todo: store.count_by_status(TaskStatus::Todo),
            in_progress: store.count_by_status(TaskStatus::InProgress),
            completed,
            cancelled: store.count_by_status(TaskStatus::Cancelled),
            overdue: store.overdue(now).len(),
            urgent: store.by_priority(TaskPriority::Urgent).len(),
            high_priority: store.by_priority(TaskPriority::High).len(),
            completion_rate,
        }
    }
}

/// Cross-store snapshot backing the dashboard header cards.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub tasks: TaskStats,
    pub total_emails: usize,
    pub unread_emails: usize,
    pub important_emails: usize,
    pub action_required_emails: usize,
    pub balance: f64,
    pub monthly_spent: f64,
    pub budget_remaining: f64,
    pub today_transactions: usize,
    pub unread_notifications: usize,
    pub critical_notifications: usize,
    pub active_chats: usize,
    pub system_health: u8,
    pub last_updated: Option<DateTime<Utc>>,
}

impl DashboardSummary {
    pub fn collect(ws: &Workspace, now: DateTime<Utc>) -> Self {
        Self {
            tasks: TaskStats::collect(&ws.tasks, now),
            total_emails: ws.emails.len(),
            unread_emails: ws.emails.unread_count(),
            important_emails: ws.emails.important_count(),
            action_required_emails: ws.emails.action_required_count(),
            balance: ws.finance.balance(),
            monthly_spent: ws.finance.monthly_spent(now),
            budget_remaining: ws.finance.budget_remaining(now),
            today_transactions: ws.finance.today_count(now),
            unread_notifications: ws.notifications.unread_count(),
            critical_notifications: ws.notifications.critical_count(),
            active_chats: ws.chat.active().len(),
            system_health: ws.app.system_health(),
            last_updated: ws.app.last_updated(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{
        EmailContact, EmailSummary, Importance, Notification, NotificationKind, Task, Transaction,
        TransactionKind,
    };
    use crate::store::TaskPatch;

    #[test]
    fn test_task_stats() {
        let now = Utc::now();
        let mut store = TaskStore::new();

        let mut overdue = Task::new("late", now);
        overdue.due_date = Some(now.date_naive() - chrono::Duration::days(2));
        overdue.priority = TaskPriority::Urgent;
        store.add(overdue).unwrap();

        let done = Task::new("done", now);
        let done_id = done.id;
        store.add(done).unwrap();
        store
            .update(
                &done_id,
                TaskPatch {
                    status: Some(TaskStatus::Completed),
                    ..Default::default()
                },
                now,
            )
            .unwrap();

        let stats = TaskStats::collect(&store, now);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.todo, 1);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.overdue, 1);
        assert_eq!(stats.urgent, 1);
        assert!((stats.completion_rate - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_store_has_zero_completion_rate() {
        let stats = TaskStats::collect(&TaskStore::new(), Utc::now());
        assert_eq!(stats.total, 0);
        assert_eq!(stats.completion_rate, 0.0);
    }

    #[test]
    fn test_dashboard_summary_combines_stores() {
        let now = Utc::now();
        let mut ws = Workspace::new();

        ws.tasks.add(Task::new("t", now)).unwrap();
        ws.emails
            .add(EmailSummary::new("e", EmailContact::parse("x@y.z"), now))
            .unwrap();
        ws.finance.set_balance(120.0);
        ws.finance
            .add(Transaction::new("lunch", 15.0, TransactionKind::Expense, now))
            .unwrap();
        let mut critical = Notification::new("alert", "", NotificationKind::Security, now);
        critical.priority = Importance::High;
        ws.notifications.add(critical).unwrap();
        ws.chat.create_session("c", now);
        ws.app.touch(now);

        let summary = DashboardSummary::collect(&ws, now);
        assert_eq!(summary.tasks.total, 1);
        assert_eq!(summary.unread_emails, 1);
        assert_eq!(summary.balance, 120.0);
        assert_eq!(summary.monthly_spent, 15.0);
        assert_eq!(summary.today_transactions, 1);
        assert_eq!(summary.unread_notifications, 1);
        assert_eq!(summary.critical_notifications, 1);
        assert_eq!(summary.active_chats, 1);
        assert_eq!(summary.last_updated, Some(now));
    }
}
