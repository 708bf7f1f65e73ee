//! Task filtering and sorting.
//!
//! Filters are a conjunction: a task passes only if it satisfies every
//! non-empty dimension; an empty dimension is a pass-through. Malformed
//! filter values (an unknown status name, an unparseable date) poison the
//! filter so it matches nothing rather than raising an error.

mod stats;

pub use stats::{DashboardSummary, TaskStats};

use chrono::NaiveDate;

use crate::entity::{Task, TaskCategory, TaskPriority, TaskStatus};

#[derive(Debug, Default, Clone)]
pub struct TaskFilter {
    /// Case-insensitive substring match over title and description.
    pub search: String,
    pub status: Vec<TaskStatus>,
    pub priority: Vec<TaskPriority>,
    pub category: Vec<TaskCategory>,
    pub due_from: Option<NaiveDate>,
    pub due_to: Option<NaiveDate>,
    /// Task must carry at least one of these tags.
    pub tags: Vec<String>,
    poisoned: bool,
}

impl TaskFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no dimension constrains anything.
    pub fn is_empty(&self) -> bool {
        self.search.is_empty()
            && self.status.is_empty()
            && self.priority.is_empty()
            && self.category.is_empty()
            && self.due_from.is_none()
            && self.due_to.is_none()
            && self.tags.is_empty()
            && !self.poisoned
    }

    /// A poisoned filter (malformed value seen during parsing) matches no
    /// task.
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    pub fn matches(&self, task: &Task) -> bool {
        if self.poisoned {
            return false;
        }

        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            let in_title = task.title.to_lowercase().contains(&needle);
            let in_description = task
                .description
                .as_deref()
                .map(|d| d.to_lowercase().contains(&needle))
                .unwrap_or(false);
            if !in_title && !in_description {
                return false;
            }
        }

        if !self.status.is_empty() && !self.status.contains(&task.status) {
            return false;
        }
        if !self.priority.is_empty() && !self.priority.contains(&task.priority) {
            return false;
        }
        if !self.category.is_empty() && !self.category.contains(&task.category) {
            return false;
        }

        // The date range constrains only tasks that have a due date.
        if let (Some(from), Some(due)) = (self.due_from, task.due_date) {
            if due < from {
                return false;
            }
        }
        if let (Some(to), Some(due)) = (self.due_to, task.due_date) {
            if due > to {
                return false;
            }
        }

        if !self.tags.is_empty() && !self.tags.iter().any(|t| task.tags.contains(t)) {
            return false;
        }

        true
    }
}

/// Parse a raw query string into a filter.
///
/// Tokens with a known prefix become filter dimensions; everything else is
/// free-text search:
/// - `status:todo` - status set (repeatable)
/// - `priority:high` - priority set (repeatable)
/// - `category:work` - category set (repeatable)
/// - `tag:home` - tag set (repeatable)
/// - `due:>2026-01-01` / `due:<2026-12-31` - due-date range
///
/// A token value that names no known status/priority/category, or a date
/// that does not parse, poisons the filter: it matches nothing.
pub fn parse_query(raw: &str) -> TaskFilter {
    let mut filter = TaskFilter::default();
    let mut remaining = Vec::new();

    for token in raw.split_whitespace() {
        if let Some(value) = token.strip_prefix("status:") {
            match value.parse() {
                Ok(status) => filter.status.push(status),
                Err(_) => filter.poisoned = true,
            }
        } else if let Some(value) = token.strip_prefix("priority:") {
            match value.parse() {
                Ok(priority) => filter.priority.push(priority),
                Err(_) => filter.poisoned = true,
            }
        } else if let Some(value) = token.strip_prefix("category:") {
            match value.parse() {
                Ok(category) => filter.category.push(category),
                Err(_) => filter.poisoned = true,
            }
        } else if let Some(value) = token.strip_prefix("tag:") {
            filter.tags.push(value.to_string());
        } else if let Some(value) = token.strip_prefix("due:>") {
            match parse_date(value) {
                Some(date) => filter.due_from = Some(date),
                None => filter.poisoned = true,
            }
        } else if let Some(value) = token.strip_prefix("due:<") {
            match parse_date(value) {
                Some(date) => filter.due_to = Some(date),
                None => filter.poisoned = true,
            }
        } else {
            remaining.push(token);
        }
    }

    filter.search = remaining.join(" ");
    filter
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Title,
    Priority,
    #[default]
    DueDate,
    CreatedAt,
    UpdatedAt,
}

impl std::str::FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "title" => Ok(SortField::Title),
            "priority" => Ok(SortField::Priority),
            "due" | "due-date" | "duedate" => Ok(SortField::DueDate),
            "created" | "created-at" => Ok(SortField::CreatedAt),
            "updated" | "updated-at" => Ok(SortField::UpdatedAt),
            _ => Err(format!("Invalid sort field: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Asc),
            "desc" | "descending" => Ok(SortOrder::Desc),
            _ => Err(format!("Invalid sort order: {}", s)),
        }
    }
}

/// Sort in place. Tasks lacking the sort key (no due date) sort last under
/// both orders: presence is compared before the direction is applied.
pub fn sort_tasks(tasks: &mut [Task], field: SortField, order: SortOrder) {
    use std::cmp::Ordering;

    let directed = |ordering: Ordering| match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    };

    tasks.sort_by(|a, b| match field {
        SortField::Title => directed(a.title.to_lowercase().cmp(&b.title.to_lowercase())),
        SortField::Priority => directed(a.priority.rank().cmp(&b.priority.rank())),
        SortField::DueDate => match (a.due_date, b.due_date) {
            (Some(x), Some(y)) => directed(x.cmp(&y)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        SortField::CreatedAt => directed(a.created_at.cmp(&b.created_at)),
        SortField::UpdatedAt => directed(a.updated_at.cmp(&b.updated_at)),
    });
}

/// Filter, sort, and optionally truncate. Pure: recomputed on every call.
pub fn filter_and_sort(
    tasks: &[Task],
    filter: &TaskFilter,
    field: SortField,
    order: SortOrder,
    limit: Option<usize>,
) -> Vec<Task> {
    let mut result: Vec<Task> = tasks.iter().filter(|t| filter.matches(t)).cloned().collect();
    sort_tasks(&mut result, field, order);
    if let Some(limit) = limit {
        result.truncate(limit);
    }
    result
}
