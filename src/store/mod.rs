//! In-memory domain stores.
//!
//! Each store exclusively owns the collection for one entity kind and is the
//! only mutation path into it. Mutations take typed patch structs rather than
//! arbitrary partial objects; `update`/`remove` on an unknown id return
//! `AtriumError::NotFound` instead of silently doing nothing. Derived values
//! (unread counts, subsets, subtotals) are recomputed with a linear scan on
//! each read, which is fine at dashboard scale.

mod app;
mod chat;
mod email;
mod finance;
mod notification;
mod task;

pub use app::{AppStore, Prefs};
pub use chat::ChatStore;
pub use email::{EmailPatch, EmailStore};
pub use finance::{FinanceStore, TransactionPatch};
pub use notification::NotificationStore;
pub use task::{TaskPatch, TaskStore};
