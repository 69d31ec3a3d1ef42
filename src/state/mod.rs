//! Client-side state: the entity snapshots, query freshness, the task modal and the persisted draft.

pub mod draft;
pub mod modal;
pub mod notifications;
pub mod query;
pub mod store;
