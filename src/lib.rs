//! Client for a Kanban-style task tracker: fetches users, boards and tasks from the REST API,
//! keeps local snapshots of them, and coordinates task editing, drafts and drag-and-drop.

pub mod app_env;
pub mod client;
pub mod config;
pub mod domain;
pub mod external_connections;
pub mod gateway;
pub mod logging;
pub mod state;
pub mod views;
