//! Read-only projections over the entity stores. Renderers consume these directly and never
//! mutate them; every change goes back through the client.

pub mod board_view;
pub mod boards_list;
pub mod issue_list;
