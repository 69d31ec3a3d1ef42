use crate::domain::board::Board;
use crate::domain::catalog::Catalog;
use crate::domain::task::{Task, TaskStatus};
use crate::domain::user::User;
use std::collections::HashMap;

/// Last-known-good snapshot of one kind of entity. Only ever replaced as a whole.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityStore<T> {
    items: Vec<T>,
}

impl<T> Default for EntityStore<T> {
    fn default() -> Self {
        EntityStore { items: Vec::new() }
    }
}

impl<T> EntityStore<T> {
    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items = items;
    }

    pub fn all(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl EntityStore<Task> {
    pub fn find(&self, task_id: &str) -> Option<&Task> {
        self.items.iter().find(|task| task.id == task_id)
    }

    /// Optimistically moves one task to [status] ahead of server confirmation, returning the
    /// status it had before. `None` if the task isn't in this snapshot.
    pub fn set_status(&mut self, task_id: &str, status: TaskStatus) -> Option<TaskStatus> {
        self.items
            .iter_mut()
            .find(|task| task.id == task_id)
            .map(|task| std::mem::replace(&mut task.status, status))
    }
}

/// Every entity snapshot the client holds
#[derive(Clone, Debug, Default)]
pub struct AppStore {
    pub users: EntityStore<User>,
    pub boards: EntityStore<Board>,
    pub tasks: EntityStore<Task>,
    board_tasks: HashMap<String, EntityStore<Task>>,
}

impl AppStore {
    pub fn apply_catalog(&mut self, catalog: Catalog) {
        self.users.replace_all(catalog.users);
        self.boards.replace_all(catalog.boards);
        self.tasks.replace_all(catalog.tasks);
    }

    pub fn replace_board_tasks(&mut self, board_id: &str, tasks: Vec<Task>) {
        self.board_tasks
            .entry(board_id.to_owned())
            .or_default()
            .replace_all(tasks);
    }

    /// The snapshot fetched through the board endpoint, if that board has been loaded
    pub fn board_tasks(&self, board_id: &str) -> Option<&EntityStore<Task>> {
        self.board_tasks.get(board_id)
    }

    pub fn find_task(&self, task_id: &str) -> Option<&Task> {
        self.tasks
            .find(task_id)
            .or_else(|| self.board_tasks.values().find_map(|store| store.find(task_id)))
    }

    /// Applies an optimistic status change to every snapshot containing the task. Returns the
    /// previous status, or `None` if no snapshot knows the task.
    pub fn set_task_status(&mut self, task_id: &str, status: TaskStatus) -> Option<TaskStatus> {
        let mut previous = self.tasks.set_status(task_id, status);
        for store in self.board_tasks.values_mut() {
            let old_status = store.set_status(task_id, status);
            if previous.is_none() {
                previous = old_status;
            }
        }

        previous
    }
}
