use crate::domain::task::{Task, TaskStatus};
use crate::state::store::AppStore;

const DEFAULT_BOARD_TITLE: &str = "Board";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardColumn {
    pub status: TaskStatus,
    pub tasks: Vec<Task>,
}

/// One board's tasks grouped into status columns
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardView {
    pub board_id: String,
    pub title: String,
    /// Always one column per status, in [TaskStatus::ALL] order
    pub columns: Vec<BoardColumn>,
}

impl BoardView {
    /// Uses the board's own snapshot when it has been fetched, otherwise filters the full
    /// task list down to the board
    pub fn build(store: &AppStore, board_id: &str) -> Self {
        let title = store
            .boards
            .all()
            .iter()
            .find(|board| board.id == board_id)
            .map(|board| board.title.clone())
            .unwrap_or_else(|| DEFAULT_BOARD_TITLE.to_owned());

        let board_tasks: Vec<&Task> = match store.board_tasks(board_id) {
            Some(snapshot) => snapshot.all().iter().collect(),
            None => store
                .tasks
                .all()
                .iter()
                .filter(|task| task.board_id == board_id)
                .collect(),
        };

        let columns = TaskStatus::ALL
            .into_iter()
            .map(|status| BoardColumn {
                status,
                tasks: board_tasks
                    .iter()
                    .filter(|task| task.status == status)
                    .map(|task| (*task).clone())
                    .collect(),
            })
            .collect();

        BoardView {
            board_id: board_id.to_owned(),
            title,
            columns,
        }
    }

    pub fn column(&self, status: TaskStatus) -> Option<&BoardColumn> {
        self.columns.iter().find(|column| column.status == status)
    }
}

/// A card released at the end of a drag. `destination` is `None` when it was dropped outside
/// every column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropRequest {
    pub task_id: String,
    pub source: TaskStatus,
    pub destination: Option<TaskStatus>,
}

/// A status change the board wants applied to one task
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusChange {
    pub task_id: String,
    pub from: TaskStatus,
    pub to: TaskStatus,
}

impl DropRequest {
    /// The column the card should move to, if the drop actually changes its column
    pub fn target_status(&self) -> Option<TaskStatus> {
        self.destination
            .filter(|destination| *destination != self.source)
    }
}
