use crate::domain::task::TaskForm;

/// Where the client should go once the modal is done
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    pub board_id: String,
    /// Task to highlight once the board is shown
    pub open_task_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenModal {
    /// `None` while creating a task
    pub task_id: Option<String>,
    pub initial_values: TaskForm,
    pub redirect_to_board: Option<String>,
    /// Set when creation started from inside a board, which locks the board choice
    pub created_from_board: bool,
}

impl OpenModal {
    pub fn is_create(&self) -> bool {
        self.task_id.is_none()
    }

    /// Edits started from the issue list, as opposed to from a board
    pub fn is_from_issue_list(&self) -> bool {
        self.redirect_to_board.is_none() && self.task_id.is_some()
    }

    /// Where to go after saving a task that ended up on [saved_board_id]
    pub fn navigation_after_save(&self, saved_board_id: &str) -> Option<Navigation> {
        if let Some(board_id) = &self.redirect_to_board {
            return Some(Navigation {
                board_id: board_id.clone(),
                open_task_id: None,
            });
        }

        if self.is_from_issue_list() && !saved_board_id.is_empty() {
            return Some(Navigation {
                board_id: saved_board_id.to_owned(),
                open_task_id: self.task_id.clone(),
            });
        }

        None
    }

    /// The "go to board" action, only offered when editing from the issue list
    pub fn go_to_board(&self) -> Option<Navigation> {
        if !self.is_from_issue_list() {
            return None;
        }

        match &self.task_id {
            Some(task_id) if !self.initial_values.board_id.is_empty() => Some(Navigation {
                board_id: self.initial_values.board_id.clone(),
                open_task_id: Some(task_id.clone()),
            }),
            _ => None,
        }
    }
}

/// The one task modal the client can show
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    Open(OpenModal),
}

impl ModalState {
    pub fn open_create(
        &mut self,
        initial_values: TaskForm,
        redirect_to_board: Option<String>,
        created_from_board: bool,
    ) {
        *self = ModalState::Open(OpenModal {
            task_id: None,
            initial_values,
            redirect_to_board,
            created_from_board,
        });
    }

    pub fn open_edit(
        &mut self,
        task_id: &str,
        initial_values: TaskForm,
        redirect_to_board: Option<String>,
    ) {
        *self = ModalState::Open(OpenModal {
            task_id: Some(task_id.to_owned()),
            initial_values,
            redirect_to_board,
            created_from_board: false,
        });
    }

    pub fn close(&mut self) {
        *self = ModalState::Closed;
    }

    pub fn current(&self) -> Option<&OpenModal> {
        match self {
            ModalState::Closed => None,
            ModalState::Open(modal) => Some(modal),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, ModalState::Open(_))
    }
}
