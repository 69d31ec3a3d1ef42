use crate::domain;
use crate::domain::board::driven_ports::BoardReader;
use crate::domain::task::driven_ports::TaskReader;
use crate::domain::task::driving_ports::{SubmitTarget, TaskError, TaskPort};
use crate::domain::task::{FormField, TaskForm, TaskService};
use crate::domain::user::driven_ports::UserReader;
use crate::external_connections::ExternalConnectivity;
use crate::gateway::http_driven_ports::{
    HttpBoardReader, HttpTaskReader, HttpTaskWriter, HttpUserReader,
};
use crate::state::draft::DraftStore;
use crate::state::modal::{ModalState, Navigation};
use crate::state::notifications::{Notification, NotificationQueue};
use crate::state::query::{QueryCache, QueryKey};
use crate::state::store::AppStore;
use crate::views::board_view::{BoardView, DropRequest, StatusChange};
use crate::views::boards_list::{BoardSummary, board_summaries};
use crate::views::issue_list::{IssueFilter, IssueRow, IssueSort, issue_rows};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Owns every piece of client state and is the only thing allowed to change it. Renderers read
/// through the view methods and report user actions back through the mutating ones.
pub struct TaskboardClient<C: ExternalConnectivity, D: DraftStore> {
    ext_cxn: C,
    drafts: D,
    store: AppStore,
    queries: QueryCache,
    modal: ModalState,
    form: Option<TaskForm>,
    notifications: NotificationQueue,
    task_service: TaskService,
}

impl<C: ExternalConnectivity, D: DraftStore> TaskboardClient<C, D> {
    pub fn new(ext_cxn: C, drafts: D) -> Self {
        TaskboardClient {
            ext_cxn,
            drafts,
            store: AppStore::default(),
            queries: QueryCache::default(),
            modal: ModalState::default(),
            form: None,
            notifications: NotificationQueue::default(),
            task_service: TaskService {},
        }
    }

    /// Loads users, boards and tasks concurrently. Returns false, leaving the stores alone, if
    /// [cancel] fired first.
    pub async fn load_all(&mut self, cancel: &CancellationToken) -> bool {
        let Some(catalog) = domain::catalog::load_catalog(
            &self.ext_cxn,
            &HttpUserReader,
            &HttpBoardReader,
            &HttpTaskReader,
            cancel,
        )
        .await
        else {
            return false;
        };

        self.store.apply_catalog(catalog);
        self.queries.mark_fresh(QueryKey::Users);
        self.queries.mark_fresh(QueryKey::Boards);
        self.queries.mark_fresh(QueryKey::Tasks);
        true
    }

    /// Loads the snapshot behind one board's view
    pub async fn load_board(&mut self, board_id: &str, cancel: &CancellationToken) -> bool {
        self.fetch(QueryKey::BoardTasks(board_id.to_owned()), cancel)
            .await
    }

    /// Refetches every query invalidated since it was last loaded
    pub async fn refresh_stale(&mut self, cancel: &CancellationToken) -> bool {
        for key in self.queries.stale_keys() {
            if !self.fetch(key, cancel).await {
                return false;
            }
        }

        true
    }

    async fn fetch(&mut self, key: QueryKey, cancel: &CancellationToken) -> bool {
        debug!(?key, "fetching query");
        match &key {
            QueryKey::Users => {
                let users = HttpUserReader.all_users(&self.ext_cxn, cancel).await;
                if cancel.is_cancelled() {
                    return false;
                }
                self.store.users.replace_all(users);
            }
            QueryKey::Boards => {
                let boards = HttpBoardReader.all_boards(&self.ext_cxn, cancel).await;
                if cancel.is_cancelled() {
                    return false;
                }
                self.store.boards.replace_all(boards);
            }
            QueryKey::Tasks => {
                let tasks = HttpTaskReader.all_tasks(&self.ext_cxn, cancel).await;
                if cancel.is_cancelled() {
                    return false;
                }
                self.store.tasks.replace_all(tasks);
            }
            QueryKey::BoardTasks(board_id) => {
                let tasks = HttpTaskReader
                    .tasks_on_board(board_id, &self.ext_cxn, cancel)
                    .await;
                if cancel.is_cancelled() {
                    return false;
                }
                self.store.replace_board_tasks(board_id, tasks);
            }
        }

        self.queries.mark_fresh(key);
        true
    }

    /// Opens the modal to create a task. A saved draft takes precedence over [initial_values].
    /// When started from a board, the form stays pinned to [redirect_to_board].
    pub fn open_create(
        &mut self,
        initial_values: TaskForm,
        redirect_to_board: Option<String>,
        created_from_board: bool,
    ) {
        let mut form = self
            .drafts
            .load()
            .unwrap_or_else(|| initial_values.clone());
        if let (true, Some(board_id)) = (created_from_board, &redirect_to_board) {
            form.board_id = board_id.clone();
        }

        self.modal
            .open_create(initial_values, redirect_to_board, created_from_board);
        self.form = Some(form);
    }

    /// Opens the modal on an existing task, always starting from the task's current values
    pub fn open_edit(
        &mut self,
        task_id: &str,
        redirect_to_board: Option<String>,
    ) -> Result<(), domain::Error> {
        let initial_values = match self.store.find_task(task_id) {
            Some(task) => TaskForm::from(task),
            None => return Err(domain::Error::DoesNotExist),
        };

        self.form = Some(initial_values.clone());
        self.modal
            .open_edit(task_id, initial_values, redirect_to_board);
        Ok(())
    }

    /// Applies one edit to the open form. In create mode the whole form is saved as the draft.
    pub fn change_field(&mut self, field: FormField) {
        let (Some(modal), Some(form)) = (self.modal.current(), self.form.as_mut()) else {
            debug!("ignoring form change while no modal is open");
            return;
        };
        if modal.created_from_board && matches!(field, FormField::Board(_)) {
            debug!("board is fixed for tasks created from a board");
            return;
        }

        form.apply(field);
        if modal.is_create() {
            if let Err(err) = self.drafts.save(form) {
                warn!(error = %format!("{err:#}"), "could not save the task draft");
            }
        }
    }

    /// Validates and saves the open form. Validation failures keep the modal open. Anything
    /// else closes it; on success the draft is cleared and the caller gets where to navigate.
    pub async fn submit(&mut self) -> Result<Option<Navigation>, domain::Error> {
        let Some(modal) = self.modal.current().cloned() else {
            return Err(domain::Error::DoesNotExist);
        };
        let form = self.form.clone().unwrap_or_default();
        let target = match &modal.task_id {
            Some(task_id) => SubmitTarget::Update { task_id },
            None => SubmitTarget::Create,
        };

        let result = self
            .task_service
            .submit_task(
                target,
                &form,
                self.store.users.all(),
                &self.ext_cxn,
                &HttpTaskWriter,
            )
            .await;
        let result = match result {
            Err(TaskError::Invalid(issues)) => return Err(domain::Error::Invalid(issues)),
            other => other,
        };

        self.modal.close();
        self.form = None;

        match result {
            Ok(saved) => {
                if let Err(err) = self.drafts.clear() {
                    warn!(error = %format!("{err:#}"), "could not clear the task draft");
                }
                self.queries.invalidate_tasks();
                self.notifications.success(if modal.is_create() {
                    "Task created"
                } else {
                    "Task updated"
                });
                info!(board_id = %saved.board_id, "task saved");

                Ok(modal.navigation_after_save(&saved.board_id))
            }
            Err(err) => {
                self.notifications.error(if modal.is_create() {
                    "Could not create the task. Check the details and try again."
                } else {
                    "Could not update the task."
                });
                Err(err.into())
            }
        }
    }

    /// Closes the modal without saving and throws the draft away
    pub fn cancel(&mut self) {
        self.modal.close();
        self.form = None;
        if let Err(err) = self.drafts.clear() {
            warn!(error = %format!("{err:#}"), "could not clear the task draft");
        }
    }

    /// Leaves the edit modal for the board the task is on
    pub fn go_to_board(&mut self) -> Option<Navigation> {
        let navigation = self.modal.current()?.go_to_board()?;
        self.modal.close();
        self.form = None;
        Some(navigation)
    }

    /// Moves a dropped card to its new column locally, before the server hears about it. Returns
    /// the change to send, or `None` if the drop changes nothing.
    pub fn apply_drop(&mut self, drop: &DropRequest) -> Option<StatusChange> {
        let to = drop.target_status()?;
        let Some(from) = self.store.set_task_status(&drop.task_id, to) else {
            warn!(task_id = %drop.task_id, "dropped task is not in any store");
            return None;
        };

        Some(StatusChange {
            task_id: drop.task_id.clone(),
            from,
            to,
        })
    }

    /// Sends a status change to the server. Task queries are invalidated whatever the outcome;
    /// a failure is reported but the local change stays until the next refresh.
    pub async fn commit_status_change(
        &mut self,
        change: &StatusChange,
    ) -> Result<(), domain::Error> {
        let result = self
            .task_service
            .change_status(&change.task_id, change.to, &self.ext_cxn, &HttpTaskWriter)
            .await;
        self.queries.invalidate_tasks();

        result.map_err(|err| {
            self.notifications
                .error("Could not change the task's status.");
            domain::Error::comms_failure("change the task's status", err)
        })
    }

    /// [Self::apply_drop] followed by [Self::commit_status_change]
    pub async fn drop_task(
        &mut self,
        drop: &DropRequest,
    ) -> Result<Option<StatusChange>, domain::Error> {
        let Some(change) = self.apply_drop(drop) else {
            return Ok(None);
        };

        self.commit_status_change(&change).await?;
        Ok(Some(change))
    }

    pub fn board_view(&self, board_id: &str) -> BoardView {
        BoardView::build(&self.store, board_id)
    }

    pub fn issue_list(&self, filter: &IssueFilter, sort: IssueSort) -> Vec<IssueRow> {
        issue_rows(&self.store, filter, sort)
    }

    pub fn boards_list(&self) -> Vec<BoardSummary> {
        board_summaries(&self.store)
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }

    pub fn store(&self) -> &AppStore {
        &self.store
    }

    pub fn queries(&self) -> &QueryCache {
        &self.queries
    }

    pub fn modal(&self) -> &ModalState {
        &self.modal
    }

    /// Current values of the open form, `None` while the modal is closed
    pub fn form(&self) -> Option<&TaskForm> {
        self.form.as_ref()
    }

    pub fn drafts(&self) -> &D {
        &self.drafts
    }
}
