use crate::domain::board::Board;
use crate::domain::board::driven_ports::BoardReader;
use crate::domain::task::Task;
use crate::domain::task::driven_ports::TaskReader;
use crate::domain::user::User;
use crate::domain::user::driven_ports::UserReader;
use crate::external_connections::ExternalConnectivity;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// One snapshot of every collection the client displays
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    pub users: Vec<User>,
    pub boards: Vec<Board>,
    pub tasks: Vec<Task>,
}

/// Fetches users, boards and tasks concurrently. The three requests race independently; each
/// degrades to an empty list on its own. Returns `None` if [cancel] fired while loading, in which
/// case the results should be discarded rather than applied.
pub async fn load_catalog(
    ext_cxn: &impl ExternalConnectivity,
    user_read: &impl UserReader,
    board_read: &impl BoardReader,
    task_read: &impl TaskReader,
    cancel: &CancellationToken,
) -> Option<Catalog> {
    let (users, boards, tasks) = futures::join!(
        user_read.all_users(ext_cxn, cancel),
        board_read.all_boards(ext_cxn, cancel),
        task_read.all_tasks(ext_cxn, cancel),
    );

    if cancel.is_cancelled() {
        debug!("catalog load cancelled, discarding results");
        return None;
    }

    info!(
        users = users.len(),
        boards = boards.len(),
        tasks = tasks.len(),
        "loaded catalog"
    );
    Some(Catalog {
        users,
        boards,
        tasks,
    })
}
