use crate::state::store::AppStore;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardSummary {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub task_count: usize,
}

/// Every board with its task count. The server's count is trusted when it sends one.
pub fn board_summaries(store: &AppStore) -> Vec<BoardSummary> {
    store
        .boards
        .all()
        .iter()
        .map(|board| BoardSummary {
            id: board.id.clone(),
            title: board.title.clone(),
            description: board.description.clone(),
            task_count: board.task_count.map(|count| count as usize).unwrap_or_else(|| {
                store
                    .tasks
                    .all()
                    .iter()
                    .filter(|task| task.board_id == board.id)
                    .count()
            }),
        })
        .collect()
}
