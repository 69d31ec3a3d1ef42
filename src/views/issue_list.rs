use crate::domain::task::{Task, TaskStatus, parse_positive_id};
use crate::domain::user::User;
use crate::state::store::AppStore;
use std::cmp::Ordering;

/// Narrows the issue list. Empty/`None` criteria match everything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IssueFilter {
    /// Case-insensitive match against title and description
    pub search: Option<String>,
    pub statuses: Vec<TaskStatus>,
    pub board_ids: Vec<String>,
    pub assignee_id: Option<String>,
}

impl IssueFilter {
    fn matches(&self, task: &Task) -> bool {
        let search_matches = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(needle) => {
                let needle = needle.to_lowercase();
                task.title.to_lowercase().contains(&needle)
                    || task.description.to_lowercase().contains(&needle)
            }
        };

        search_matches
            && (self.statuses.is_empty() || self.statuses.contains(&task.status))
            && (self.board_ids.is_empty() || self.board_ids.contains(&task.board_id))
            && self
                .assignee_id
                .as_ref()
                .is_none_or(|assignee| *assignee == task.assignee_id)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortField {
    #[default]
    Id,
    Title,
    Priority,
    Status,
    Board,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IssueSort {
    pub field: SortField,
    pub direction: SortDirection,
}

/// One row of the issue table, with references resolved for display
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IssueRow {
    pub task: Task,
    pub assignee_name: Option<String>,
    pub board_title: Option<String>,
}

/// Numeric IDs sort numerically; anything else falls back to string order after them
fn compare_ids(left: &str, right: &str) -> Ordering {
    match (parse_positive_id(left), parse_positive_id(right)) {
        (Some(left_num), Some(right_num)) => left_num.cmp(&right_num),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => left.cmp(right),
    }
}

pub fn issue_rows(store: &AppStore, filter: &IssueFilter, sort: IssueSort) -> Vec<IssueRow> {
    let users = store.users.all();
    let boards = store.boards.all();

    let mut rows: Vec<IssueRow> = store
        .tasks
        .all()
        .iter()
        .filter(|task| filter.matches(task))
        .map(|task| IssueRow {
            task: task.clone(),
            assignee_name: User::display_name(users, &task.assignee_id).map(str::to_owned),
            board_title: task.board_name.clone().or_else(|| {
                boards
                    .iter()
                    .find(|board| board.id == task.board_id)
                    .map(|board| board.title.clone())
            }),
        })
        .collect();

    rows.sort_by(|left, right| {
        let by_field = match sort.field {
            SortField::Id => Ordering::Equal,
            SortField::Title => left
                .task
                .title
                .to_lowercase()
                .cmp(&right.task.title.to_lowercase()),
            SortField::Priority => left.task.priority.cmp(&right.task.priority),
            SortField::Status => left.task.status.cmp(&right.task.status),
            SortField::Board => left.board_title.cmp(&right.board_title),
        }
        .then_with(|| compare_ids(&left.task.id, &right.task.id));

        match sort.direction {
            SortDirection::Ascending => by_field,
            SortDirection::Descending => by_field.reverse(),
        }
    });

    rows
}
