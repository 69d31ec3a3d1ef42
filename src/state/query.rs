use std::collections::HashMap;

/// Identifies one fetch whose result the client caches
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QueryKey {
    Users,
    Boards,
    Tasks,
    BoardTasks(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Freshness {
    Fresh,
    Stale,
}

/// Tracks which cached queries need to be fetched again. Queries that have never been fetched
/// aren't tracked, so invalidating them is a no-op.
#[derive(Clone, Debug, Default)]
pub struct QueryCache {
    states: HashMap<QueryKey, Freshness>,
}

impl QueryCache {
    pub fn mark_fresh(&mut self, key: QueryKey) {
        self.states.insert(key, Freshness::Fresh);
    }

    pub fn freshness(&self, key: &QueryKey) -> Option<Freshness> {
        self.states.get(key).copied()
    }

    pub fn invalidate(&mut self, key: &QueryKey) {
        if let Some(freshness) = self.states.get_mut(key) {
            *freshness = Freshness::Stale;
        }
    }

    /// Invalidates everything derived from task data: the task list and every board's tasks
    pub fn invalidate_tasks(&mut self) {
        for (key, freshness) in self.states.iter_mut() {
            if matches!(key, QueryKey::Tasks | QueryKey::BoardTasks(_)) {
                *freshness = Freshness::Stale;
            }
        }
    }

    /// Stale queries in a stable order
    pub fn stale_keys(&self) -> Vec<QueryKey> {
        let mut stale: Vec<QueryKey> = self
            .states
            .iter()
            .filter(|(_, freshness)| **freshness == Freshness::Stale)
            .map(|(key, _)| key.clone())
            .collect();
        stale.sort();
        stale
    }
}
