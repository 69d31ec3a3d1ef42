use serde::{Deserialize, Serialize};

/// A named collection of tasks, shown as status columns
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub task_count: Option<u32>,
}

pub mod driven_ports {
    use super::*;
    use crate::external_connections::ExternalConnectivity;
    use tokio_util::sync::CancellationToken;

    pub trait BoardReader {
        /// Fetches every board. Never fails: communication problems and cancellation
        /// both produce an empty list.
        async fn all_boards(
            &self,
            ext_cxn: &impl ExternalConnectivity,
            cancel: &CancellationToken,
        ) -> Vec<Board>;
    }
}
