use serde::{Deserialize, Serialize};

/// A person tasks can be assigned to
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub description: Option<String>,
    pub tasks_count: Option<u32>,
    pub team_id: Option<String>,
    pub team_name: Option<String>,
}

impl User {
    /// Looks up the display name of the user with the given ID in [users]
    pub fn display_name<'users>(users: &'users [User], user_id: &str) -> Option<&'users str> {
        users
            .iter()
            .find(|user| user.id == user_id)
            .map(|user| user.name.as_str())
    }
}

pub mod driven_ports {
    use super::*;
    use crate::external_connections::ExternalConnectivity;
    use tokio_util::sync::CancellationToken;

    pub trait UserReader {
        /// Fetches every user. Never fails: communication problems and cancellation
        /// both produce an empty list.
        async fn all_users(
            &self,
            ext_cxn: &impl ExternalConnectivity,
            cancel: &CancellationToken,
        ) -> Vec<User>;
    }
}

#[cfg(test)]
pub mod test_util {
    use super::*;
    use crate::domain::test_util::Connectivity;
    use crate::external_connections::ExternalConnectivity;
    use std::sync::RwLock;
    use tokio_util::sync::CancellationToken;

    pub struct InMemoryUserPersistence {
        pub users: Vec<User>,
        pub connected: Connectivity,
    }

    impl InMemoryUserPersistence {
        pub fn new_with_users(users: &[User]) -> RwLock<InMemoryUserPersistence> {
            RwLock::new(InMemoryUserPersistence {
                users: users.to_vec(),
                connected: Connectivity::Connected,
            })
        }
    }

    impl driven_ports::UserReader for RwLock<InMemoryUserPersistence> {
        async fn all_users(
            &self,
            _ext_cxn: &impl ExternalConnectivity,
            cancel: &CancellationToken,
        ) -> Vec<User> {
            let persistence = self.read().expect("user persist rw lock poisoned");
            if cancel.is_cancelled() || persistence.connected.blow_up_if_disconnected().is_err() {
                return Vec::new();
            }

            persistence.users.clone()
        }
    }

    pub fn user(id: &str, name: &str) -> User {
        User {
            id: id.to_owned(),
            name: name.to_owned(),
            ..User::default()
        }
    }
}
