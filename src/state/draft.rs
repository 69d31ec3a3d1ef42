use crate::domain::task::TaskForm;
use anyhow::Context;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::warn;

/// Fixed key the single draft slot is stored under
pub const DRAFT_KEY: &str = "taskDraft";

/// Single-slot storage for the unsaved task form. Last writer wins.
pub trait DraftStore {
    /// The saved draft, if there is a readable one
    fn load(&self) -> Option<TaskForm>;
    fn save(&self, draft: &TaskForm) -> Result<(), anyhow::Error>;
    fn clear(&self) -> Result<(), anyhow::Error>;
}

/// Keeps the draft as JSON in `taskDraft.json` so it survives restarts
pub struct FileDraftStore {
    path: PathBuf,
}

impl FileDraftStore {
    pub fn in_dir(dir: &Path) -> Self {
        FileDraftStore {
            path: dir.join(format!("{DRAFT_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DraftStore for FileDraftStore {
    fn load(&self) -> Option<TaskForm> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return None,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "could not read task draft");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(draft) => Some(draft),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "ignoring unreadable task draft");
                None
            }
        }
    }

    fn save(&self, draft: &TaskForm) -> Result<(), anyhow::Error> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context("creating the draft directory")?;
        }
        let encoded = serde_json::to_string(draft).context("encoding the task draft")?;
        fs::write(&self.path, encoded).context("writing the task draft")?;
        Ok(())
    }

    fn clear(&self) -> Result<(), anyhow::Error> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).context("removing the task draft"),
        }
    }
}

/// Draft slot that lives only as long as the process
#[derive(Default)]
pub struct InMemoryDraftStore {
    slot: Mutex<Option<TaskForm>>,
}

impl DraftStore for InMemoryDraftStore {
    fn load(&self) -> Option<TaskForm> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn save(&self, draft: &TaskForm) -> Result<(), anyhow::Error> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(draft.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), anyhow::Error> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::test_util::complete_form;
    use crate::domain::task::{TaskPriority, TaskStatus};
    use speculoos::prelude::*;

    #[test]
    fn file_draft_survives_new_store_instance() {
        let dir = tempfile::tempdir().expect("temp dir should be creatable");
        FileDraftStore::in_dir(dir.path())
            .save(&complete_form())
            .expect("draft should save");

        let reopened = FileDraftStore::in_dir(dir.path());
        assert_that!(reopened.load()).is_some().is_equal_to(complete_form());
    }

    #[test]
    fn file_draft_uses_camel_case_json() {
        let dir = tempfile::tempdir().expect("temp dir should be creatable");
        let store = FileDraftStore::in_dir(dir.path());
        store.save(&complete_form()).expect("draft should save");

        let raw = fs::read_to_string(store.path()).expect("draft file should exist");
        let json: serde_json::Value = serde_json::from_str(&raw).expect("draft should be JSON");
        assert_eq!("3", json["assigneeId"]);
        assert_eq!("inprogress", json["status"]);
        assert!(store.path().ends_with("taskDraft.json"));
    }

    #[test]
    fn partial_draft_loads_with_empty_fields() {
        let dir = tempfile::tempdir().expect("temp dir should be creatable");
        let store = FileDraftStore::in_dir(dir.path());
        fs::write(store.path(), r#"{"title":"Half done","priority":"low"}"#)
            .expect("draft file should be writable");

        assert_that!(store.load()).is_some().is_equal_to(TaskForm {
            title: "Half done".to_owned(),
            priority: Some(TaskPriority::Low),
            ..TaskForm::default()
        });
    }

    #[test]
    fn corrupt_draft_is_ignored() {
        let dir = tempfile::tempdir().expect("temp dir should be creatable");
        let store = FileDraftStore::in_dir(dir.path());
        fs::write(store.path(), "{not json").expect("draft file should be writable");

        assert_that!(store.load()).is_none();
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = tempfile::tempdir().expect("temp dir should be creatable");
        let store = FileDraftStore::in_dir(dir.path());
        store.save(&complete_form()).expect("draft should save");

        assert_that!(store.clear()).is_ok();
        assert_that!(store.clear()).is_ok();
        assert_that!(store.load()).is_none();
    }

    #[test]
    fn in_memory_slot_keeps_last_write() {
        let store = InMemoryDraftStore::default();
        store.save(&complete_form()).expect("save can't fail");
        let newer = TaskForm {
            status: Some(TaskStatus::Done),
            ..complete_form()
        };
        store.save(&newer).expect("save can't fail");

        assert_that!(store.load()).is_some().is_equal_to(newer);
    }
}
