use thiserror::Error;
use validator::ValidationErrors;

pub mod board;
pub mod catalog;
pub mod task;
pub mod user;

#[cfg(test)]
pub mod test_util;

#[derive(Error, Debug)]
pub enum Error {
    #[error("input was invalid: {0}")]
    Invalid(ValidationErrors),
    #[error("requested data does not exist")]
    DoesNotExist,
    #[error("failed to {action} due to a communication failure: {cause}")]
    CommsFailure {
        action: String,
        #[source]
        cause: anyhow::Error,
    },
}

impl From<ValidationErrors> for Error {
    fn from(value: ValidationErrors) -> Self {
        Self::Invalid(value)
    }
}

impl Error {
    /// Wraps a driven port failure with a description of the [action] being attempted
    pub fn comms_failure(action: &str, cause: anyhow::Error) -> Self {
        Self::CommsFailure {
            action: action.into(),
            cause,
        }
    }
}

impl From<task::driving_ports::TaskError> for Error {
    fn from(value: task::driving_ports::TaskError) -> Self {
        match value {
            task::driving_ports::TaskError::Invalid(issues) => Self::Invalid(issues),
            task::driving_ports::TaskError::PortError(cause) => {
                Self::comms_failure("save the task", cause)
            }
        }
    }
}
