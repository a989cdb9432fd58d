use thiserror::Error;

pub type Result<T> = std::result::Result<T, MindflowError>;

#[derive(Debug, Error)]
pub enum MindflowError {
    #[error("input validation failed for flow `{flow}`: {message} at {}", format_path(.path))]
    Validation {
        flow: String,
        message: String,
        path: Vec<String>,
    },
    #[error("output contract violated for flow `{flow}`: {message} at {}", format_path(.path))]
    ContractViolation {
        flow: String,
        message: String,
        path: Vec<String>,
    },
    #[error("flow `{0}` not registered")]
    FlowNotRegistered(String),
    #[error("flow `{0}` already registered")]
    DuplicateFlow(String),
    #[error("template error: {0}")]
    Template(String),
    #[error("invalid media payload: {0}")]
    Media(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn format_path(path: &[String]) -> String {
    if path.is_empty() {
        "$".to_string()
    } else {
        format!("$.{}", path.join("."))
    }
}
