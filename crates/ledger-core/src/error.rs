pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    #[error("{kind} references unknown node id: {id}")]
    UnknownNode { kind: &'static str, id: String },

    #[error("flow graph contains a cycle through node {node}")]
    CyclicFlow { node: String },

    #[error("feedback loop {loop_id} references unknown dimension: {dimension}")]
    UnknownDimension { loop_id: String, dimension: String },

    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("fixture JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("fixture YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
