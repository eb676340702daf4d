//! Unified Error Model
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("CONFIG/{0}")]
    Config(String),

    #[error("TEMPLATE/{0}")]
    Template(String),

    #[error("NAMING/{0}")]
    Naming(String),

    #[error("SERIALIZE/{0}")]
    Serialize(String),

    #[error("IO/{0}")]
    Io(String),
}
