use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Section not found: {0}")]
    UnknownSection(String),

    #[error("Layout node not found: {0}")]
    UnknownNode(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
