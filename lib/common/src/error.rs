use thiserror::Error;
#[derive(Error, Debug)]
pub enum PlayerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Engine error: {0}")]
    Engine(String),

    #[error("Engine reply was not valid JSON: {0}")]
    EngineReply(#[from] serde_json::Error),

    #[error("Engine refused command: {0}")]
    EngineRefused(String),

    #[error("Unsupported media source: {0}")]
    UnsupportedSource(String),

    #[error("Search error: {0}")]
    Search(String),
}
