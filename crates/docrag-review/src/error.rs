#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse failed: {0}")]
    Config(#[from] toml::de::Error),

    #[error("LLM error: {0}")]
    Llm(#[from] docrag_llm::LlmError),
}

pub type Result<T> = std::result::Result<T, ReviewError>;
