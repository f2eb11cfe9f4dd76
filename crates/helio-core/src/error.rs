use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HelioError {
    #[error("Shader chunk not found: {0}")]
    ShaderChunkNotFound(String),

    #[error("Shader include cycle through chunk: {0}")]
    IncludeCycle(String),

    #[error("Shader includes nested deeper than {0} levels")]
    IncludeDepthExceeded(usize),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type Result<T> = std::result::Result<T, HelioError>;
