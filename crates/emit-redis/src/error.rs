//! Error types for the Redis emitter.

use thiserror::Error;

/// Errors that can occur while emitting events.
#[derive(Error, Debug)]
pub enum EmitError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to parse config YAML: {0}")]
    ConfigYaml(#[from] serde_yaml::Error),

    #[error("Generator error: {0}")]
    Generator(#[from] stream_event_generator::GeneratorError),

    #[error("Encoding error: {0}")]
    Encoding(String),
}
