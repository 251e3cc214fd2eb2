use thiserror::Error;

#[derive(Error, Debug)]
pub enum VectorError {
    #[error("{name} must be within [0, 1], got {value}")]
    TrimOutOfRange { name: &'static str, value: f32 },
    #[error("Playback speed must be a positive finite number, got {0}")]
    InvalidSpeed(f32),
    #[error("Invalid player configuration: {0}")]
    Config(#[from] serde_json::Error),
}
