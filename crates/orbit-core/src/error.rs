use thiserror::Error;

/// Failures while turning external tool data into typed [`crate::Tool`] values.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("malformed catalog json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("tool record {index} has no name")]
    MissingName { index: usize },
    #[error("tool record {index} is malformed: {source}")]
    BadRecord {
        index: usize,
        source: serde_json::Error,
    },
    #[error("catalog contains no usable tools")]
    Empty,
}

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("cannot build a scene without tools")]
    NoTools,
    #[error("spline path needs at least {needed} control points, got {got}")]
    SplineTooShort { needed: usize, got: usize },
    #[error("unknown scene preset `{0}`")]
    UnknownPreset(String),
}
