use thiserror::Error;

/// 外围错误 (配置/数据加载), 核心计算本身不会失败
#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid ABC thresholds: a_limit={a_limit}, b_limit={b_limit} (need 0 <= a <= b <= 100)")]
    InvalidThresholds { a_limit: String, b_limit: String },

    #[error("failed to read dataset {path}: {source}")]
    DatasetIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dataset: {0}")]
    DatasetParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
