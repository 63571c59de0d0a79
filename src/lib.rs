pub mod config;
pub mod data;
pub mod error;
pub mod models;
pub mod service;

pub use self::config::AppConfig;
pub use data::Dataset;
pub use error::{AppError, Result};
pub use service::{
    classify_abc, classify_abc_with, recalculate_commissions, resolve_commission, AbcReportService,
    AbcThresholds, TtlCache,
};
