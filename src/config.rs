use bigdecimal::BigDecimal;
use crate::error::{AppError, Result};
use crate::service::AbcThresholds;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub abc: AbcConfig,
    pub cache: CacheConfig,
    pub data: DataConfig,
}

/// ABC 阈值 (累计占比 %)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbcConfig {
    pub a_limit: f64,
    pub b_limit: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub ttl_seconds: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            abc: AbcConfig {
                a_limit: 80.0,
                b_limit: 95.0,
            },
            cache: CacheConfig { ttl_seconds: 300 },
            data: DataConfig {
                path: "data/sample_sales.json".to_string(),
            },
        }
    }
}

impl AppConfig {
    /// 加载顺序: 默认值 -> config/crm.toml (可选) -> CRM__ 前缀环境变量
    /// 例: CRM__ABC__A_LIMIT=70
    pub fn load() -> Result<Self> {
        Self::load_from("config/crm")
    }

    pub fn load_from(file: &str) -> Result<Self> {
        let defaults = Self::default();
        let settings = config::Config::builder()
            .set_default("abc.a_limit", defaults.abc.a_limit)?
            .set_default("abc.b_limit", defaults.abc.b_limit)?
            .set_default("cache.ttl_seconds", defaults.cache.ttl_seconds)?
            .set_default("data.path", defaults.data.path)?
            .add_source(config::File::with_name(file).required(false))
            .add_source(
                config::Environment::with_prefix("CRM")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn thresholds(&self) -> Result<AbcThresholds> {
        let to_decimal = |v: f64| {
            BigDecimal::from_str(&v.to_string()).map_err(|_| AppError::InvalidThresholds {
                a_limit: self.abc.a_limit.to_string(),
                b_limit: self.abc.b_limit.to_string(),
            })
        };
        AbcThresholds::new(to_decimal(self.abc.a_limit)?, to_decimal(self.abc.b_limit)?)
    }

    pub fn cache_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.cache.ttl_seconds.max(0))
    }
}
