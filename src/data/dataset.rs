use crate::error::{AppError, Result};
use crate::models::{
    CustomerInfo, EntityCatalog, PriceList, ProductInfo, SaleRecord, SellerCommissionConfig,
    SellerCommissionRule,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// 已过滤的销售数据及其关联主数据 (JSON)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub sales: Vec<SaleRecord>,
    #[serde(default)]
    pub sellers: Vec<SellerCommissionConfig>,
    #[serde(default)]
    pub price_lists: Vec<PriceList>,
    #[serde(default)]
    pub customers: Vec<CustomerInfo>,
    #[serde(default)]
    pub products: Vec<ProductInfo>,
}

impl Dataset {
    /// 从 JSON 文件加载
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| AppError::DatasetIo {
            path: path.display().to_string(),
            source,
        })?;
        let dataset = Self::from_json(&raw)?;

        tracing::info!(
            "Dataset loaded from {}: {} 笔订单, {} 个销售员规则, {} 个价目表",
            path.display(),
            dataset.sales.len(),
            dataset.sellers.len(),
            dataset.price_lists.len()
        );
        Ok(dataset)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// 销售员ID -> 佣金规则 (重复ID以后者为准)
    pub fn seller_rules(&self) -> HashMap<String, SellerCommissionRule> {
        self.sellers
            .iter()
            .map(|s| (s.seller_id.clone(), s.rule.clone()))
            .collect()
    }

    /// 价目表ID -> 价目表
    pub fn price_list_index(&self) -> HashMap<String, PriceList> {
        self.price_lists
            .iter()
            .map(|p| (p.id.clone(), p.clone()))
            .collect()
    }

    pub fn catalog(&self) -> EntityCatalog {
        EntityCatalog::new(self.customers.clone(), self.products.clone())
    }
}
