use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 客户展示信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub state: Option<String>, // UF
}

/// 商品展示信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
}

/// 展示元数据查找表, 缺失时由调用方使用占位名称
#[derive(Debug, Clone, Default)]
pub struct EntityCatalog {
    customers: HashMap<String, CustomerInfo>,
    products: HashMap<String, ProductInfo>,
}

impl EntityCatalog {
    pub fn new(customers: Vec<CustomerInfo>, products: Vec<ProductInfo>) -> Self {
        Self {
            customers: customers.into_iter().map(|c| (c.id.clone(), c)).collect(),
            products: products.into_iter().map(|p| (p.id.clone(), p)).collect(),
        }
    }

    pub fn customer(&self, id: &str) -> Option<&CustomerInfo> {
        self.customers.get(id)
    }

    pub fn product(&self, id: &str) -> Option<&ProductInfo> {
        self.products.get(id)
    }
}
