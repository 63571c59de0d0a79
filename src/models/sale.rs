use bigdecimal::{BigDecimal, Zero};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 销售订单 (上游已按日期/状态/销售员/地区过滤)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleRecord {
    pub id: String,
    pub customer_id: String,
    pub seller_id: String,
    pub date: NaiveDate,
    pub status: String,
    #[serde(default)]
    pub total_value: Option<BigDecimal>,     // 订单金额
    #[serde(default)]
    pub discount_percent: Option<BigDecimal>, // 折扣百分比
    #[serde(default)]
    pub price_list_id: Option<String>,       // 关联价目表
    #[serde(default)]
    pub line_items: Vec<LineItem>,
}

impl SaleRecord {
    /// 订单金额, 缺失视为 0
    pub fn value(&self) -> BigDecimal {
        self.total_value.clone().unwrap_or_else(BigDecimal::zero)
    }

    /// 折扣百分比, 缺失视为 0
    pub fn discount(&self) -> BigDecimal {
        self.discount_percent.clone().unwrap_or_else(BigDecimal::zero)
    }
}

/// 订单明细行
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub quantity: Option<BigDecimal>, // 数量
    #[serde(default)]
    pub subtotal: Option<BigDecimal>, // 小计金额
}

impl LineItem {
    pub fn value(&self) -> BigDecimal {
        self.subtotal.clone().unwrap_or_else(BigDecimal::zero)
    }

    pub fn qty(&self) -> BigDecimal {
        self.quantity.clone().unwrap_or_else(BigDecimal::zero)
    }
}
