use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 销售员佣金规则
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule_type", rename_all = "snake_case")]
pub enum SellerCommissionRule {
    /// 固定比例
    FixedRate { fixed_rate_percent: BigDecimal },
    /// 按订单价目表计算
    PriceList,
}

/// 销售员 -> 规则
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellerCommissionConfig {
    pub seller_id: String,
    pub rule: SellerCommissionRule,
}

/// 价目表佣金配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "commission_type", rename_all = "snake_case")]
pub enum PriceListCommission {
    Fixed { fixed_percent: BigDecimal },
    ByDiscountTier { tiers: Vec<DiscountTier> },
}

/// 折扣区间 [discount_min, discount_max], discount_max 为空表示无上限
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountTier {
    pub discount_min: BigDecimal,
    #[serde(default)]
    pub discount_max: Option<BigDecimal>,
    pub commission_percent: BigDecimal,
}

impl DiscountTier {
    pub fn contains(&self, discount: &BigDecimal) -> bool {
        discount >= &self.discount_min
            && self.discount_max.as_ref().map_or(true, |max| discount <= max)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceList {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub commission: PriceListCommission,
}

/// 无法确定佣金比例的原因
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnresolvedReason {
    #[error("seller {seller_id} has no commission rule")]
    SellerRuleMissing { seller_id: String },
    #[error("sale {sale_id}: price list {price_list_id:?} not found")]
    PriceListMissing {
        sale_id: String,
        price_list_id: Option<String>,
    },
    #[error("sale {sale_id}: no tier of price list {price_list_id} matches discount {discount}%")]
    NoMatchingTier {
        sale_id: String,
        price_list_id: String,
        discount: String,
    },
}

/// 单笔订单的佣金解析结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommissionResolution {
    pub percent: BigDecimal,
    pub value: BigDecimal,
    pub resolved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<UnresolvedReason>,
}

/// 批量重算中的单笔记录
#[derive(Debug, Clone, Serialize)]
pub struct SaleCommission {
    pub sale_id: String,
    pub seller_id: String,
    #[serde(flatten)]
    pub resolution: CommissionResolution,
}
