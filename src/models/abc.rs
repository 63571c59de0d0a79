use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// ABC 曲线分级
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CurveBand {
    A,
    B,
    C,
}

impl CurveBand {
    pub const ALL: [CurveBand; 3] = [CurveBand::A, CurveBand::B, CurveBand::C];
}

impl fmt::Display for CurveBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CurveBand::A => "A",
            CurveBand::B => "B",
            CurveBand::C => "C",
        };
        f.write_str(s)
    }
}

/// 聚合结果 (客户或商品维度)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedEntity {
    pub entity_id: String,
    pub total_value: BigDecimal,
    /// 仅商品维度有数量
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_quantity: Option<BigDecimal>,
}

impl AggregatedEntity {
    pub fn new(entity_id: impl Into<String>, total_value: BigDecimal) -> Self {
        Self {
            entity_id: entity_id.into(),
            total_value,
            total_quantity: None,
        }
    }
}

/// 分级结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedEntity {
    #[serde(flatten)]
    pub entity: AggregatedEntity,
    pub share_percent: BigDecimal,            // 占比 (%)
    pub cumulative_share_percent: BigDecimal, // 累计占比 (%)
    pub curve_band: CurveBand,
}

/// 分级汇总 (报表表头)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandSummary {
    pub band: CurveBand,
    pub entity_count: usize,
    pub total_value: BigDecimal,
    pub share_percent: BigDecimal,
}
