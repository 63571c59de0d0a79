use bigdecimal::{BigDecimal, Zero};
use crate::models::{
    CommissionResolution, PriceList, PriceListCommission, SaleCommission, SaleRecord,
    SellerCommissionRule, UnresolvedReason,
};
use indexmap::IndexMap;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;

impl CommissionResolution {
    fn resolved(sale: &SaleRecord, percent: BigDecimal) -> Self {
        let value = sale.value() * &percent / BigDecimal::from(100);
        Self {
            percent,
            value,
            resolved: true,
            reason: None,
        }
    }

    fn unresolved(reason: UnresolvedReason) -> Self {
        Self {
            percent: BigDecimal::zero(),
            value: BigDecimal::zero(),
            resolved: false,
            reason: Some(reason),
        }
    }
}

/// 解析单笔订单的佣金比例
///
/// 固定比例直接采用销售员配置; 否则按订单价目表: 固定比例或按折扣区间
/// (按输入顺序取第一个命中的区间)。价目表缺失或无区间命中时返回未解析结果。
pub fn resolve_commission(
    sale: &SaleRecord,
    seller_rule: &SellerCommissionRule,
    price_list: Option<&PriceList>,
) -> CommissionResolution {
    if let SellerCommissionRule::FixedRate { fixed_rate_percent } = seller_rule {
        return CommissionResolution::resolved(sale, fixed_rate_percent.clone());
    }

    let Some(price_list) = price_list else {
        return CommissionResolution::unresolved(UnresolvedReason::PriceListMissing {
            sale_id: sale.id.clone(),
            price_list_id: sale.price_list_id.clone(),
        });
    };

    match &price_list.commission {
        PriceListCommission::Fixed { fixed_percent } => {
            CommissionResolution::resolved(sale, fixed_percent.clone())
        }
        PriceListCommission::ByDiscountTier { tiers } => {
            let discount = sale.discount();
            match tiers.iter().find(|t| t.contains(&discount)) {
                Some(tier) => CommissionResolution::resolved(sale, tier.commission_percent.clone()),
                None => CommissionResolution::unresolved(UnresolvedReason::NoMatchingTier {
                    sale_id: sale.id.clone(),
                    price_list_id: price_list.id.clone(),
                    discount: discount.to_string(),
                }),
            }
        }
    }
}

/// 批量重算结果
#[derive(Debug, Clone, Serialize)]
pub struct CommissionBatchReport {
    pub entries: Vec<SaleCommission>,
    pub unresolved_count: usize,
    pub total_commission: BigDecimal,
    /// 销售员 -> 已解析佣金合计 (首次出现顺序)
    pub by_seller: IndexMap<String, BigDecimal>,
}

/// 批量重算佣金: 单笔未解析不会中断批次, 只计入 unresolved_count
pub fn recalculate_commissions(
    sales: &[SaleRecord],
    sellers: &HashMap<String, SellerCommissionRule>,
    price_lists: &HashMap<String, PriceList>,
) -> CommissionBatchReport {
    let entries: Vec<SaleCommission> = sales
        .par_iter()
        .map(|sale| {
            let resolution = match sellers.get(&sale.seller_id) {
                Some(rule) => {
                    let price_list = sale
                        .price_list_id
                        .as_ref()
                        .and_then(|id| price_lists.get(id));
                    resolve_commission(sale, rule, price_list)
                }
                None => CommissionResolution::unresolved(UnresolvedReason::SellerRuleMissing {
                    seller_id: sale.seller_id.clone(),
                }),
            };

            if let Some(reason) = &resolution.reason {
                tracing::warn!("[Commission] 未解析: {}", reason);
            }

            SaleCommission {
                sale_id: sale.id.clone(),
                seller_id: sale.seller_id.clone(),
                resolution,
            }
        })
        .collect();

    let mut unresolved_count = 0usize;
    let mut total_commission = BigDecimal::zero();
    let mut by_seller: IndexMap<String, BigDecimal> = IndexMap::new();

    for entry in &entries {
        if !entry.resolution.resolved {
            unresolved_count += 1;
            continue;
        }
        total_commission += &entry.resolution.value;
        *by_seller
            .entry(entry.seller_id.clone())
            .or_insert_with(BigDecimal::zero) += &entry.resolution.value;
    }

    tracing::info!(
        "[Commission] 重算完成: 订单 {}, 未解析 {}, 佣金合计 {}",
        entries.len(),
        unresolved_count,
        total_commission
    );

    CommissionBatchReport {
        entries,
        unresolved_count,
        total_commission,
        by_seller,
    }
}
