use bigdecimal::{BigDecimal, Zero};
use crate::models::{BandSummary, ClassifiedEntity, EntityCatalog, SaleRecord};
use crate::service::aggregation::{aggregate_customers, aggregate_products};
use crate::service::cache::TtlCache;
use crate::service::classification::{classify_abc_with, summarize_bands, AbcThresholds};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// 缺少展示信息时使用的占位名称
pub const UNKNOWN_CUSTOMER_LABEL: &str = "Unregistered customer";
pub const UNKNOWN_PRODUCT_LABEL: &str = "Unregistered product";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveKind {
    Customer,
    Product,
}

impl fmt::Display for CurveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveKind::Customer => f.write_str("customer"),
            CurveKind::Product => f.write_str("product"),
        }
    }
}

/// 报表行: 分级结果 + 展示信息
#[derive(Debug, Clone, Serialize)]
pub struct AbcReportRow {
    #[serde(flatten)]
    pub classified: ClassifiedEntity,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// 是否找到主数据
    pub registered: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AbcReport {
    pub kind: CurveKind,
    pub grand_total: BigDecimal,
    pub bands: Vec<BandSummary>,
    pub rows: Vec<AbcReportRow>,
}

/// ABC 报表服务: 聚合 -> 分级 -> 补充展示信息 -> 汇总, 结果按 key 缓存
pub struct AbcReportService {
    thresholds: AbcThresholds,
    cache: Arc<TtlCache<String, Arc<AbcReport>>>,
}

impl AbcReportService {
    pub fn new(thresholds: AbcThresholds, cache: Arc<TtlCache<String, Arc<AbcReport>>>) -> Self {
        Self { thresholds, cache }
    }

    pub fn thresholds(&self) -> &AbcThresholds {
        &self.thresholds
    }

    /// 客户 ABC 曲线
    pub fn customer_curve(&self, key: &str, sales: &[SaleRecord], catalog: &EntityCatalog) -> Arc<AbcReport> {
        self.cached(CurveKind::Customer, key, || {
            let classified = classify_abc_with(aggregate_customers(sales), &self.thresholds);
            let rows = classified
                .into_iter()
                .map(|c| {
                    let info = catalog.customer(&c.entity.entity_id);
                    AbcReportRow {
                        label: info
                            .map(|i| i.name.clone())
                            .unwrap_or_else(|| UNKNOWN_CUSTOMER_LABEL.to_string()),
                        sku: None,
                        registered: info.is_some(),
                        classified: c,
                    }
                })
                .collect();
            build_report(CurveKind::Customer, rows)
        })
    }

    /// 商品 ABC 曲线
    pub fn product_curve(&self, key: &str, sales: &[SaleRecord], catalog: &EntityCatalog) -> Arc<AbcReport> {
        self.cached(CurveKind::Product, key, || {
            let classified = classify_abc_with(aggregate_products(sales), &self.thresholds);
            let rows = classified
                .into_iter()
                .map(|c| {
                    let info = catalog.product(&c.entity.entity_id);
                    AbcReportRow {
                        label: info
                            .map(|i| i.name.clone())
                            .unwrap_or_else(|| UNKNOWN_PRODUCT_LABEL.to_string()),
                        sku: info.and_then(|i| i.sku.clone()),
                        registered: info.is_some(),
                        classified: c,
                    }
                })
                .collect();
            build_report(CurveKind::Product, rows)
        })
    }

    fn cached<F>(&self, kind: CurveKind, key: &str, build: F) -> Arc<AbcReport>
    where
        F: FnOnce() -> AbcReport,
    {
        let cache_key = format!("{}:{}", kind, key);
        let purged = self.cache.purge_expired();
        if purged > 0 {
            tracing::debug!("[ABC] 清理过期报表缓存 {} 项", purged);
        }
        self.cache.get_or_insert_with(cache_key, || {
            let report = build();
            let missing = report.rows.iter().filter(|r| !r.registered).count();
            tracing::info!(
                "[ABC] {} 曲线: {} 行, 总额 {}, 缺少主数据 {}",
                kind,
                report.rows.len(),
                report.grand_total,
                missing
            );
            Arc::new(report)
        })
    }
}

fn build_report(kind: CurveKind, rows: Vec<AbcReportRow>) -> AbcReport {
    let classified: Vec<ClassifiedEntity> = rows.iter().map(|r| r.classified.clone()).collect();
    let grand_total = classified
        .iter()
        .fold(BigDecimal::zero(), |acc, c| acc + &c.entity.total_value);

    AbcReport {
        kind,
        grand_total,
        bands: summarize_bands(&classified),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CurveBand, CustomerInfo, LineItem, ProductInfo};
    use chrono::{Duration, NaiveDate};

    fn dec(v: i64) -> BigDecimal {
        BigDecimal::from(v)
    }

    fn sale(id: &str, customer: &str, total: i64, items: Vec<(&str, i64, i64)>) -> SaleRecord {
        SaleRecord {
            id: id.to_string(),
            customer_id: customer.to_string(),
            seller_id: "s1".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            status: "approved".to_string(),
            total_value: Some(dec(total)),
            discount_percent: None,
            price_list_id: None,
            line_items: items
                .into_iter()
                .map(|(p, q, v)| LineItem {
                    product_id: p.to_string(),
                    sku: None,
                    description: None,
                    quantity: Some(dec(q)),
                    subtotal: Some(dec(v)),
                })
                .collect(),
        }
    }

    fn service() -> AbcReportService {
        AbcReportService::new(
            AbcThresholds::default(),
            Arc::new(TtlCache::new(Duration::minutes(5))),
        )
    }

    fn catalog() -> EntityCatalog {
        EntityCatalog::new(
            vec![CustomerInfo {
                id: "c1".to_string(),
                name: "Mercado Central".to_string(),
                state: Some("SP".to_string()),
            }],
            vec![ProductInfo {
                id: "p1".to_string(),
                name: "Cafe 500g".to_string(),
                sku: Some("CAF-500".to_string()),
            }],
        )
    }

    #[test]
    fn unknown_customers_keep_their_row() {
        let sales = vec![sale("1", "c1", 800, vec![]), sale("2", "ghost", 200, vec![])];

        let report = service().customer_curve("t", &sales, &catalog());

        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].label, "Mercado Central");
        assert!(report.rows[0].registered);
        assert_eq!(report.rows[1].label, UNKNOWN_CUSTOMER_LABEL);
        assert!(!report.rows[1].registered);
        assert_eq!(report.rows[1].classified.curve_band, CurveBand::B);
        assert_eq!(report.grand_total, dec(1000));
    }

    #[test]
    fn product_rows_carry_sku_and_quantity() {
        let sales = vec![
            sale("1", "c1", 0, vec![("p1", 2, 60), ("p2", 1, 40)]),
            sale("2", "c1", 0, vec![("p1", 1, 30)]),
        ];

        let report = service().product_curve("t", &sales, &catalog());

        assert_eq!(report.kind, CurveKind::Product);
        assert_eq!(report.rows[0].sku.as_deref(), Some("CAF-500"));
        assert_eq!(report.rows[0].classified.entity.total_quantity, Some(dec(3)));
        assert_eq!(report.rows[1].label, UNKNOWN_PRODUCT_LABEL);
        assert_eq!(report.bands.len(), 3);
    }

    #[test]
    fn stale_reports_for_other_keys_are_evicted() {
        use crate::service::cache::Clock;
        use chrono::{DateTime, Utc};
        use std::sync::Mutex;

        struct StepClock(Mutex<DateTime<Utc>>);
        impl Clock for StepClock {
            fn now(&self) -> DateTime<Utc> {
                *self.0.lock().unwrap()
            }
        }

        let clock = Arc::new(StepClock(Mutex::new(Utc::now())));
        let svc = AbcReportService::new(
            AbcThresholds::default(),
            Arc::new(TtlCache::with_clock(Duration::minutes(5), clock.clone())),
        );
        let sales = vec![sale("1", "c1", 100, vec![])];

        svc.customer_curve("jan", &sales, &catalog());
        svc.customer_curve("feb", &sales, &catalog());
        assert_eq!(svc.cache.len(), 2);

        {
            let mut now = clock.0.lock().unwrap();
            *now = *now + Duration::minutes(6);
        }
        svc.customer_curve("mar", &sales, &catalog());

        assert_eq!(svc.cache.len(), 1);
    }

    #[test]
    fn reports_are_cached_per_kind_and_key() {
        let svc = service();
        let sales = vec![sale("1", "c1", 100, vec![("p1", 1, 100)])];

        let first = svc.customer_curve("jan", &sales, &catalog());
        let again = svc.customer_curve("jan", &[], &catalog());
        let products = svc.product_curve("jan", &sales, &catalog());

        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(products.kind, CurveKind::Product);
        assert_eq!(svc.cache.len(), 2);
    }
}
