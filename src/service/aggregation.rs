use bigdecimal::{BigDecimal, Zero};
use crate::models::{AggregatedEntity, SaleRecord};
use indexmap::IndexMap;

/// 聚合器 - 每个实体键一个累加器, 保持首次出现顺序
#[derive(Debug, Default)]
pub struct Aggregator {
    entries: IndexMap<String, AggregatedEntity>,
    track_quantity: bool,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 商品维度: 同时累计数量
    pub fn with_quantity() -> Self {
        Self {
            entries: IndexMap::new(),
            track_quantity: true,
        }
    }

    pub fn add(&mut self, key: &str, value: &BigDecimal, quantity: Option<&BigDecimal>) {
        let track_quantity = self.track_quantity;
        let entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| AggregatedEntity {
                entity_id: key.to_string(),
                total_value: BigDecimal::zero(),
                total_quantity: track_quantity.then(BigDecimal::zero),
            });

        entry.total_value += value;
        if let (Some(total), Some(qty)) = (entry.total_quantity.as_mut(), quantity) {
            *total += qty;
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_map(self) -> IndexMap<String, AggregatedEntity> {
        self.entries
    }

    pub fn into_entities(self) -> Vec<AggregatedEntity> {
        self.entries.into_values().collect()
    }
}

/// 通用聚合: 调用方提供 key / value 函数 (如 客户+UF 组合维度)
pub fn aggregate_by<T, K, V>(records: &[T], key_fn: K, value_fn: V) -> IndexMap<String, AggregatedEntity>
where
    K: Fn(&T) -> String,
    V: Fn(&T) -> BigDecimal,
{
    let mut aggregator = Aggregator::new();
    for record in records {
        aggregator.add(&key_fn(record), &value_fn(record), None);
    }
    aggregator.into_map()
}

/// 客户维度: 以订单为单位累计订单金额
pub fn aggregate_customers(sales: &[SaleRecord]) -> Vec<AggregatedEntity> {
    let entities = aggregate_by(sales, |s| s.customer_id.clone(), SaleRecord::value);
    tracing::debug!("[ABC] 客户聚合: {} 笔订单 -> {} 个客户", sales.len(), entities.len());
    entities.into_values().collect()
}

/// 商品维度: 以明细行为单位累计小计金额和数量
pub fn aggregate_products(sales: &[SaleRecord]) -> Vec<AggregatedEntity> {
    let mut aggregator = Aggregator::with_quantity();
    let mut line_count = 0usize;

    for item in sales.iter().flat_map(|s| s.line_items.iter()) {
        line_count += 1;
        aggregator.add(&item.product_id, &item.value(), Some(&item.qty()));
    }

    tracing::debug!("[ABC] 商品聚合: {} 条明细 -> {} 个商品", line_count, aggregator.len());
    aggregator.into_entities()
}
