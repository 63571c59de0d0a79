use bigdecimal::{BigDecimal, Zero};
use crate::error::{AppError, Result};
use crate::models::{AggregatedEntity, BandSummary, ClassifiedEntity, CurveBand};
use serde::{Deserialize, Serialize};

/// ABC 分级阈值 (累计占比, 单位 %)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbcThresholds {
    pub a_limit: BigDecimal,
    pub b_limit: BigDecimal,
}

impl AbcThresholds {
    pub fn new(a_limit: BigDecimal, b_limit: BigDecimal) -> Result<Self> {
        let hundred = BigDecimal::from(100);
        if a_limit < BigDecimal::zero() || a_limit > b_limit || b_limit > hundred {
            return Err(AppError::InvalidThresholds {
                a_limit: a_limit.to_string(),
                b_limit: b_limit.to_string(),
            });
        }
        Ok(Self { a_limit, b_limit })
    }

    /// 按进入当前实体前的累计金额判定: value_before * 100 < limit * grand_total
    ///
    /// 不做除法, 循环小数的占比不会在阈值处被截断到下一档之前
    pub fn band_for(&self, value_before: &BigDecimal, grand_total: &BigDecimal) -> CurveBand {
        let hundred = BigDecimal::from(100);
        let scaled = value_before * &hundred;
        if scaled < &self.a_limit * grand_total {
            CurveBand::A
        } else if scaled < &self.b_limit * grand_total {
            CurveBand::B
        } else {
            CurveBand::C
        }
    }
}

impl Default for AbcThresholds {
    fn default() -> Self {
        Self {
            a_limit: BigDecimal::from(80),
            b_limit: BigDecimal::from(95),
        }
    }
}

/// ABC 分级 (默认阈值 80 / 95)
pub fn classify_abc(entities: Vec<AggregatedEntity>) -> Vec<ClassifiedEntity> {
    classify_abc_with(entities, &AbcThresholds::default())
}

/// ABC 分级
///
/// 1. 按金额降序稳定排序 (金额相同保持输入顺序)
/// 2. 顺序遍历, 用累加前的累计占比判定分级, 再累加当前占比
/// 3. 总额为 0 时所有实体占比为 0, 一律归入 C
pub fn classify_abc_with(
    mut entities: Vec<AggregatedEntity>,
    thresholds: &AbcThresholds,
) -> Vec<ClassifiedEntity> {
    let grand_total = entities
        .iter()
        .fold(BigDecimal::zero(), |acc, e| acc + &e.total_value);

    // Vec::sort_by 为稳定排序
    entities.sort_by(|a, b| b.total_value.cmp(&a.total_value));

    if grand_total.is_zero() {
        return entities
            .into_iter()
            .map(|entity| ClassifiedEntity {
                entity,
                share_percent: BigDecimal::zero(),
                cumulative_share_percent: BigDecimal::zero(),
                curve_band: CurveBand::C,
            })
            .collect();
    }

    let hundred = BigDecimal::from(100);
    let mut running_value = BigDecimal::zero();
    let mut classified = Vec::with_capacity(entities.len());

    for entity in entities {
        let share_percent = &entity.total_value * &hundred / &grand_total;
        let curve_band = thresholds.band_for(&running_value, &grand_total);
        running_value += &entity.total_value;

        // 累计占比由累计金额推导, 不累加已截断的单项占比
        let cumulative_share_percent = &running_value * &hundred / &grand_total;

        classified.push(ClassifiedEntity {
            entity,
            share_percent,
            cumulative_share_percent,
            curve_band,
        });
    }

    tracing::debug!(
        "[ABC] 分级完成: {} 个实体, 总额 {}",
        classified.len(),
        grand_total
    );

    classified
}

/// 按分级汇总实体数量、金额和占比, 固定输出 A/B/C 三行
pub fn summarize_bands(classified: &[ClassifiedEntity]) -> Vec<BandSummary> {
    CurveBand::ALL
        .iter()
        .map(|&band| {
            let rows = classified.iter().filter(|c| c.curve_band == band);
            let (entity_count, total_value, share_percent) = rows.fold(
                (0usize, BigDecimal::zero(), BigDecimal::zero()),
                |(n, value, share), c| (n + 1, value + &c.entity.total_value, share + &c.share_percent),
            );
            BandSummary {
                band,
                entity_count,
                total_value,
                share_percent,
            }
        })
        .collect()
}
