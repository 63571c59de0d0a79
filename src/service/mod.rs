pub mod aggregation;
pub mod cache;
pub mod classification;
pub mod commission;
pub mod report;

pub use aggregation::{aggregate_by, aggregate_customers, aggregate_products, Aggregator};
pub use cache::{Clock, SystemClock, TtlCache};
pub use classification::{classify_abc, classify_abc_with, summarize_bands, AbcThresholds};
pub use commission::{recalculate_commissions, resolve_commission, CommissionBatchReport};
pub use report::{AbcReport, AbcReportRow, AbcReportService, CurveKind};
