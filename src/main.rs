use crm_reports_rust::service::{AbcReport, CommissionBatchReport};
use crm_reports_rust::{recalculate_commissions, AbcReportService, AppConfig, Dataset, TtlCache};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

/// 标准输出的报表内容
#[derive(Serialize)]
struct ReportOutput<'a> {
    customer_curve: &'a AbcReport,
    product_curve: &'a AbcReport,
    commissions: &'a CommissionBatchReport,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 使用本地时间格式
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    // 加载配置, 命令行参数优先于配置中的数据路径
    let config = AppConfig::load()?;
    info!("Starting with config: {:?}", config);
    let path = std::env::args().nth(1).unwrap_or_else(|| config.data.path.clone());

    let dataset = Dataset::from_path(&path)?;
    let catalog = dataset.catalog();

    // 报表缓存: 进程内只构建一次
    let cache = Arc::new(TtlCache::new(config.cache_ttl()));
    let reports = AbcReportService::new(config.thresholds()?, cache);

    let customers = reports.customer_curve(&path, &dataset.sales, &catalog);
    let products = reports.product_curve(&path, &dataset.sales, &catalog);

    for summary in customers.bands.iter().chain(products.bands.iter()) {
        info!(
            "  曲线 {}: {} 个实体, 金额 {}, 占比 {}%",
            summary.band,
            summary.entity_count,
            summary.total_value,
            summary.share_percent.with_scale(2)
        );
    }

    let commissions = recalculate_commissions(
        &dataset.sales,
        &dataset.seller_rules(),
        &dataset.price_list_index(),
    );
    if commissions.unresolved_count > 0 {
        info!(
            "{} 笔订单佣金未解析, 请检查销售员规则与价目表",
            commissions.unresolved_count
        );
    }

    let output = ReportOutput {
        customer_curve: &customers,
        product_curve: &products,
        commissions: &commissions,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
