pub mod abc;
pub mod catalog;
pub mod commission;
pub mod sale;

pub use abc::{AggregatedEntity, BandSummary, ClassifiedEntity, CurveBand};
pub use catalog::{CustomerInfo, EntityCatalog, ProductInfo};
pub use commission::{
    CommissionResolution, DiscountTier, PriceList, PriceListCommission, SaleCommission,
    SellerCommissionConfig, SellerCommissionRule, UnresolvedReason,
};
pub use sale::{LineItem, SaleRecord};
