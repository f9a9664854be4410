pub mod listing;
pub mod pricing;

pub use listing::{ListingHead, ListingId, ListingRecord, ListingStatus, RecordKind};
pub use pricing::{format_price, PricingRule};
