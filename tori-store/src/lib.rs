pub mod app_config;
pub mod attributes;
pub mod listing_repo;
pub mod session;

pub use app_config::AppConfig;
pub use attributes::{AttributeStore, InMemoryAttributes};
pub use listing_repo::{InMemoryListings, ListingStore};
pub use session::{InMemorySession, SessionStore};
