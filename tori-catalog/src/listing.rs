use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a platform record. The host keys records by positive
/// integer id; zero and negative values never reference anything.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ListingId(i64);

impl ListingId {
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for ListingId {
    type Error = ListingIdError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        if raw >= 1 {
            Ok(Self(raw))
        } else {
            Err(ListingIdError::OutOfRange(raw))
        }
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ListingIdError {
    #[error("listing id out of range: {0}")]
    OutOfRange(i64),
}

/// Record kinds the platform stores. The pricing gate only ever acts on
/// `Listing` records; anything else behind the session pointer is stale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordKind {
    Listing,
    Product,
    Page,
}

/// Lifecycle status of a listing record. `Published` means the listing
/// transaction already completed, so a session pointer to it is stale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListingStatus {
    Draft,
    Pending,
    Published,
}

/// A draft item listing, distinct from the commerce product record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingRecord {
    pub id: ListingId,
    pub kind: RecordKind,
    pub status: ListingStatus,
    pub title: String,
    /// Seller-entered asking price, when the seller has filled it in.
    pub asking_price: Option<f64>,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ListingRecord {
    pub fn new(id: ListingId, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            kind: RecordKind::Listing,
            status: ListingStatus::Draft,
            title: title.into(),
            asking_price: None,
            metadata: serde_json::json!({}),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_asking_price(&mut self, asking: f64) {
        self.asking_price = Some(asking);
        self.updated_at = Utc::now();
    }

    /// Mark the listing as published (transaction completed).
    pub fn publish(&mut self) {
        self.status = ListingStatus::Published;
        self.updated_at = Utc::now();
    }

    pub fn head(&self) -> ListingHead {
        ListingHead {
            kind: self.kind,
            status: self.status,
        }
    }
}

/// Cheap kind/status projection of a record, enough to validate a
/// session pointer without loading the full listing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListingHead {
    pub kind: RecordKind,
    pub status: ListingStatus,
}
