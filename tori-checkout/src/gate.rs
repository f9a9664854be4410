use crate::context::RequestContext;
use std::sync::Arc;
use tori_catalog::{ListingId, ListingStatus, RecordKind};
use tori_store::{AttributeStore, ListingStore, SessionStore};
use tracing::debug;

/// Validates the session-held listing pointer before any pricing runs,
/// and clears it when it goes stale or a terminal event fires.
///
/// Session slot lifecycle: EMPTY -> PENDING (external listing flow sets
/// the pointer) -> EMPTY (terminal event, or staleness detected here).
pub struct ListingGate {
    session: Arc<dyn SessionStore>,
    listings: Arc<dyn ListingStore>,
    attributes: Option<Arc<dyn AttributeStore>>,
    session_key: String,
    asking_price_field: String,
}

impl ListingGate {
    pub fn new(
        session: Arc<dyn SessionStore>,
        listings: Arc<dyn ListingStore>,
        attributes: Option<Arc<dyn AttributeStore>>,
        session_key: String,
        asking_price_field: String,
    ) -> Self {
        Self {
            session,
            listings,
            attributes,
            session_key,
            asking_price_field,
        }
    }

    /// Resolve the session slot to a usable listing id.
    ///
    /// An absent, unparseable, or non-positive slot resolves to `None`
    /// without side effects. A slot pointing to a missing record, a
    /// record of the wrong kind, or an already-published listing is
    /// stale: it resolves to `None` and the slot is cleared.
    pub async fn resolve_active_listing(&self, ctx: &mut RequestContext) -> Option<ListingId> {
        let raw = self.session.get(&self.session_key).await?;

        let id = match raw
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(|v| ListingId::try_from(v).ok())
        {
            Some(id) => id,
            None => {
                if ctx.log_once("gate.slot_invalid") {
                    debug!(slot = %raw, "session slot holds no usable listing id");
                }
                return None;
            }
        };

        match self.listings.head(id).await {
            None => {
                if ctx.log_once("gate.record_missing") {
                    debug!(listing = %id, "active listing record no longer exists");
                }
                self.clear_active_listing(ctx).await;
                None
            }
            Some(head) if head.kind != RecordKind::Listing => {
                if ctx.log_once("gate.wrong_kind") {
                    debug!(listing = %id, kind = ?head.kind, "active listing points to a non-listing record");
                }
                self.clear_active_listing(ctx).await;
                None
            }
            Some(head) if head.status == ListingStatus::Published => {
                if ctx.log_once("gate.already_published") {
                    debug!(listing = %id, "active listing already published, pointer is stale");
                }
                self.clear_active_listing(ctx).await;
                None
            }
            Some(_) => Some(id),
        }
    }

    /// The listing's asking price, or 0.0 when the field is unset or
    /// the attribute accessor is unavailable.
    pub async fn read_asking_price(&self, id: ListingId, ctx: &mut RequestContext) -> f64 {
        match &self.attributes {
            Some(attributes) => attributes
                .get(id, &self.asking_price_field)
                .await
                .unwrap_or(0.0),
            None => {
                if ctx.log_once("gate.attributes_unavailable") {
                    debug!("attribute accessor unavailable, asking price reads as zero");
                }
                0.0
            }
        }
    }

    /// Idempotently empty the session slot.
    pub async fn clear_active_listing(&self, ctx: &mut RequestContext) {
        if let Some(prior) = self.session.clear(&self.session_key).await {
            if ctx.log_once("gate.cleared") {
                debug!(prior = %prior, "cleared active listing pointer");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tori_catalog::{ListingRecord, RecordKind};
    use tori_store::{InMemoryAttributes, InMemoryListings, InMemorySession};

    const SESSION_KEY: &str = "active_listing";

    fn gate(
        session: Arc<InMemorySession>,
        listings: Arc<InMemoryListings>,
        attributes: Option<Arc<InMemoryAttributes>>,
    ) -> ListingGate {
        ListingGate::new(
            session,
            listings,
            attributes.map(|a| a as Arc<dyn AttributeStore>),
            SESSION_KEY.to_string(),
            "asking_price".to_string(),
        )
    }

    fn draft_listing(listings: &InMemoryListings, raw_id: i64) -> ListingId {
        let id = ListingId::try_from(raw_id).unwrap();
        listings.insert(ListingRecord::new(id, "Vintage amplifier"));
        id
    }

    #[tokio::test]
    async fn test_empty_slot_resolves_none() {
        let session = Arc::new(InMemorySession::new());
        let listings = Arc::new(InMemoryListings::new());
        let gate = gate(session, listings, None);
        let mut ctx = RequestContext::new();

        assert!(gate.resolve_active_listing(&mut ctx).await.is_none());
    }

    #[tokio::test]
    async fn test_non_positive_slot_resolves_none_without_clearing() {
        let session = Arc::new(InMemorySession::new());
        let listings = Arc::new(InMemoryListings::new());
        let gate = gate(session.clone(), listings, None);

        for slot in ["0", "-5", "garbage"] {
            session.set(SESSION_KEY, slot.to_string()).await;
            let mut ctx = RequestContext::new();

            assert!(gate.resolve_active_listing(&mut ctx).await.is_none());
            // Unusable values read as empty but are not self-healed.
            assert_eq!(session.get(SESSION_KEY).await, Some(slot.to_string()));
        }
    }

    #[tokio::test]
    async fn test_pending_listing_resolves() {
        let session = Arc::new(InMemorySession::new());
        let listings = Arc::new(InMemoryListings::new());
        let id = draft_listing(&listings, 42);
        session.set(SESSION_KEY, "42".to_string()).await;

        let gate = gate(session, listings, None);
        let mut ctx = RequestContext::new();

        assert_eq!(gate.resolve_active_listing(&mut ctx).await, Some(id));
    }

    #[tokio::test]
    async fn test_missing_record_clears_slot() {
        let session = Arc::new(InMemorySession::new());
        let listings = Arc::new(InMemoryListings::new());
        session.set(SESSION_KEY, "42".to_string()).await;

        let gate = gate(session.clone(), listings, None);
        let mut ctx = RequestContext::new();

        assert!(gate.resolve_active_listing(&mut ctx).await.is_none());
        assert_eq!(session.get(SESSION_KEY).await, None);
    }

    #[tokio::test]
    async fn test_wrong_kind_clears_slot() {
        let session = Arc::new(InMemorySession::new());
        let listings = Arc::new(InMemoryListings::new());
        let id = ListingId::try_from(42).unwrap();
        let mut record = ListingRecord::new(id, "Not a listing");
        record.kind = RecordKind::Page;
        listings.insert(record);
        session.set(SESSION_KEY, "42".to_string()).await;

        let gate = gate(session.clone(), listings, None);
        let mut ctx = RequestContext::new();

        assert!(gate.resolve_active_listing(&mut ctx).await.is_none());
        assert_eq!(session.get(SESSION_KEY).await, None);
    }

    #[tokio::test]
    async fn test_published_listing_clears_slot() {
        let session = Arc::new(InMemorySession::new());
        let listings = Arc::new(InMemoryListings::new());
        let id = draft_listing(&listings, 42);
        listings.update(id, |r| r.publish());
        session.set(SESSION_KEY, "42".to_string()).await;

        let gate = gate(session.clone(), listings, None);
        let mut ctx = RequestContext::new();

        assert!(gate.resolve_active_listing(&mut ctx).await.is_none());
        assert_eq!(session.get(SESSION_KEY).await, None);
    }

    #[tokio::test]
    async fn test_asking_price_defaults_to_zero() {
        let session = Arc::new(InMemorySession::new());
        let listings = Arc::new(InMemoryListings::new());
        let attributes = Arc::new(InMemoryAttributes::new());
        let id = draft_listing(&listings, 42);

        let gate = gate(session, listings, Some(attributes.clone()));
        let mut ctx = RequestContext::new();

        assert_eq!(gate.read_asking_price(id, &mut ctx).await, 0.0);

        attributes.put(id, "asking_price", 2000.0);
        assert_eq!(gate.read_asking_price(id, &mut ctx).await, 2000.0);
    }

    #[tokio::test]
    async fn test_asking_price_without_accessor_is_zero() {
        let session = Arc::new(InMemorySession::new());
        let listings = Arc::new(InMemoryListings::new());
        let id = draft_listing(&listings, 42);

        let gate = gate(session, listings, None);
        let mut ctx = RequestContext::new();

        assert_eq!(gate.read_asking_price(id, &mut ctx).await, 0.0);
    }
}
