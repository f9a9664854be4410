use crate::cart::{Cart, CartItem};
use crate::context::RequestContext;
use crate::gate::ListingGate;
use std::sync::Arc;
use tori_catalog::{format_price, PricingRule};
use tori_store::{AppConfig, AttributeStore, ListingStore, SessionStore};
use tracing::debug;
use uuid::Uuid;

/// The storefront hook surface: price reads, cart totals, and the
/// terminal lifecycle events that retire the active listing pointer.
///
/// Session and attribute capabilities are optional. A missing capability
/// never raises; every operation degrades to pass-through and the
/// platform's own price stands.
pub struct PricingHooks {
    target_product_id: i64,
    rule: PricingRule,
    gate: Option<ListingGate>,
}

impl PricingHooks {
    pub fn new(
        config: &AppConfig,
        session: Option<Arc<dyn SessionStore>>,
        listings: Arc<dyn ListingStore>,
        attributes: Option<Arc<dyn AttributeStore>>,
    ) -> Self {
        let gate = session.map(|session| {
            ListingGate::new(
                session,
                listings,
                attributes,
                config.session.active_listing_key.clone(),
                config.pricing.asking_price_field.clone(),
            )
        });

        Self {
            target_product_id: config.pricing.target_product_id,
            rule: PricingRule::new(config.pricing.floor_price, config.pricing.rate),
            gate,
        }
    }

    /// The computed override for this product, or `None` when the
    /// platform price should stand: wrong product, no usable listing,
    /// non-positive asking price, or a missing capability.
    async fn override_for(&self, product_id: i64, ctx: &mut RequestContext) -> Option<f64> {
        if product_id != self.target_product_id {
            return None;
        }

        let gate = match &self.gate {
            Some(gate) => gate,
            None => {
                if ctx.log_once("hooks.session_unavailable") {
                    debug!("session unavailable, pricing override disabled");
                }
                return None;
            }
        };

        let listing = gate.resolve_active_listing(ctx).await?;
        let asking = gate.read_asking_price(listing, ctx).await;
        if asking <= 0.0 {
            if ctx.log_once("hooks.asking_not_positive") {
                debug!(listing = %listing, asking, "asking price not positive, keeping platform price");
            }
            return None;
        }

        Some(self.rule.quote(asking))
    }

    /// Price-read hook. Also backs the regular- and sale-price reads.
    pub async fn filter_price(
        &self,
        price: f64,
        product_id: i64,
        ctx: &mut RequestContext,
    ) -> f64 {
        self.override_for(product_id, ctx).await.unwrap_or(price)
    }

    pub async fn filter_regular_price(
        &self,
        price: f64,
        product_id: i64,
        ctx: &mut RequestContext,
    ) -> f64 {
        self.filter_price(price, product_id, ctx).await
    }

    pub async fn filter_sale_price(
        &self,
        price: f64,
        product_id: i64,
        ctx: &mut RequestContext,
    ) -> f64 {
        self.filter_price(price, product_id, ctx).await
    }

    /// Price-HTML render hook: substitutes the formatted computed price
    /// when an override applies, otherwise returns the input untouched.
    pub async fn filter_price_html(
        &self,
        html: &str,
        product_id: i64,
        ctx: &mut RequestContext,
    ) -> String {
        match self.override_for(product_id, ctx).await {
            Some(price) => format_price(price),
            None => html.to_string(),
        }
    }

    /// Totals-recalculation hook. Runs on every pass: each line starts
    /// from the platform's base price, then the target line gets the
    /// override when one applies. The override is never sticky.
    pub async fn apply_cart_totals(&self, cart: &mut Cart, ctx: &mut RequestContext) {
        for item in cart.items.iter_mut() {
            item.unit_price = item.base_price;
        }

        if !cart.contains(self.target_product_id) {
            return;
        }

        if let Some(price) = self.override_for(self.target_product_id, ctx).await {
            for item in cart
                .items
                .iter_mut()
                .filter(|i| i.product_id == self.target_product_id)
            {
                item.unit_price = price;
            }
        }
    }

    pub async fn on_payment_complete(&self, order_id: Uuid, ctx: &mut RequestContext) {
        debug!(%order_id, "payment complete, retiring active listing pointer");
        self.clear(ctx).await;
    }

    pub async fn on_order_cancelled(&self, order_id: Uuid, ctx: &mut RequestContext) {
        debug!(%order_id, "order cancelled, retiring active listing pointer");
        self.clear(ctx).await;
    }

    pub async fn on_order_failed(&self, order_id: Uuid, ctx: &mut RequestContext) {
        debug!(%order_id, "order failed, retiring active listing pointer");
        self.clear(ctx).await;
    }

    pub async fn on_cart_emptied(&self, ctx: &mut RequestContext) {
        self.clear(ctx).await;
    }

    /// Removing the target line item retires the pointer; removing any
    /// other product never does.
    pub async fn on_cart_item_removed(&self, removed: &CartItem, ctx: &mut RequestContext) {
        if removed.product_id != self.target_product_id {
            return;
        }
        self.clear(ctx).await;
    }

    async fn clear(&self, ctx: &mut RequestContext) {
        match &self.gate {
            Some(gate) => gate.clear_active_listing(ctx).await,
            None => {
                if ctx.log_once("hooks.session_unavailable") {
                    debug!("session unavailable, nothing to clear");
                }
            }
        }
    }
}
