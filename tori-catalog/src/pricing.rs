use serde::{Deserialize, Serialize};

/// Percentage-with-floor pricing rule: the computed price is a fixed
/// share of the asking price, never below the floor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingRule {
    /// Minimum computed price regardless of asking-price input.
    pub floor: f64,

    /// Share of the asking price charged, e.g. 0.05 for 5%.
    pub rate: f64,
}

impl Default for PricingRule {
    fn default() -> Self {
        Self {
            floor: 99.0,
            rate: 0.05,
        }
    }
}

impl PricingRule {
    pub fn new(floor: f64, rate: f64) -> Self {
        Self { floor, rate }
    }

    /// Quote a price for the given asking price.
    ///
    /// Pure and total. Callers decide upstream whether an override
    /// applies at all; a non-positive asking price means "no override"
    /// and this is simply not called for it.
    pub fn quote(&self, asking: f64) -> f64 {
        (asking * self.rate).max(self.floor)
    }
}

/// Render a price the way the storefront displays it.
pub fn format_price(amount: f64) -> String {
    format!("{:.2} €", amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_applies_below_boundary() {
        let rule = PricingRule::default();

        assert_eq!(rule.quote(0.0), 99.0);
        assert_eq!(rule.quote(500.0), 99.0);
        assert_eq!(rule.quote(1979.0), 99.0);
    }

    #[test]
    fn test_rate_applies_above_boundary() {
        let rule = PricingRule::default();

        assert_eq!(rule.quote(2000.0), 100.0);
        assert_eq!(rule.quote(10_000.0), 500.0);
    }

    #[test]
    fn test_boundary_asking_price() {
        let rule = PricingRule::default();

        // 1980 * 0.05 == 99 exactly, so the floor and the rate agree.
        assert_eq!(rule.quote(1980.0), 99.0);
    }

    #[test]
    fn test_custom_rule() {
        let rule = PricingRule::new(10.0, 0.10);

        assert_eq!(rule.quote(50.0), 10.0);
        assert_eq!(rule.quote(500.0), 50.0);
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(99.0), "99.00 €");
        assert_eq!(format_price(100.5), "100.50 €");
    }
}
