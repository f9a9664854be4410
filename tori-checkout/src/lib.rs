pub mod cart;
pub mod context;
pub mod gate;
pub mod hooks;

pub use cart::{Cart, CartItem};
pub use context::RequestContext;
pub use gate::ListingGate;
pub use hooks::PricingHooks;
