//! Shared domain types.

pub mod cart;
pub mod checkout;
pub mod id;

pub use cart::{Cart, CartError, LineItem};
pub use checkout::{CheckoutIntent, ParsePaymentMethodError, PaymentMethod};
pub use id::{CategoryId, ProductId};
