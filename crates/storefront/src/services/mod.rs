//! Storefront domain services.
//!
//! - [`cart`] - process-wide cart store with device-local persistence
//! - [`checkout`] - checkout intent validation and submission

pub mod cart;
pub mod checkout;

pub use cart::{CartStorage, CartStore, CartStoreError, JsonFileStorage, MemoryStorage};
pub use checkout::{CheckoutError, CheckoutSubmission, CheckoutSubmitter, SubmissionState};
