//! Cart document inspection commands.

use stark_core::Cart;
use stark_storefront::services::cart::{CartStorage, JsonFileStorage};

use crate::commands::cart_path;

/// Print the persisted cart lines and total.
pub fn show() -> Result<(), Box<dyn std::error::Error>> {
    let path = cart_path();
    let storage = JsonFileStorage::new(&path);

    let Some(items) = storage.load()? else {
        tracing::info!("No cart document at {path}");
        return Ok(());
    };

    let cart = Cart::from_items(items);
    if cart.is_empty() {
        tracing::info!("Cart at {path} is empty");
        return Ok(());
    }

    for item in cart.items() {
        tracing::info!(
            "{} x{} @ {} (product {})",
            item.name,
            item.quantity,
            item.unit_price,
            item.product_id
        );
    }
    tracing::info!("Total: {:.2} across {} units", cart.total(), cart.item_count());
    Ok(())
}

/// Empty the persisted cart document.
pub fn clear() -> Result<(), Box<dyn std::error::Error>> {
    let path = cart_path();
    JsonFileStorage::new(&path).save(&[])?;
    tracing::info!("Cleared cart document at {path}");
    Ok(())
}
