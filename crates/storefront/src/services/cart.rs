//! Process-wide cart store with device-local persistence.
//!
//! The store is the single source of truth for cart contents shared across
//! independently rendered views (navbar badge, cart page, drawer fragment).
//! Every mutation persists a snapshot to device-local storage and notifies
//! subscribers through a watch channel, so no view carries its own copy of
//! the cart.
//!
//! Mutations are discrete user actions with a single logical writer; the
//! internal mutex is held only across the synchronous state change, never
//! across an await point.

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use rust_decimal::Decimal;
use thiserror::Error;
use tokio::sync::watch;

use stark_core::{Cart, CartError, LineItem, ProductId};

/// Errors from cart store operations.
#[derive(Debug, Error)]
pub enum CartStoreError {
    /// A cart invariant was violated (zero quantity, negative price).
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The storage document could not be read or written.
    #[error("cart storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// The storage document exists but does not decode as line items.
    #[error("cart storage document is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Device-local persistence for the cart document.
///
/// The document is a JSON array of line-item records. Implementations are
/// synchronous: carts are small and mutations are discrete user actions.
pub trait CartStorage: Send + Sync {
    /// Load the persisted line items, or `None` if nothing was persisted yet.
    ///
    /// # Errors
    ///
    /// Returns an error when the document exists but cannot be read or
    /// decoded.
    fn load(&self) -> Result<Option<Vec<LineItem>>, CartStoreError>;

    /// Persist a snapshot of the line items.
    ///
    /// # Errors
    ///
    /// Returns an error when the document cannot be written.
    fn save(&self, items: &[LineItem]) -> Result<(), CartStoreError>;
}

/// JSON-file-backed storage, the default "device-local storage" of a
/// deployment.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Create storage backed by the given file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CartStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<Vec<LineItem>>, CartStoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let document = fs::read_to_string(&self.path)?;
        let items: Vec<LineItem> = serde_json::from_str(&document)?;
        Ok(Some(items))
    }

    fn save(&self, items: &[LineItem]) -> Result<(), CartStoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let document = serde_json::to_string(items)?;
        fs::write(&self.path, document)?;
        Ok(())
    }
}

/// In-memory storage for tests and embedded use.
#[derive(Default)]
pub struct MemoryStorage {
    document: Mutex<Option<Vec<LineItem>>>,
}

impl MemoryStorage {
    /// Create empty in-memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self) -> Result<Option<Vec<LineItem>>, CartStoreError> {
        Ok(recover(self.document.lock()).clone())
    }

    fn save(&self, items: &[LineItem]) -> Result<(), CartStoreError> {
        *recover(self.document.lock()) = Some(items.to_vec());
        Ok(())
    }
}

/// Recover a mutex guard even if a previous holder panicked.
fn recover<'a, T>(
    result: Result<MutexGuard<'a, T>, std::sync::PoisonError<MutexGuard<'a, T>>>,
) -> MutexGuard<'a, T> {
    match result {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// The authoritative client-side view of the shopping cart.
///
/// Cheaply cloneable; all clones share one state, one storage document, and
/// one notification channel.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    storage: Box<dyn CartStorage>,
    state: Mutex<Cart>,
    snapshot_tx: watch::Sender<Cart>,
}

impl CartStore {
    /// Open the store, loading any persisted snapshot.
    ///
    /// A missing document yields an empty cart. An unreadable document is
    /// logged and treated as empty rather than taking the storefront down;
    /// the next mutation overwrites it.
    #[must_use]
    pub fn open(storage: impl CartStorage + 'static) -> Self {
        let cart = match storage.load() {
            Ok(Some(items)) => Cart::from_items(items),
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!("Failed to load persisted cart, starting empty: {e}");
                Cart::new()
            }
        };

        let (snapshot_tx, _) = watch::channel(cart.clone());

        Self {
            inner: Arc::new(CartStoreInner {
                storage: Box::new(storage),
                state: Mutex::new(cart),
                snapshot_tx,
            }),
        }
    }

    /// Current cart contents.
    #[must_use]
    pub fn snapshot(&self) -> Cart {
        self.lock().clone()
    }

    /// Subscribe to cart changes.
    ///
    /// The receiver observes the snapshot broadcast after every persisted
    /// mutation; the initial value is the cart as of the call.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.inner.snapshot_tx.subscribe()
    }

    /// Full-precision total of the current cart.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lock().total()
    }

    /// Total number of units in the cart (the badge count).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lock().item_count()
    }

    /// Add a product to the cart, merging into an existing line if present.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a zero quantity or negative price, or
    /// a storage error when the snapshot cannot be persisted.
    pub fn add(
        &self,
        product_id: ProductId,
        name: impl Into<String>,
        unit_price: Decimal,
        quantity: u32,
        image_ref: impl Into<String>,
    ) -> Result<Cart, CartStoreError> {
        let item = LineItem::new(product_id, name, unit_price, quantity, image_ref)?;
        self.mutate(|cart| {
            cart.add(item);
            Ok(true)
        })
    }

    /// Set the quantity of an existing line.
    ///
    /// Absent products are a silent no-op (nothing is persisted or
    /// notified). A zero quantity is rejected without touching the cart:
    /// removal is [`CartStore::remove`]'s job.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a zero quantity, or a storage error
    /// when the snapshot cannot be persisted.
    pub fn update_quantity(
        &self,
        product_id: ProductId,
        new_quantity: u32,
    ) -> Result<Cart, CartStoreError> {
        self.mutate(|cart| Ok(cart.update_quantity(product_id, new_quantity)?))
    }

    /// Remove a product's line. Removing an absent product is a no-op.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the snapshot cannot be persisted.
    pub fn remove(&self, product_id: ProductId) -> Result<Cart, CartStoreError> {
        self.mutate(|cart| Ok(cart.remove(product_id)))
    }

    /// Empty the cart and persist the empty state.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the snapshot cannot be persisted.
    pub fn clear(&self) -> Result<Cart, CartStoreError> {
        self.mutate(|cart| {
            cart.clear();
            // An explicit clear always flushes the document, even when the
            // cart was already empty.
            Ok(true)
        })
    }

    /// Apply a mutation, persisting and notifying when it changed the cart.
    fn mutate(
        &self,
        op: impl FnOnce(&mut Cart) -> Result<bool, CartStoreError>,
    ) -> Result<Cart, CartStoreError> {
        let mut cart = self.lock();
        let changed = op(&mut cart)?;
        if changed {
            self.inner.storage.save(cart.items())?;
            self.inner.snapshot_tx.send_replace(cart.clone());
        }
        Ok(cart.clone())
    }

    fn lock(&self) -> MutexGuard<'_, Cart> {
        recover(self.inner.state.lock())
    }
}
