//! Storage boundary for the menu catalog and for placed orders.
//!
//! Handlers and services only see the [`MenuCatalogStore`] and [`OrderStore`]
//! traits; the Postgres implementation lives in [`postgres`] and an in-process
//! implementation used for local runs and tests lives in [`memory`].

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{MenuItem, MenuItemPatch, NewMenuItem, NewOrder, NewOrderItem, Order, OrderItem};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("database error: {0}")]
    Db(#[from] sea_orm::DbErr),

    #[error("corrupt row: {0}")]
    Corrupt(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub status: Option<String>,
    pub newest_first: bool,
    pub limit: u64,
    pub offset: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedOrder {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

#[async_trait]
pub trait MenuCatalogStore: Send + Sync {
    /// All items, newest first.
    async fn list_menu_items(&self) -> StoreResult<Vec<MenuItem>>;

    async fn get_menu_item(&self, id: Uuid) -> StoreResult<Option<MenuItem>>;

    async fn create_menu_item(&self, item: NewMenuItem) -> StoreResult<MenuItem>;

    /// Applies the set fields of `patch`; `StoreError::NotFound` for an unknown id.
    async fn update_menu_item(&self, id: Uuid, patch: MenuItemPatch) -> StoreResult<MenuItem>;

    async fn delete_menu_item(&self, id: Uuid) -> StoreResult<()>;
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn create_order(&self, order: NewOrder) -> StoreResult<Order>;

    async fn create_order_items(
        &self,
        order_id: Uuid,
        items: Vec<NewOrderItem>,
    ) -> StoreResult<Vec<OrderItem>>;

    /// Removes an order together with any items already written for it.
    async fn delete_order(&self, id: Uuid) -> StoreResult<()>;

    async fn get_order(&self, id: Uuid) -> StoreResult<Option<PlacedOrder>>;

    async fn list_orders(&self, filter: OrderFilter) -> StoreResult<(Vec<Order>, u64)>;

    /// Writes the order row, then its items.
    ///
    /// If the item write fails the order row is deleted again before the
    /// error is returned, so a failed checkout never leaves a headless order
    /// behind. Backends with transactions override this with a single
    /// atomic write.
    async fn place_order(
        &self,
        order: NewOrder,
        items: Vec<NewOrderItem>,
    ) -> StoreResult<PlacedOrder> {
        let order = self.create_order(order).await?;
        match self.create_order_items(order.id, items).await {
            Ok(items) => Ok(PlacedOrder { order, items }),
            Err(err) => {
                tracing::error!(
                    error = %err,
                    order_id = %order.id,
                    "order item insert failed, removing order"
                );
                if let Err(undo) = self.delete_order(order.id).await {
                    tracing::error!(
                        error = %undo,
                        order_id = %order.id,
                        "compensating order delete failed, order left without items"
                    );
                }
                Err(err)
            }
        }
    }
}
