use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{MenuItem, MenuItemPatch, NewMenuItem, NewOrder, NewOrderItem, Order, OrderItem};

use super::{MenuCatalogStore, OrderFilter, OrderStore, PlacedOrder, StoreError, StoreResult};

/// Process-local store. Data lives as long as the value does.
#[derive(Debug, Default)]
pub struct MemoryStore {
    menu: RwLock<Vec<MenuItem>>,
    orders: RwLock<Vec<Order>>,
    order_items: RwLock<Vec<OrderItem>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MenuCatalogStore for MemoryStore {
    async fn list_menu_items(&self) -> StoreResult<Vec<MenuItem>> {
        // Reversed first so equal timestamps still come out newest first.
        let mut items: Vec<MenuItem> = self.menu.read().await.iter().rev().cloned().collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn get_menu_item(&self, id: Uuid) -> StoreResult<Option<MenuItem>> {
        Ok(self.menu.read().await.iter().find(|m| m.id == id).cloned())
    }

    async fn create_menu_item(&self, item: NewMenuItem) -> StoreResult<MenuItem> {
        let now = Utc::now();
        let created = MenuItem {
            id: Uuid::new_v4(),
            name: item.name,
            description: item.description,
            price: item.price,
            image_url: item.image_url,
            category: item.category,
            is_available: item.is_available,
            created_at: now,
            updated_at: now,
        };
        self.menu.write().await.push(created.clone());
        Ok(created)
    }

    async fn update_menu_item(&self, id: Uuid, patch: MenuItemPatch) -> StoreResult<MenuItem> {
        let mut menu = self.menu.write().await;
        let item = menu
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(StoreError::NotFound)?;

        if let Some(name) = patch.name {
            item.name = name;
        }
        if let Some(description) = patch.description {
            item.description = Some(description);
        }
        if let Some(price) = patch.price {
            item.price = price;
        }
        if let Some(image_url) = patch.image_url {
            item.image_url = Some(image_url);
        }
        if let Some(category) = patch.category {
            item.category = Some(category);
        }
        if let Some(is_available) = patch.is_available {
            item.is_available = is_available;
        }
        item.updated_at = Utc::now();
        Ok(item.clone())
    }

    async fn delete_menu_item(&self, id: Uuid) -> StoreResult<()> {
        let mut menu = self.menu.write().await;
        let before = menu.len();
        menu.retain(|m| m.id != id);
        if menu.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn create_order(&self, order: NewOrder) -> StoreResult<Order> {
        let now = Utc::now();
        let created = Order {
            id: Uuid::new_v4(),
            customer_name: order.customer_name,
            customer_email: order.customer_email,
            customer_phone: order.customer_phone,
            total_amount: order.total_amount,
            status: order.status,
            order_type: order.order_type,
            delivery_address: order.delivery_address,
            created_at: now,
            updated_at: now,
        };
        self.orders.write().await.push(created.clone());
        Ok(created)
    }

    async fn create_order_items(
        &self,
        order_id: Uuid,
        items: Vec<NewOrderItem>,
    ) -> StoreResult<Vec<OrderItem>> {
        if !self.orders.read().await.iter().any(|o| o.id == order_id) {
            return Err(StoreError::NotFound);
        }
        let created: Vec<OrderItem> = items
            .into_iter()
            .map(|item| OrderItem {
                id: Uuid::new_v4(),
                order_id,
                menu_item_id: item.menu_item_id,
                quantity: item.quantity,
                price: item.price,
            })
            .collect();
        self.order_items.write().await.extend(created.iter().cloned());
        Ok(created)
    }

    async fn delete_order(&self, id: Uuid) -> StoreResult<()> {
        let mut orders = self.orders.write().await;
        let before = orders.len();
        orders.retain(|o| o.id != id);
        if orders.len() == before {
            return Err(StoreError::NotFound);
        }
        self.order_items.write().await.retain(|i| i.order_id != id);
        Ok(())
    }

    async fn get_order(&self, id: Uuid) -> StoreResult<Option<PlacedOrder>> {
        let order = match self.orders.read().await.iter().find(|o| o.id == id) {
            Some(o) => o.clone(),
            None => return Ok(None),
        };
        let items = self
            .order_items
            .read()
            .await
            .iter()
            .filter(|i| i.order_id == id)
            .cloned()
            .collect();
        Ok(Some(PlacedOrder { order, items }))
    }

    async fn list_orders(&self, filter: OrderFilter) -> StoreResult<(Vec<Order>, u64)> {
        let mut orders: Vec<Order> = self
            .orders
            .read()
            .await
            .iter()
            .filter(|o| match &filter.status {
                Some(status) => o.status.as_str() == status,
                None => true,
            })
            .cloned()
            .collect();
        if filter.newest_first {
            orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        } else {
            orders.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        }
        let total = orders.len() as u64;
        let page = orders
            .into_iter()
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .collect();
        Ok((page, total))
    }
}
