use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    entity::{
        menu_items::{ActiveModel as MenuActive, Column as MenuCol, Entity as MenuItems, Model as MenuModel},
        order_items::{ActiveModel as OrderItemActive, Column as OrderItemCol, Entity as OrderItems, Model as OrderItemModel},
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel},
    },
    models::{
        MenuItem, MenuItemPatch, NewMenuItem, NewOrder, NewOrderItem, Order, OrderItem, OrderType,
    },
};

use super::{MenuCatalogStore, OrderFilter, OrderStore, PlacedOrder, StoreError, StoreResult};

/// SeaORM-backed store for Postgres.
#[derive(Debug, Clone)]
pub struct PgStore {
    conn: DatabaseConnection,
}

impl PgStore {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub fn conn(&self) -> &DatabaseConnection {
        &self.conn
    }
}

#[async_trait]
impl MenuCatalogStore for PgStore {
    async fn list_menu_items(&self) -> StoreResult<Vec<MenuItem>> {
        let items = MenuItems::find()
            .order_by_desc(MenuCol::CreatedAt)
            .all(&self.conn)
            .await?
            .into_iter()
            .map(menu_item_from_entity)
            .collect();
        Ok(items)
    }

    async fn get_menu_item(&self, id: Uuid) -> StoreResult<Option<MenuItem>> {
        let item = MenuItems::find_by_id(id)
            .one(&self.conn)
            .await?
            .map(menu_item_from_entity);
        Ok(item)
    }

    async fn create_menu_item(&self, item: NewMenuItem) -> StoreResult<MenuItem> {
        let active = MenuActive {
            id: Set(Uuid::new_v4()),
            name: Set(item.name),
            description: Set(item.description),
            price: Set(item.price),
            image_url: Set(item.image_url),
            category: Set(item.category),
            is_available: Set(item.is_available),
            created_at: NotSet,
            updated_at: NotSet,
        };
        let model = active.insert(&self.conn).await?;
        Ok(menu_item_from_entity(model))
    }

    async fn update_menu_item(&self, id: Uuid, patch: MenuItemPatch) -> StoreResult<MenuItem> {
        let existing = MenuItems::find_by_id(id).one(&self.conn).await?;
        let existing = match existing {
            Some(m) => m,
            None => return Err(StoreError::NotFound),
        };

        let mut active: MenuActive = existing.into();
        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(description) = patch.description {
            active.description = Set(Some(description));
        }
        if let Some(price) = patch.price {
            active.price = Set(price);
        }
        if let Some(image_url) = patch.image_url {
            active.image_url = Set(Some(image_url));
        }
        if let Some(category) = patch.category {
            active.category = Set(Some(category));
        }
        if let Some(is_available) = patch.is_available {
            active.is_available = Set(is_available);
        }
        active.updated_at = Set(Utc::now().into());

        let model = active.update(&self.conn).await?;
        Ok(menu_item_from_entity(model))
    }

    async fn delete_menu_item(&self, id: Uuid) -> StoreResult<()> {
        let result = MenuItems::delete_by_id(id).exec(&self.conn).await?;
        if result.rows_affected == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl OrderStore for PgStore {
    async fn create_order(&self, order: NewOrder) -> StoreResult<Order> {
        insert_order(&self.conn, order).await
    }

    async fn create_order_items(
        &self,
        order_id: Uuid,
        items: Vec<NewOrderItem>,
    ) -> StoreResult<Vec<OrderItem>> {
        insert_order_items(&self.conn, order_id, items).await
    }

    async fn delete_order(&self, id: Uuid) -> StoreResult<()> {
        // order_items cascade on delete
        let result = Orders::delete_by_id(id).exec(&self.conn).await?;
        if result.rows_affected == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn get_order(&self, id: Uuid) -> StoreResult<Option<PlacedOrder>> {
        let order = match Orders::find_by_id(id).one(&self.conn).await? {
            Some(o) => order_from_entity(o)?,
            None => return Ok(None),
        };

        let items = OrderItems::find()
            .filter(OrderItemCol::OrderId.eq(order.id))
            .all(&self.conn)
            .await?
            .into_iter()
            .map(order_item_from_entity)
            .collect();

        Ok(Some(PlacedOrder { order, items }))
    }

    async fn list_orders(&self, filter: OrderFilter) -> StoreResult<(Vec<Order>, u64)> {
        let mut condition = Condition::all();
        if let Some(status) = filter.status.as_ref().filter(|s| !s.is_empty()) {
            condition = condition.add(OrderCol::Status.eq(status.clone()));
        }

        let mut finder = Orders::find().filter(condition);
        finder = if filter.newest_first {
            finder.order_by_desc(OrderCol::CreatedAt)
        } else {
            finder.order_by_asc(OrderCol::CreatedAt)
        };

        let total = finder.clone().count(&self.conn).await?;

        let orders = finder
            .limit(filter.limit)
            .offset(filter.offset)
            .all(&self.conn)
            .await?
            .into_iter()
            .map(order_from_entity)
            .collect::<StoreResult<Vec<_>>>()?;

        Ok((orders, total))
    }

    /// Both writes share one transaction, so a failed item insert rolls the
    /// order row back with it.
    async fn place_order(
        &self,
        order: NewOrder,
        items: Vec<NewOrderItem>,
    ) -> StoreResult<PlacedOrder> {
        let txn = self.conn.begin().await?;
        let order = insert_order(&txn, order).await?;
        let items = insert_order_items(&txn, order.id, items).await?;
        txn.commit().await?;
        Ok(PlacedOrder { order, items })
    }
}

async fn insert_order<C: ConnectionTrait>(conn: &C, order: NewOrder) -> StoreResult<Order> {
    let delivery_address = match order.order_type {
        OrderType::Delivery => order.delivery_address,
        OrderType::Pickup => None,
    };
    let model = OrderActive {
        id: Set(Uuid::new_v4()),
        customer_name: Set(order.customer_name),
        customer_email: Set(order.customer_email),
        customer_phone: Set(order.customer_phone),
        total_amount: Set(order.total_amount),
        status: Set(order.status.as_str().to_string()),
        order_type: Set(order.order_type.as_token().to_string()),
        delivery_address: Set(delivery_address),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(conn)
    .await?;
    order_from_entity(model)
}

async fn insert_order_items<C: ConnectionTrait>(
    conn: &C,
    order_id: Uuid,
    items: Vec<NewOrderItem>,
) -> StoreResult<Vec<OrderItem>> {
    let rows: Vec<OrderItemModel> = items
        .into_iter()
        .map(|item| OrderItemModel {
            id: Uuid::new_v4(),
            order_id,
            menu_item_id: item.menu_item_id,
            quantity: item.quantity,
            price: item.price,
        })
        .collect();
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let actives = rows.iter().cloned().map(|row| OrderItemActive {
        id: Set(row.id),
        order_id: Set(row.order_id),
        menu_item_id: Set(row.menu_item_id),
        quantity: Set(row.quantity),
        price: Set(row.price),
    });
    OrderItems::insert_many(actives).exec(conn).await?;

    Ok(rows.into_iter().map(order_item_from_entity).collect())
}

fn menu_item_from_entity(model: MenuModel) -> MenuItem {
    MenuItem {
        id: model.id,
        name: model.name,
        description: model.description,
        price: model.price,
        image_url: model.image_url,
        category: model.category,
        is_available: model.is_available,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

fn order_from_entity(model: OrderModel) -> StoreResult<Order> {
    let status = model
        .status
        .parse()
        .map_err(|e| StoreError::Corrupt(format!("orders.status of {}: {e}", model.id)))?;
    let order_type = model
        .order_type
        .parse()
        .map_err(|e| StoreError::Corrupt(format!("orders.order_type of {}: {e}", model.id)))?;
    Ok(Order {
        id: model.id,
        customer_name: model.customer_name,
        customer_email: model.customer_email,
        customer_phone: model.customer_phone,
        total_amount: model.total_amount,
        status,
        order_type,
        delivery_address: model.delivery_address,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}

fn order_item_from_entity(model: OrderItemModel) -> OrderItem {
    OrderItem {
        id: model.id,
        order_id: model.order_id,
        menu_item_id: model.menu_item_id,
        quantity: model.quantity,
        price: model.price,
    }
}
