mod common;

use common::{customer, price};
use restaurant_storefront::{
    db::{create_orm_conn, run_migrations},
    models::{MenuItemPatch, NewMenuItem, NewOrder, NewOrderItem, OrderStatus, OrderType},
    store::{MemoryStore, MenuCatalogStore, OrderFilter, OrderStore, PgStore, StoreError},
};
use sea_orm::{ConnectionTrait, Statement};
use uuid::Uuid;

fn pizza() -> NewMenuItem {
    NewMenuItem {
        name: "Margherita Pizza".to_string(),
        description: Some("Tomato, mozzarella, basil".to_string()),
        price: price(1299),
        image_url: None,
        category: Some("Pizza".to_string()),
        is_available: true,
    }
}

fn pending_order(total: rust_decimal::Decimal) -> NewOrder {
    let details = customer();
    NewOrder {
        customer_name: details.name,
        customer_email: details.email,
        customer_phone: details.phone,
        total_amount: total,
        status: OrderStatus::Pending,
        order_type: OrderType::Pickup,
        delivery_address: None,
    }
}

async fn exercise_catalog(store: &dyn MenuCatalogStore) -> anyhow::Result<()> {
    let created = store.create_menu_item(pizza()).await?;
    let fetched = store
        .get_menu_item(created.id)
        .await?
        .expect("menu item stored");
    assert_eq!(fetched.price, price(1299));
    assert_eq!(fetched.price.to_string(), "12.99");
    assert_eq!(fetched.name, "Margherita Pizza");
    assert!(fetched.is_available);

    let updated = store
        .update_menu_item(
            created.id,
            MenuItemPatch {
                price: Some(price(1350)),
                is_available: Some(false),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(updated.price, price(1350));
    assert!(!updated.is_available);
    assert_eq!(updated.description.as_deref(), Some("Tomato, mozzarella, basil"));

    let missing = store
        .update_menu_item(
            Uuid::new_v4(),
            MenuItemPatch {
                name: Some("Ghost".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(missing, Err(StoreError::NotFound)));

    store.delete_menu_item(created.id).await?;
    assert!(store.get_menu_item(created.id).await?.is_none());
    assert!(matches!(
        store.delete_menu_item(created.id).await,
        Err(StoreError::NotFound)
    ));
    Ok(())
}

#[tokio::test]
async fn memory_catalog_round_trip() -> anyhow::Result<()> {
    exercise_catalog(&MemoryStore::new()).await
}

#[tokio::test]
async fn postgres_catalog_and_order_write() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run Postgres store tests.");
            return Ok(());
        }
    };

    let conn = create_orm_conn(&database_url).await?;
    run_migrations(&conn).await?;
    conn.execute(Statement::from_string(
        conn.get_database_backend(),
        "TRUNCATE TABLE order_items, orders, menu_items CASCADE",
    ))
    .await?;
    let store = PgStore::new(conn);

    exercise_catalog(&store).await?;

    let salad = store
        .create_menu_item(NewMenuItem {
            name: "Caesar Salad".to_string(),
            price: price(875),
            ..pizza()
        })
        .await?;
    let placed = store
        .place_order(
            pending_order(price(1750)),
            vec![NewOrderItem {
                menu_item_id: salad.id,
                quantity: 2,
                price: salad.price,
            }],
        )
        .await?;
    assert_eq!(placed.items.len(), 1);
    assert_eq!(placed.items[0].order_id, placed.order.id);

    let stored = store
        .get_order(placed.order.id)
        .await?
        .expect("order stored");
    assert_eq!(stored.order.total_amount, price(1750));
    assert_eq!(stored.order.status, OrderStatus::Pending);
    assert_eq!(stored.items[0].price, price(875));
    assert_eq!(stored.items[0].quantity, 2);

    // A zero quantity violates the column check, so nothing of the order survives.
    let failed = store
        .place_order(
            pending_order(price(0)),
            vec![NewOrderItem {
                menu_item_id: salad.id,
                quantity: 0,
                price: salad.price,
            }],
        )
        .await;
    assert!(failed.is_err());

    let (orders, total) = store
        .list_orders(OrderFilter {
            status: Some("PENDING".to_string()),
            newest_first: true,
            limit: 10,
            offset: 0,
        })
        .await?;
    assert_eq!(total, 1);
    assert_eq!(orders[0].id, placed.order.id);
    Ok(())
}
