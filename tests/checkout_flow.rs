mod common;

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use common::{PAYMENT_BASE, customer, memory_state, menu_item, price, state_with};
use restaurant_storefront::{
    dto::checkout::{CheckoutConfirmation, CheckoutRequest},
    error::AppError,
    models::{
        AmountError, NewOrder, NewOrderItem, Order, OrderItem, OrderStatus, OrderType,
        check_amount, max_amount,
    },
    services::order_service,
    store::{MemoryStore, OrderFilter, OrderStore, PlacedOrder, StoreError, StoreResult},
    storefront::{
        CheckoutError, CheckoutGateway, CheckoutSession, GatewayError, InProcessGateway,
        NoticeKind, ValidationError,
    },
};
use uuid::Uuid;

/// Order store whose item insert always fails, to exercise the undo path.
struct FailingItemsStore {
    inner: MemoryStore,
}

#[async_trait]
impl OrderStore for FailingItemsStore {
    async fn create_order(&self, order: NewOrder) -> StoreResult<Order> {
        self.inner.create_order(order).await
    }

    async fn create_order_items(
        &self,
        _order_id: Uuid,
        _items: Vec<NewOrderItem>,
    ) -> StoreResult<Vec<OrderItem>> {
        Err(StoreError::Unavailable("order_items is read-only".into()))
    }

    async fn delete_order(&self, id: Uuid) -> StoreResult<()> {
        self.inner.delete_order(id).await
    }

    async fn get_order(&self, id: Uuid) -> StoreResult<Option<PlacedOrder>> {
        self.inner.get_order(id).await
    }

    async fn list_orders(&self, filter: OrderFilter) -> StoreResult<(Vec<Order>, u64)> {
        self.inner.list_orders(filter).await
    }
}

/// Never answers.
struct StalledGateway;

#[async_trait]
impl CheckoutGateway for StalledGateway {
    async fn submit(&self, _request: CheckoutRequest) -> Result<CheckoutConfirmation, GatewayError> {
        std::future::pending().await
    }
}

fn all_orders() -> OrderFilter {
    OrderFilter {
        status: None,
        newest_first: true,
        limit: 100,
        offset: 0,
    }
}

fn filled_session() -> CheckoutSession {
    let mut session = CheckoutSession::new();
    let pizza = menu_item("Margherita Pizza", 1299);
    let salad = menu_item("Caesar Salad", 875);
    session.add_item(&pizza);
    session.add_item(&pizza);
    session.add_item(&salad);
    *session.customer_mut() = customer();
    session.open_cart();
    session
}

#[tokio::test]
async fn empty_cart_is_rejected_before_submission() -> anyhow::Result<()> {
    let (state, store) = memory_state();
    let gateway = InProcessGateway::new(state);
    let mut session = CheckoutSession::new();
    *session.customer_mut() = customer();

    let err = session.submit(&gateway).await.unwrap_err();

    assert_eq!(err, CheckoutError::Validation(ValidationError::EmptyCart));
    let notice = session.notices().last().expect("failure notice");
    assert_eq!(notice.kind, NoticeKind::Failure);
    assert_eq!(notice.title, "Cart is empty");
    assert_eq!(store.list_orders(all_orders()).await?.1, 0);
    Ok(())
}

#[tokio::test]
async fn delivery_without_address_is_rejected_and_session_kept() -> anyhow::Result<()> {
    let (state, store) = memory_state();
    let gateway = InProcessGateway::new(state);
    let mut session = filled_session();
    session.set_order_type(OrderType::Delivery);

    let err = session.submit(&gateway).await.unwrap_err();

    assert_eq!(
        err,
        CheckoutError::Validation(ValidationError::MissingCustomerInfo)
    );
    assert_eq!(session.total_item_count(), 3);
    assert_eq!(session.customer().name, "Jane Doe");
    assert!(session.is_cart_open());
    assert_eq!(
        session.notices().last().map(|n| n.title.as_str()),
        Some("Missing Information")
    );
    assert_eq!(store.list_orders(all_orders()).await?.1, 0);
    Ok(())
}

#[tokio::test]
async fn successful_pickup_checkout_resets_the_session() -> anyhow::Result<()> {
    let (state, store) = memory_state();
    let gateway = InProcessGateway::new(state);
    let mut session = filled_session();

    let confirmation = session.submit(&gateway).await?;

    assert_eq!(confirmation.message, "Order placed successfully!");
    assert!(confirmation.checkout_url.starts_with(PAYMENT_BASE));
    assert!(session.cart().is_empty());
    assert_eq!(session.customer(), &Default::default());
    assert!(!session.is_cart_open());
    let notice = session.notices().last().expect("success notice");
    assert_eq!(notice.kind, NoticeKind::Success);
    assert_eq!(notice.title, "Order Placed!");
    assert!(notice.description.contains(&confirmation.order_id.to_string()));

    let placed = store
        .get_order(confirmation.order_id)
        .await?
        .expect("order stored");
    assert_eq!(placed.order.status, OrderStatus::Pending);
    assert_eq!(placed.order.order_type, OrderType::Pickup);
    assert_eq!(placed.order.total_amount, price(3473));
    assert_eq!(placed.order.customer_phone.as_deref(), Some("123-456-7890"));
    assert_eq!(placed.order.delivery_address, None);
    assert_eq!(placed.items.len(), 2);
    let quantities: i32 = placed.items.iter().map(|i| i.quantity).sum();
    assert_eq!(quantities, 3);
    assert!(placed.items.iter().any(|i| i.price == price(1299) && i.quantity == 2));
    Ok(())
}

#[tokio::test]
async fn delivery_checkout_stores_the_address() -> anyhow::Result<()> {
    let (state, store) = memory_state();
    let gateway = InProcessGateway::new(state);
    let mut session = filled_session();
    session.set_order_type(OrderType::Delivery);
    session.customer_mut().address = Some("  123 Main St, Anytown  ".to_string());

    let confirmation = session.submit(&gateway).await?;

    let placed = store
        .get_order(confirmation.order_id)
        .await?
        .expect("order stored");
    assert_eq!(placed.order.order_type, OrderType::Delivery);
    assert_eq!(placed.order.order_type.as_token(), "DELIVERY");
    assert_eq!(
        placed.order.delivery_address.as_deref(),
        Some("123 Main St, Anytown")
    );
    Ok(())
}

#[tokio::test]
async fn failed_item_write_leaves_no_order_and_keeps_the_cart() -> anyhow::Result<()> {
    let catalog = Arc::new(MemoryStore::new());
    let orders = Arc::new(FailingItemsStore {
        inner: MemoryStore::new(),
    });
    let state = state_with(catalog, orders.clone());
    let gateway = InProcessGateway::new(state);
    let mut session = filled_session();

    let err = session.submit(&gateway).await.unwrap_err();

    assert_eq!(
        err,
        CheckoutError::Rejected {
            status: 500,
            message: "Failed to process order".to_string(),
        }
    );
    assert_eq!(session.total_item_count(), 3);
    assert_eq!(session.customer().email, "jane@example.com");
    assert!(session.is_cart_open());
    let notice = session.notices().last().expect("failure notice");
    assert_eq!(notice.title, "Order Failed");
    assert_eq!(notice.description, "Failed to process order");

    assert_eq!(orders.list_orders(all_orders()).await?.1, 0);
    Ok(())
}

#[tokio::test]
async fn stalled_endpoint_times_out() -> anyhow::Result<()> {
    let mut session = filled_session().with_submit_timeout(Some(Duration::from_millis(50)));

    let err = session.submit(&StalledGateway).await.unwrap_err();

    assert_eq!(err, CheckoutError::TimedOut(Duration::from_millis(50)));
    assert_eq!(session.total_item_count(), 3);
    let notice = session.notices().last().expect("failure notice");
    assert_eq!(notice.title, "Order Failed");
    assert_eq!(
        notice.description,
        "There was an error processing your order. Please try again."
    );
    Ok(())
}

#[tokio::test]
async fn server_rejects_a_total_that_does_not_match_the_cart() -> anyhow::Result<()> {
    let (state, store) = memory_state();
    let mut cart = restaurant_storefront::storefront::Cart::new();
    cart.add_item(&menu_item("Margherita Pizza", 1299));

    let request = CheckoutRequest {
        cart: cart.lines().to_vec(),
        customer_details: customer(),
        order_type: OrderType::Pickup,
        total_amount: price(1),
    };
    let err = order_service::checkout(&state, request).await.unwrap_err();

    assert!(matches!(err, AppError::BadRequest(_)));
    assert_eq!(err.status_code().as_u16(), 400);
    assert_eq!(store.list_orders(all_orders()).await?.1, 0);
    Ok(())
}

#[tokio::test]
async fn server_rejects_unavailable_cart_lines() -> anyhow::Result<()> {
    let (state, _store) = memory_state();
    let request: CheckoutRequest = serde_json::from_value(serde_json::json!({
        "cart": [{
            "item": {
                "id": Uuid::new_v4(),
                "name": "Calzone",
                "description": null,
                "price": "11.00",
                "imageUrl": null,
                "category": null,
                "isAvailable": false
            },
            "quantity": 1
        }],
        "customerDetails": { "name": "Jane Doe", "email": "jane@example.com" },
        "orderType": "pickup",
        "totalAmount": "11.00"
    }))?;

    let err = order_service::checkout(&state, request).await.unwrap_err();

    assert_eq!(err.to_string(), "Bad Request Calzone is not available");
    Ok(())
}

#[tokio::test]
async fn rejected_checkout_shows_the_bare_reason() -> anyhow::Result<()> {
    let (state, store) = memory_state();
    let gateway = InProcessGateway::new(state);
    let mut odd = menu_item("Margherita Pizza", 0);
    odd.price = rust_decimal::Decimal::new(12999, 3);
    let mut session = CheckoutSession::new();
    session.add_item(&odd);
    *session.customer_mut() = customer();

    let err = session.submit(&gateway).await.unwrap_err();

    let reason = "Margherita Pizza price must have at most two decimal places";
    assert_eq!(
        err,
        CheckoutError::Rejected {
            status: 400,
            message: reason.to_string(),
        }
    );
    let notice = session.notices().last().expect("failure notice");
    assert_eq!(notice.title, "Order Failed");
    assert_eq!(notice.description, reason);
    assert_eq!(session.total_item_count(), 1);
    assert_eq!(store.list_orders(all_orders()).await?.1, 0);
    Ok(())
}

#[test]
fn amounts_must_fit_the_money_columns() {
    assert_eq!(check_amount(price(1299)), Ok(()));
    assert_eq!(check_amount(rust_decimal::Decimal::new(12990, 3)), Ok(()));
    assert_eq!(check_amount(max_amount()), Ok(()));
    assert_eq!(check_amount(price(-1)), Err(AmountError::Negative));
    assert_eq!(
        check_amount(rust_decimal::Decimal::new(12999, 3)),
        Err(AmountError::TooPrecise)
    );
    assert_eq!(
        check_amount(max_amount() + price(1)),
        Err(AmountError::TooLarge)
    );
}
