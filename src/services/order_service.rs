use crate::{
    dto::{
        checkout::{CheckoutConfirmation, CheckoutRequest},
        orders::{OrderList, OrderWithItems},
    },
    error::{AppError, AppResult},
    middleware::auth::AdminUser,
    models::{NewOrder, NewOrderItem, OrderStatus, OrderType, check_amount},
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, SortOrder},
    state::AppState,
    store::OrderFilter,
    storefront::{CartLine, subtotal_of, validate},
};
use uuid::Uuid;

const ORDER_FAILED: &str = "Failed to process order";

/// Persists a checkout as a PENDING order and opens a payment session for it.
pub async fn checkout(
    state: &AppState,
    payload: CheckoutRequest,
) -> AppResult<ApiResponse<CheckoutConfirmation>> {
    let CheckoutRequest {
        cart,
        customer_details,
        order_type,
        total_amount,
    } = payload;

    validate(&cart, &customer_details, order_type)?;
    let items = order_items_from_cart(&cart)?;

    let computed = subtotal_of(&cart);
    check_amount(computed).map_err(|e| AppError::BadRequest(format!("order total {e}")))?;
    // Clients may post the total as a float, so only cents are compared.
    if computed.round_dp(2) != total_amount.round_dp(2) {
        tracing::warn!(%computed, submitted = %total_amount, "checkout total mismatch");
        return Err(AppError::BadRequest(
            "total amount does not match cart".to_string(),
        ));
    }

    let delivery_address = match order_type {
        OrderType::Delivery => customer_details.address().map(str::to_string),
        OrderType::Pickup => None,
    };
    let new_order = NewOrder {
        customer_name: customer_details.name.trim().to_string(),
        customer_email: customer_details.email.trim().to_string(),
        customer_phone: customer_details.phone().map(str::to_string),
        total_amount: computed,
        status: OrderStatus::Pending,
        order_type,
        delivery_address,
    };

    let line_count = items.len();
    let placed = match state.orders.place_order(new_order, items).await {
        Ok(placed) => placed,
        Err(err) => {
            tracing::error!(
                operation = "place_order",
                error = %err,
                lines = line_count,
                "order write failed"
            );
            return Err(AppError::Storage(ORDER_FAILED));
        }
    };

    let session = match state.payments.create_session(&placed.order) {
        Ok(session) => session,
        Err(err) => {
            tracing::error!(
                operation = "create_payment_session",
                error = %err,
                order_id = %placed.order.id,
                "payment session failed for stored order"
            );
            return Err(AppError::Storage(ORDER_FAILED));
        }
    };

    tracing::info!(
        order_id = %placed.order.id,
        total = %placed.order.total_amount,
        lines = placed.items.len(),
        order_type = placed.order.order_type.as_token(),
        "order placed"
    );

    Ok(ApiResponse::success(
        "Order placed successfully!",
        CheckoutConfirmation {
            message: "Order placed successfully!".to_string(),
            order_id: placed.order.id,
            checkout_url: session.url,
        },
        Some(Meta::empty()),
    ))
}

fn order_items_from_cart(cart: &[CartLine]) -> AppResult<Vec<NewOrderItem>> {
    let mut items = Vec::with_capacity(cart.len());
    for line in cart {
        let quantity = i32::try_from(line.quantity)
            .ok()
            .filter(|q| *q > 0)
            .ok_or_else(|| AppError::BadRequest("Cart has invalid quantity".into()))?;
        if !line.item.is_available() {
            return Err(AppError::BadRequest(format!(
                "{} is not available",
                line.item.name()
            )));
        }
        check_amount(line.item.price()).map_err(|e| {
            AppError::BadRequest(format!("{} price {e}", line.item.name()))
        })?;
        items.push(NewOrderItem {
            menu_item_id: line.item.id(),
            quantity,
            price: line.item.price(),
        });
    }
    Ok(items)
}

pub async fn list_orders(
    state: &AppState,
    _admin: &AdminUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let (page, limit, offset) = query.pagination().normalize();

    let status = match query.status.as_deref().filter(|s| !s.is_empty()) {
        Some(raw) => {
            let status: OrderStatus = raw
                .to_uppercase()
                .parse()
                .map_err(|_| AppError::BadRequest("Invalid order status".into()))?;
            Some(status.as_str().to_string())
        }
        None => None,
    };
    let newest_first = matches!(query.sort_order.unwrap_or(SortOrder::Desc), SortOrder::Desc);

    let filter = OrderFilter {
        status,
        newest_first,
        limit: limit as u64,
        offset: offset as u64,
    };
    let (orders, total) = state
        .orders
        .list_orders(filter)
        .await
        .map_err(|e| AppError::from_store("list_orders", "Failed to fetch orders", e))?;

    let meta = Meta::new(page, limit, total as i64);
    Ok(ApiResponse::success(
        "Orders",
        OrderList { items: orders },
        Some(meta),
    ))
}

pub async fn get_order(
    state: &AppState,
    _admin: &AdminUser,
    id: Uuid,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let placed = state
        .orders
        .get_order(id)
        .await
        .map_err(|e| AppError::from_store("get_order", "Failed to fetch order", e))?;
    let placed = match placed {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };

    Ok(ApiResponse::success(
        "Order found",
        OrderWithItems {
            order: placed.order,
            items: placed.items,
        },
        Some(Meta::empty()),
    ))
}
