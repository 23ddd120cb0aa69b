#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration, Utc};
use restaurant_storefront::{
    middleware::auth::{AdminPolicy, JwtVerifier, issue_token},
    models::MenuItem,
    payment::MockPaymentProvider,
    state::AppState,
    store::{MemoryStore, MenuCatalogStore, OrderStore},
    storefront::CustomerDetails,
};
use rust_decimal::Decimal;
use uuid::Uuid;

pub const SECRET: &str = "test-secret";
pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const PAYMENT_BASE: &str = "https://pay.test";

pub fn price(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

pub fn menu_item(name: &str, cents: i64) -> MenuItem {
    let now = Utc::now();
    MenuItem {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: None,
        price: price(cents),
        image_url: None,
        category: Some("Pizza".to_string()),
        is_available: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn customer() -> CustomerDetails {
    CustomerDetails {
        name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        phone: Some("123-456-7890".to_string()),
        address: None,
    }
}

pub fn state_with(catalog: Arc<dyn MenuCatalogStore>, orders: Arc<dyn OrderStore>) -> AppState {
    AppState::new(
        catalog,
        orders,
        Arc::new(JwtVerifier::from_secret(SECRET)),
        AdminPolicy::new([ADMIN_EMAIL, "your.admin.email@example.com"]),
        Arc::new(MockPaymentProvider::new(PAYMENT_BASE)),
    )
}

pub fn memory_state() -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (state_with(store.clone(), store.clone()), store)
}

pub fn bearer(email: Option<&str>) -> String {
    let token = issue_token(SECRET, "user_123", email, Duration::minutes(5)).expect("token");
    format!("Bearer {token}")
}
