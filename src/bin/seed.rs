use std::str::FromStr;

use chrono::Duration;
use restaurant_storefront::{
    config::{DEFAULT_ADMIN_EMAILS, database_url_from_env},
    db::{create_orm_conn, run_migrations},
    middleware::auth::issue_token,
    models::NewMenuItem,
    store::{MenuCatalogStore, PgStore},
};
use rust_decimal::Decimal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let database_url = database_url_from_env()?;
    let orm = create_orm_conn(&database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;

    let store = PgStore::new(orm);
    seed_menu(&store).await?;

    // Handy for trying the admin endpoints locally.
    if let Ok(secret) = std::env::var("JWT_SECRET") {
        let email = DEFAULT_ADMIN_EMAILS[0];
        let token = issue_token(&secret, "seed-admin", Some(email), Duration::hours(24))?;
        println!("Admin token for {email} (24h): Bearer {token}");
    }

    println!("Seed completed");
    Ok(())
}

async fn seed_menu(store: &PgStore) -> anyhow::Result<()> {
    let existing: Vec<String> = store
        .list_menu_items()
        .await?
        .into_iter()
        .map(|item| item.name)
        .collect();

    let menu = [
        ("Margherita Pizza", "Classic pizza with tomato, mozzarella, and basil.", "12.99", "Pizza"),
        ("Pepperoni Pizza", "Pizza with spicy pepperoni and extra cheese.", "14.50", "Pizza"),
        ("Caesar Salad", "Romaine, parmesan, croutons and house dressing.", "8.75", "Salads"),
        ("Tiramisu", "Espresso-soaked ladyfingers with mascarpone.", "6.50", "Desserts"),
    ];

    for (name, description, price, category) in menu {
        if existing.iter().any(|n| n == name) {
            println!("Skipping {name}, already on the menu");
            continue;
        }
        store
            .create_menu_item(NewMenuItem {
                name: name.to_string(),
                description: Some(description.to_string()),
                price: Decimal::from_str(price)?,
                image_url: Some("/placeholder.svg?height=200&width=200".to_string()),
                category: Some(category.to_string()),
                is_available: true,
            })
            .await?;
    }

    println!("Seeded menu");
    Ok(())
}
