use std::sync::Arc;

use crate::{
    config::{AppConfig, StoreBackend},
    db::{create_orm_conn, run_migrations},
    middleware::auth::{AdminPolicy, IdentityVerifier, JwtVerifier},
    payment::{MockPaymentProvider, PaymentProvider},
    store::{MemoryStore, MenuCatalogStore, OrderStore, PgStore},
};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn MenuCatalogStore>,
    pub orders: Arc<dyn OrderStore>,
    pub identity: Arc<dyn IdentityVerifier>,
    pub admin_policy: AdminPolicy,
    pub payments: Arc<dyn PaymentProvider>,
}

impl AppState {
    pub fn new(
        catalog: Arc<dyn MenuCatalogStore>,
        orders: Arc<dyn OrderStore>,
        identity: Arc<dyn IdentityVerifier>,
        admin_policy: AdminPolicy,
        payments: Arc<dyn PaymentProvider>,
    ) -> Self {
        Self {
            catalog,
            orders,
            identity,
            admin_policy,
            payments,
        }
    }

    /// Builds the state for the configured backend, applying migrations when
    /// running against Postgres.
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let identity: Arc<dyn IdentityVerifier> = Arc::new(JwtVerifier::from_secret(&config.jwt_secret));
        let admin_policy = AdminPolicy::new(&config.admin_emails);
        let payments: Arc<dyn PaymentProvider> =
            Arc::new(MockPaymentProvider::new(config.payment_redirect_base.clone()));

        let state = match (config.store_backend, config.database_url.as_deref()) {
            (StoreBackend::Postgres, Some(url)) => {
                let conn = create_orm_conn(url).await?;
                run_migrations(&conn).await?;
                let store = Arc::new(PgStore::new(conn));
                Self::new(store.clone(), store, identity, admin_policy, payments)
            }
            (StoreBackend::Postgres, None) => {
                anyhow::bail!("DATABASE_URL must be set for the postgres store")
            }
            (StoreBackend::Memory, _) => {
                tracing::warn!("using in-memory store, data is lost on restart");
                let store = Arc::new(MemoryStore::new());
                Self::new(store.clone(), store, identity, admin_policy, payments)
            }
        };
        Ok(state)
    }
}
