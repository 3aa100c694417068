use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AdminService, AuthService, CatalogService, InteractionService, SeaOrmAdminService,
    SeaOrmAuthService, SeaOrmCatalogService, SeaOrmInteractionService, SeaOrmSuggestionService,
    SuggestionService,
};

/// Everything a request handler may reach, built once at start-up.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub catalog_service: Arc<dyn CatalogService>,

    pub admin_service: Arc<dyn AdminService>,

    pub interaction_service: Arc<dyn InteractionService>,

    pub suggestion_service: Arc<dyn SuggestionService>,

    pub auth_service: Arc<dyn AuthService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_url,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Self::with_store(config, store))
    }

    /// Wires the services around an already connected store.
    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let catalog_service = Arc::new(SeaOrmCatalogService::new(
            store.clone(),
            config.catalog.clone(),
        )) as Arc<dyn CatalogService + Send + Sync + 'static>;

        let admin_service = Arc::new(SeaOrmAdminService::new(store.clone()))
            as Arc<dyn AdminService + Send + Sync + 'static>;

        let interaction_service = Arc::new(SeaOrmInteractionService::new(store.clone()))
            as Arc<dyn InteractionService + Send + Sync + 'static>;

        let suggestion_service = Arc::new(SeaOrmSuggestionService::new(
            store.clone(),
            config.catalog.clone(),
        )) as Arc<dyn SuggestionService + Send + Sync + 'static>;

        let auth_service = Arc::new(SeaOrmAuthService::new(
            store.clone(),
            config.security.clone(),
        )) as Arc<dyn AuthService + Send + Sync + 'static>;

        Self {
            config: Arc::new(config),
            store,
            catalog_service,
            admin_service,
            interaction_service,
            suggestion_service,
            auth_service,
        }
    }
}
