pub mod forms;
pub mod sitemap;

pub mod catalog_service;
pub mod catalog_service_impl;
pub use catalog_service::{CatalogError, CatalogService};
pub use catalog_service_impl::SeaOrmCatalogService;

pub mod admin_service;
pub mod admin_service_impl;
pub use admin_service::{AdminError, AdminService, Dashboard, MediaDetail};
pub use admin_service_impl::SeaOrmAdminService;

pub mod interaction_service;
pub mod interaction_service_impl;
pub use interaction_service::{InteractionError, InteractionService};
pub use interaction_service_impl::SeaOrmInteractionService;

pub mod suggestion_service;
pub mod suggestion_service_impl;
pub use suggestion_service::{SuggestionError, SuggestionService};
pub use suggestion_service_impl::SeaOrmSuggestionService;

pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService, SignupRequest};
pub use auth_service_impl::SeaOrmAuthService;
