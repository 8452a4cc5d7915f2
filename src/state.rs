//! Shared application state injected into every handler.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{
    AuthService, RedirectService, TokenSettings, UrlService, UserService,
};
use crate::infrastructure::persistence::{PgUrlRepository, PgUserRepository};
use crate::infrastructure::storage::ObjectStorage;

#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService<PgUrlRepository, PgUserRepository>>,
    pub redirect_service: Arc<RedirectService<PgUrlRepository>>,
    pub user_service: Arc<UserService<PgUserRepository, PgUrlRepository>>,
    pub auth_service: Arc<AuthService<PgUserRepository>>,
    pub storage: Arc<dyn ObjectStorage>,
    pub db: Arc<PgPool>,
}

impl AppState {
    /// Wires repositories and services over one connection pool.
    pub fn new(
        pool: Arc<PgPool>,
        storage: Arc<dyn ObjectStorage>,
        tokens: TokenSettings,
        base_url: String,
    ) -> Self {
        let url_repository = Arc::new(PgUrlRepository::new(pool.clone()));
        let user_repository = Arc::new(PgUserRepository::new(pool.clone()));

        let url_service = Arc::new(UrlService::new(
            url_repository.clone(),
            user_repository.clone(),
            base_url,
        ));
        let redirect_service = Arc::new(RedirectService::new(url_repository));
        let user_service = Arc::new(UserService::new(
            user_repository.clone(),
            url_service.clone(),
            storage.clone(),
        ));
        let auth_service = Arc::new(AuthService::new(user_repository, tokens));

        Self {
            url_service,
            redirect_service,
            user_service,
            auth_service,
            storage,
            db: pool,
        }
    }
}
