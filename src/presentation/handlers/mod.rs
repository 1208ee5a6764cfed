pub mod live_streams;
pub mod uploads;
pub mod users;

use axum::extract::FromRef;
use std::sync::Arc;

use crate::domain::repositories::{LiveStreamRepository, UserRepository};
use crate::infrastructure::storage::AssetStorage;
use crate::presentation::middleware::{auth::JwtService, error::AppError};

pub type DynUserRepository = dyn UserRepository<Error = AppError>;
pub type DynLiveStreamRepository = dyn LiveStreamRepository<Error = AppError>;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<DynUserRepository>,
    pub live_streams: Arc<DynLiveStreamRepository>,
    pub storage: Arc<dyn AssetStorage>,
    pub jwt: JwtService,
    pub max_upload_size: u64,
}

impl FromRef<AppState> for JwtService {
    fn from_ref(state: &AppState) -> Self {
        state.jwt.clone()
    }
}
