use async_trait::async_trait;
use chrono::Utc;
use newsroom_admin_service::{
    domain::{
        entities::{LiveStream, LiveStreamId, Role, RoleId, User, UserId},
        repositories::{LiveStreamRepository, UserRepository},
        value_objects::{AccountStatus, RoleName},
    },
    infrastructure::{
        config::{
            AppConfig, AuthConfig, DatabaseConfig, LogFormat, LoggingConfig, RuntimeMode,
            ServerConfig, StorageConfig,
        },
        http::create_app,
        storage::FilesystemStorage,
    },
    presentation::{
        handlers::AppState,
        middleware::{auth::JwtService, error::AppError},
    },
};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use super::test_app::TestApp;

pub const JWT_SECRET: &str = "integration-test-secret";
pub const MAX_UPLOAD_SIZE: u64 = 5 * 1024 * 1024;

pub fn role(name: RoleName) -> Role {
    let id = match name {
        RoleName::Administrator => 1,
        RoleName::Journalist => 2,
        RoleName::Reader => 3,
    };
    Role::new(RoleId::new(id), name)
}

pub fn user(id: i64, role_name: RoleName) -> User {
    let now = Utc::now();
    User {
        id: UserId::new(id),
        email: format!("user{id}@newsroom.test"),
        name: format!("Nombre{id}"),
        surname: format!("Apellido{id}"),
        status: AccountStatus::Active,
        role: role(role_name),
        profile: None,
        created_at: now,
        updated_at: now,
    }
}

#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<Mutex<BTreeMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn with_users(users: Vec<User>) -> Self {
        let users = users.into_iter().map(|u| (u.id, u)).collect();
        Self { users: Arc::new(Mutex::new(users)) }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    type Error = AppError;

    async fn find_all(&self) -> Result<Vec<User>, Self::Error> {
        Ok(self.users.lock().unwrap().values().cloned().collect())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, Self::Error> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn find_role_by_id(&self, id: RoleId) -> Result<Option<Role>, Self::Error> {
        let name = match id.as_i64() {
            1 => RoleName::Administrator,
            2 => RoleName::Journalist,
            3 => RoleName::Reader,
            _ => return Ok(None),
        };
        Ok(Some(role(name)))
    }

    async fn update(&self, user: &User) -> Result<bool, Self::Error> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|other| other.id != user.id && other.email == user.email) {
            return Err(AppError::Conflict {
                message: format!("El email {} ya está registrado", user.email),
            });
        }
        if users.contains_key(&user.id) {
            users.insert(user.id, user.clone());
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn delete(&self, id: UserId) -> Result<bool, Self::Error> {
        Ok(self.users.lock().unwrap().remove(&id).is_some())
    }

    async fn health_check(&self) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryLiveStreamRepository {
    streams: Arc<Mutex<(i64, BTreeMap<LiveStreamId, LiveStream>)>>,
}

impl InMemoryLiveStreamRepository {
    fn switch_off_others(streams: &mut BTreeMap<LiveStreamId, LiveStream>, keep: LiveStreamId) {
        for stream in streams.values_mut().filter(|s| s.id != keep) {
            stream.active = false;
        }
    }
}

#[async_trait]
impl LiveStreamRepository for InMemoryLiveStreamRepository {
    type Error = AppError;

    async fn insert(&self, stream: &LiveStream) -> Result<LiveStream, Self::Error> {
        let mut guard = self.streams.lock().unwrap();
        let (next_id, streams) = &mut *guard;
        *next_id += 1;

        let mut saved = stream.clone();
        saved.id = LiveStreamId::new(*next_id);
        if saved.active {
            Self::switch_off_others(streams, saved.id);
        }
        streams.insert(saved.id, saved.clone());
        Ok(saved)
    }

    async fn find_by_id(&self, id: LiveStreamId) -> Result<Option<LiveStream>, Self::Error> {
        Ok(self.streams.lock().unwrap().1.get(&id).cloned())
    }

    async fn find_active(&self) -> Result<Option<LiveStream>, Self::Error> {
        Ok(self.streams.lock().unwrap().1.values().find(|s| s.active).cloned())
    }

    async fn find_all(&self) -> Result<Vec<LiveStream>, Self::Error> {
        let guard = self.streams.lock().unwrap();
        let mut all: Vec<LiveStream> = guard.1.values().cloned().collect();
        all.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(all)
    }

    async fn update(&self, stream: &LiveStream) -> Result<bool, Self::Error> {
        let mut guard = self.streams.lock().unwrap();
        let streams = &mut guard.1;
        if !streams.contains_key(&stream.id) {
            return Ok(false);
        }
        if stream.active {
            Self::switch_off_others(streams, stream.id);
        }
        streams.insert(stream.id, stream.clone());
        Ok(true)
    }

    async fn delete(&self, id: LiveStreamId) -> Result<bool, Self::Error> {
        Ok(self.streams.lock().unwrap().1.remove(&id).is_some())
    }

    async fn health_check(&self) -> Result<(), Self::Error> {
        Ok(())
    }
}

pub fn test_config(uploads_dir: &str) -> AppConfig {
    AppConfig {
        mode: RuntimeMode::Local,
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            max_upload_size: MAX_UPLOAD_SIZE,
            request_timeout_seconds: 30,
        },
        database: DatabaseConfig {
            url: String::new(),
            max_connections: 1,
            min_connections: 0,
            acquire_timeout_seconds: 1,
            host: "localhost".to_string(),
            port: 5432,
            database: "newsroom_test".to_string(),
            schema: "public".to_string(),
            user: "postgres".to_string(),
            password: String::new(),
        },
        storage: StorageConfig {
            uploads_dir: uploads_dir.to_string(),
            public_url_prefix: "/api/uploads".to_string(),
            max_concurrent_io: 4,
        },
        auth: AuthConfig { jwt_secret: JWT_SECRET.to_string() },
        logging: LoggingConfig { level: "debug".to_string(), filter: None, format: LogFormat::Compact },
    }
}

/// Token signed with the test secret for user `id`
pub fn token_for(id: i64, role_name: RoleName) -> String {
    JwtService::new(JWT_SECRET)
        .create_access_token(UserId::new(id), format!("user{id}@newsroom.test"), role_name, 1)
        .unwrap()
}

pub struct TestContext {
    pub app: TestApp,
    pub uploads_dir: TempDir,
}

/// Full router over in-memory repositories and a temporary uploads directory
pub async fn spawn_app(users: Vec<User>) -> TestContext {
    let uploads_dir = TempDir::new().unwrap();
    let config = test_config(&uploads_dir.path().to_string_lossy());
    let storage = FilesystemStorage::open(uploads_dir.path(), "/api/uploads", 4).await.unwrap();

    let state = AppState {
        users: Arc::new(InMemoryUserRepository::with_users(users)),
        live_streams: Arc::new(InMemoryLiveStreamRepository::default()),
        storage: Arc::new(storage),
        jwt: JwtService::new(JWT_SECRET),
        max_upload_size: MAX_UPLOAD_SIZE,
    };

    TestContext { app: TestApp::new(create_app(&config, state)), uploads_dir }
}
