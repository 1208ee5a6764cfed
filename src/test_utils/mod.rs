#[cfg(test)]
pub mod mocks {
    use async_trait::async_trait;
    use chrono::Utc;
    use std::collections::{BTreeMap, HashMap};
    use std::sync::{Arc, Mutex};

    use crate::domain::{
        entities::{LiveStream, LiveStreamId, Role, RoleId, User, UserId},
        repositories::{LiveStreamRepository, UserRepository},
        value_objects::{AccountStatus, RoleName},
    };
    use crate::presentation::middleware::error::AppError;

    /// The three seeded roles, ids 1..=3
    pub fn default_roles() -> Vec<Role> {
        vec![
            Role::new(RoleId::new(1), RoleName::Administrator),
            Role::new(RoleId::new(2), RoleName::Journalist),
            Role::new(RoleId::new(3), RoleName::Reader),
        ]
    }

    /// Active reader with a predictable email
    pub fn sample_user(id: i64) -> User {
        let now = Utc::now();
        User {
            id: UserId::new(id),
            email: format!("user{id}@example.com"),
            name: format!("Name{id}"),
            surname: format!("Surname{id}"),
            status: AccountStatus::Active,
            role: Role::new(RoleId::new(3), RoleName::Reader),
            profile: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Simple in-memory user repository for testing
    #[derive(Clone)]
    pub struct InMemoryUserRepository {
        users: Arc<Mutex<BTreeMap<UserId, User>>>,
        roles: Arc<Mutex<HashMap<RoleId, Role>>>,
    }

    impl Default for InMemoryUserRepository {
        fn default() -> Self {
            Self::new()
        }
    }

    impl InMemoryUserRepository {
        pub fn new() -> Self {
            let roles = default_roles().into_iter().map(|role| (role.id, role)).collect();
            Self { users: Arc::new(Mutex::new(BTreeMap::new())), roles: Arc::new(Mutex::new(roles)) }
        }

        /// # Panics
        /// Panics if the internal mutex is poisoned
        #[must_use]
        pub fn with_user(self, user: User) -> Self {
            self.users.lock().unwrap().insert(user.id, user);
            self
        }

        /// Snapshot of a stored user, bypassing the trait
        pub fn stored(&self, id: UserId) -> Option<User> {
            self.users.lock().unwrap().get(&id).cloned()
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
            Ok(self.roles.lock().unwrap().get(&id).cloned())
        }

        async fn update(&self, user: &User) -> Result<bool, Self::Error> {
            let mut users = self.users.lock().unwrap();
            if users.values().any(|other| other.id != user.id && other.email == user.email) {
                return Err(AppError::Conflict {
                    message: format!("El email {} ya está registrado", user.email),
                });
            }
            match users.get_mut(&user.id) {
                Some(stored) => {
                    *stored = user.clone();
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn delete(&self, id: UserId) -> Result<bool, Self::Error> {
            Ok(self.users.lock().unwrap().remove(&id).is_some())
        }

        async fn health_check(&self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct LiveStreamState {
        streams: BTreeMap<LiveStreamId, LiveStream>,
        next_id: i64,
    }

    impl LiveStreamState {
        fn deactivate_others(&mut self, keep: LiveStreamId) {
            let now = Utc::now();
            for stream in self.streams.values_mut().filter(|s| s.active && s.id != keep) {
                stream.active = false;
                stream.updated_at = now;
            }
        }
    }

    /// In-memory live stream repository; one lock guards the whole activation swap
    #[derive(Clone, Default)]
    pub struct InMemoryLiveStreamRepository {
        state: Arc<Mutex<LiveStreamState>>,
    }

    impl InMemoryLiveStreamRepository {
        pub fn new() -> Self {
            Self::default()
        }

        /// Number of records currently flagged active
        pub fn active_count(&self) -> usize {
            self.state.lock().unwrap().streams.values().filter(|s| s.active).count()
        }
    }

    #[async_trait]
    impl LiveStreamRepository for InMemoryLiveStreamRepository {
        type Error = AppError;

        async fn insert(&self, stream: &LiveStream) -> Result<LiveStream, Self::Error> {
            let mut state = self.state.lock().unwrap();
            state.next_id += 1;

            let mut saved = stream.clone();
            saved.id = LiveStreamId::new(state.next_id);

            if saved.active {
                state.deactivate_others(saved.id);
            }
            state.streams.insert(saved.id, saved.clone());
            Ok(saved)
        }

        async fn find_by_id(&self, id: LiveStreamId) -> Result<Option<LiveStream>, Self::Error> {
            Ok(self.state.lock().unwrap().streams.get(&id).cloned())
        }

        async fn find_active(&self) -> Result<Option<LiveStream>, Self::Error> {
            let state = self.state.lock().unwrap();
            Ok(state.streams.values().filter(|s| s.active).max_by_key(|s| (s.created_at, s.id)).cloned())
        }

        async fn find_all(&self) -> Result<Vec<LiveStream>, Self::Error> {
            let state = self.state.lock().unwrap();
            let mut streams: Vec<LiveStream> = state.streams.values().cloned().collect();
            streams.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
            Ok(streams)
        }

        async fn update(&self, stream: &LiveStream) -> Result<bool, Self::Error> {
            let mut state = self.state.lock().unwrap();
            if !state.streams.contains_key(&stream.id) {
                return Ok(false);
            }

            if stream.active {
                state.deactivate_others(stream.id);
            }
            state.streams.insert(stream.id, stream.clone());
            Ok(true)
        }

        async fn delete(&self, id: LiveStreamId) -> Result<bool, Self::Error> {
            Ok(self.state.lock().unwrap().streams.remove(&id).is_some())
        }

        async fn health_check(&self) -> Result<(), Self::Error> {
            Ok(())
        }
    }
}
