use crate::domain::entities::{LiveStream, LiveStreamId, Role, RoleId, User, UserId};
use async_trait::async_trait;

/// Repository trait for user accounts and their roles
#[async_trait]
pub trait UserRepository: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// All users with role and profile loaded, ordered by id
    async fn find_all(&self) -> Result<Vec<User>, Self::Error>;

    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, Self::Error>;

    /// Find role by ID
    async fn find_role_by_id(&self, id: RoleId) -> Result<Option<Role>, Self::Error>;

    /// Persist email, names, role, status and `updated_at` of an existing user
    ///
    /// Returns `false` when no row matched the user id.
    async fn update(&self, user: &User) -> Result<bool, Self::Error>;

    /// Physically delete a user row
    async fn delete(&self, id: UserId) -> Result<bool, Self::Error>;

    /// Health check for repository connectivity
    async fn health_check(&self) -> Result<(), Self::Error>;
}

/// Repository trait for live stream records
///
/// `insert` and `update` must keep at most one active stream: when the saved record
/// is active, every other active record is deactivated in the same unit of work.
#[async_trait]
pub trait LiveStreamRepository: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Insert a new record and return it with its assigned ID
    async fn insert(&self, stream: &LiveStream) -> Result<LiveStream, Self::Error>;

    /// Find live stream by ID
    async fn find_by_id(&self, id: LiveStreamId) -> Result<Option<LiveStream>, Self::Error>;

    /// First record with `active = true`, if any
    async fn find_active(&self) -> Result<Option<LiveStream>, Self::Error>;

    /// All records, most recently created first
    async fn find_all(&self) -> Result<Vec<LiveStream>, Self::Error>;

    /// Persist an existing record. Returns `false` when no row matched.
    async fn update(&self, stream: &LiveStream) -> Result<bool, Self::Error>;

    /// Delete live stream by ID
    async fn delete(&self, id: LiveStreamId) -> Result<bool, Self::Error>;

    /// Health check for repository connectivity
    async fn health_check(&self) -> Result<(), Self::Error>;
}
