mod create_live_stream;
mod deactivate_user;
mod delete_asset;
mod delete_live_stream;
mod find_active_live_stream;
mod get_live_stream;
mod get_user;
mod list_live_streams;
mod list_users;
mod purge_user;
mod reactivate_user;
mod retrieve_asset;
mod update_live_stream;
mod update_user;
mod upload_asset;

pub use create_live_stream::CreateLiveStreamUseCase;
pub use deactivate_user::{DEACTIVATED_MESSAGE, DeactivateUserUseCase};
pub use delete_asset::DeleteAssetUseCase;
pub use delete_live_stream::DeleteLiveStreamUseCase;
pub use find_active_live_stream::FindActiveLiveStreamUseCase;
pub use get_live_stream::GetLiveStreamUseCase;
pub use get_user::GetUserUseCase;
pub use list_live_streams::ListLiveStreamsUseCase;
pub use list_users::ListUsersUseCase;
pub use purge_user::{PURGED_MESSAGE, PurgeUserUseCase};
pub use reactivate_user::{REACTIVATED_MESSAGE, ReactivateUserUseCase};
pub use retrieve_asset::{RetrieveAssetUseCase, RetrievedAsset};
pub use update_live_stream::UpdateLiveStreamUseCase;
pub use update_user::UpdateUserUseCase;
pub use upload_asset::UploadAssetUseCase;
