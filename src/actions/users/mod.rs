//! User actions

mod add_user;
mod get_user;
mod list_users;
mod remove_user;

pub use add_user::AddUserAction;
pub use get_user::GetUserAction;
pub use list_users::ListUsersAction;
pub use remove_user::RemoveUserAction;
