//! Config actions

mod get_config;
mod update_config;

pub use get_config::GetConfigAction;
pub use update_config::UpdateConfigAction;
