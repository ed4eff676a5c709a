//! Task actions

mod add_task;
mod delete_task;
mod list_tasks;
mod search_tasks;
mod update_task;

pub use add_task::AddTaskAction;
pub use delete_task::DeleteTaskAction;
pub use list_tasks::ListTasksAction;
pub use search_tasks::SearchTasksAction;
pub use update_task::UpdateTaskAction;
