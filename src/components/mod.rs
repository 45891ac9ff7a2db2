//! UI Components

mod task_list;
mod task_row;

pub use task_list::TaskList;
pub use task_row::TaskRow;
