pub mod forms;
pub mod models;
