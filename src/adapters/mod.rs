pub mod health_handler;
pub mod schema_handler;
pub mod ui_handler;
