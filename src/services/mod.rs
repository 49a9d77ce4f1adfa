pub mod admin_service;
pub mod auth_service;
pub mod menu_service;
pub mod order_service;
