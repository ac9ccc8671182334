// kastelen_server/src/web/handlers/mod.rs

pub mod admin_handlers;
pub mod auth_handlers;
pub mod favorite_handlers;
pub mod reservation_handlers;
pub mod user_handlers;
