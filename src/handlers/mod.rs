pub mod depositor_handlers;
pub mod health;
pub mod params;

pub use depositor_handlers::create_depositor_routes;
pub use health::health_check;
