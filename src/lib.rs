pub mod config;
pub mod errors;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod schema;
pub mod types;

pub use config::ServerConfig;
pub use errors::AppError;
pub use routes::create_router;
