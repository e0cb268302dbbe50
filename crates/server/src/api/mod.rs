pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod scrape;

pub use routes::create_router;
