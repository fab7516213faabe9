pub mod feed_watcher;
pub mod health_routes;
pub mod relay;
pub mod server;

pub use server::run;
