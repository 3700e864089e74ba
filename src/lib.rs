pub mod config;
pub mod db;
pub mod directory;
pub mod models;
pub mod responses;
pub mod routes;
pub mod session;
pub mod state;

pub use state::AppState;
