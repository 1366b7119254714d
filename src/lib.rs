pub mod api;
pub mod client;
pub mod config;
pub mod database;
pub mod graphql;
pub mod middleware;
pub mod models;
pub mod seeds;
pub mod services;
pub mod utils;
