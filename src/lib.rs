pub mod configuration;
pub mod domain;
pub mod login_client;
pub mod login_handler;
pub mod postgres;
pub mod repository;
pub mod routes;
pub mod session;
pub mod startup;
pub mod telemetry;
pub mod utils;
