pub mod api;
pub mod auth;
pub mod db;
pub mod error;
pub mod report;
pub mod telemetry;
pub mod view;
