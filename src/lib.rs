//! Weather data backend for the department dashboard.
//!
//! Modules are exposed here for the binary and for integration tests.

pub mod cli;
pub mod current_weather;
pub mod errors;
pub mod forecast;
pub mod handlers;
pub mod icons;
pub mod initialization;
pub mod logging;
pub mod manager_openweather;
pub mod manager_output;
pub mod manager_scheduler;
pub mod pipeline;
