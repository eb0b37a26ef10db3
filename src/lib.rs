pub mod config;
pub mod db;
pub mod domain;
pub mod gamification;
pub mod handlers;
pub mod paths;
pub mod quiz;
pub mod services;
pub mod srs;
pub mod state;
pub mod validation;

#[cfg(test)]
pub mod testing;
