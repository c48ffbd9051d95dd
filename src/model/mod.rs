pub mod auth;
pub mod config;
pub mod data;
pub mod db;
pub mod service;
pub mod store;
