pub mod analysis;
pub mod config;
pub mod explorer;
pub mod export;
pub mod pipeline;
pub mod render;
pub mod store;
pub mod wallet;
pub mod web;
