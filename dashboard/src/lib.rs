//! Terminal dashboard for a network monitoring backend

pub mod buffer;
pub mod cli;
pub mod config;
pub mod error;
pub mod feeds;
pub mod interfaces;
pub mod poller;
pub mod router;
pub mod rules;
pub mod tui;
pub mod view;
