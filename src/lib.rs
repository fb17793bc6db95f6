//! presence-watch: account presence and profile watcher
//!
//! A library for polling an account's presence and "about" text from the
//! upstream API and notifying a webhook whenever either changes.

pub mod config;
pub mod detector;
pub mod fetcher;
pub mod scheduler;
pub mod time;
pub mod transport;
pub mod webhook;
