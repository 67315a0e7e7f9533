//! Polls a Netatmo weather station and forwards changed readings to a
//! Zipabox home-automation gateway.

pub mod auth;
pub mod command;
pub mod config;
pub mod constants;
pub mod data_mgmt;
pub mod helpers;
pub mod interfaces;
pub mod poller;
