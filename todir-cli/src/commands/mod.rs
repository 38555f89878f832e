pub mod add;
pub mod agenda;
pub mod clear;
pub mod config;
pub mod done;
pub mod list;
pub mod remove;
