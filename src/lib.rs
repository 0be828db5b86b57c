//! roster: terminal front end for an employee/department REST backend

pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod export;
pub mod infrastructure;
pub mod logging;
pub mod ui;
