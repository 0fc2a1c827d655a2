pub mod alerts;
pub mod auth;
pub mod backup;
pub mod branch;
pub mod calculator;
pub mod config;
pub mod context;
pub mod dashboard;
pub mod log;
pub mod message;
pub mod payroll;
pub mod report;
pub mod request;
pub mod settings;
pub mod supervisor;
pub mod worker;
