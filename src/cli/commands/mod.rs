pub mod alerts;
pub mod backup;
pub mod branch;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod init;
pub mod log;
pub mod me;
pub mod msg;
pub mod notify;
pub mod passwd;
pub mod pay;
pub mod report;
pub mod request;
pub mod reset;
pub mod restore;
pub mod supervisor;
pub mod worker;
