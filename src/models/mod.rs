pub mod activity_log;
pub mod branch;
pub mod document;
pub mod message;
pub mod notification;
pub mod payment;
pub mod request;
pub mod supervisor;
pub mod worker;

pub use document::Document;
