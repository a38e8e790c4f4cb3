pub mod booking;
pub mod cli;
pub mod data;
pub mod entity;
pub mod error;
pub mod forms;
pub mod server;
