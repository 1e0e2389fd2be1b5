// Messaging - lock-free plumbing between threads

pub mod channels;
pub mod command;
pub mod notification;
