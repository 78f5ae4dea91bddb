//! Screen rendering

pub mod chat;
