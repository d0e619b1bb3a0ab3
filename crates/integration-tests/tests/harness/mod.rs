#![allow(dead_code)]

pub mod client;
pub mod config;
pub mod server;
pub mod stdio;
pub mod upstream;
