#![allow(dead_code)]

pub mod capture;
pub mod faults;
pub mod server;
