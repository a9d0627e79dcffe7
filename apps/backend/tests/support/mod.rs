#![allow(dead_code)]

pub mod game_driver;
pub mod test_server;
pub mod viewer;
