//! Domain layer shared by server and client builds

pub mod models;
