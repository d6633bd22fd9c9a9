pub mod book_routes;

pub use book_routes::{App, Route};
