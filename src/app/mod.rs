pub mod components;
pub mod layouts;
pub mod pages;

// Re-export the book reader App
pub use pages::book_routes::App;
