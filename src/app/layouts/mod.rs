pub mod navbar;
pub mod sidebar;

pub use navbar::AppNavbar;
pub use sidebar::BookSidebar;
