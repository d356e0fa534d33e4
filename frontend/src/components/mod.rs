pub mod handlers;
pub mod history;
pub mod preview_area;
pub mod results;
pub mod sidebar;
pub mod upload_section;
pub mod utils;
