pub mod create;
pub mod list;
pub mod utils;

pub use create::create as site_create;
pub use list::list as site_list;
