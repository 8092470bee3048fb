pub mod category;
pub mod site;

pub use category::Category;
pub use site::{InsertMeta, InsertResult, NewSite, Site};
