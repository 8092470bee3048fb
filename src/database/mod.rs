pub mod indexes;
pub mod manager;
pub mod models;
pub mod query_builder;
pub mod repository;
pub mod schema;

pub use indexes::IndexEnsurer;
pub use manager::{DatabaseError, DatabaseManager};
pub use repository::{CategoryRepository, SiteRepository};
