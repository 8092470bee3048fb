// Public handlers: site listing, login, health.
// Admin handlers: site creation, guarded by `admin_auth_middleware` in `app.rs`.
pub mod login;
pub mod sites;
pub mod system;

pub use login::login;
pub use sites::{site_create, site_list};
pub use system::{health, root};
