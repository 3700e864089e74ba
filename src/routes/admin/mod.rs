pub mod ensembles;
pub mod login;
pub mod organizations;
pub mod session;
pub mod submissions;

pub use ensembles::{create_ensemble, update_ensemble};
pub use login::{admin_status, handle_login, handle_logout};
pub use organizations::{create_organization, update_organization};
pub use session::AdminSession;
pub use submissions::submit_directory;
