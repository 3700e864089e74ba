pub mod ensemble;
pub mod organization;
