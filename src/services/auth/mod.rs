pub mod principal;
pub mod resolver;
pub mod roles;
