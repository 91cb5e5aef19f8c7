pub mod pre_auth;
pub mod responders;
