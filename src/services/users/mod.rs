mod service;

pub use service::{NewUser, UserService, UserServiceError};
