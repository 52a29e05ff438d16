pub mod attendance;
pub mod auth;
pub mod compensation;
pub mod leave;
pub mod salary;
pub mod shared;
