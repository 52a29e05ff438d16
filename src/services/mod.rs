pub mod auth;
pub mod leave;
pub mod notifications;
pub mod payroll;

pub use auth::{AuthService, Claims};
pub use leave::LeaveService;
pub use notifications::NotificationService;
pub use payroll::PayrollService;
