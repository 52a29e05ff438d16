pub mod attendance;
pub mod deduction;
pub mod leave;
pub mod leave_policy;
pub mod salary_record;
pub mod salary_structure;
pub mod user;

// Re-export all repositories for easy importing
pub use attendance::AttendanceRepository;
pub use deduction::DeductionRepository;
pub use leave::LeaveRepository;
pub use leave_policy::LeavePolicyRepository;
pub use salary_record::SalaryRecordRepository;
pub use salary_structure::SalaryStructureRepository;
pub use user::UserRepository;
