use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use crate::database::models::{
    CalculationType, LeaveApplication, LeaveApplicationInput, LeaveStatus, LeaveType,
    SalaryDeductionInput,
};
use crate::database::repositories::{
    DeductionRepository, LeavePolicyRepository, LeaveRepository, SalaryStructureRepository,
    UserRepository,
};
use crate::error::AppError;
use crate::payroll::constants::UNPAID_LEAVE_DIVISOR;
use crate::services::notifications::NotificationService;

pub const UNPAID_LEAVE_CODE: &str = "UNPAID_LEAVE";
pub const UNPAID_LEAVE_NAME: &str = "Unpaid Leave";

/// Side effects that run after a status transition has been persisted. Each
/// hook is isolated: a failure is logged and the next hook still runs, and
/// nothing here can undo the transition itself.
#[derive(Debug, Clone, Copy, PartialEq)]
enum PostCommitHook {
    UnpaidLeaveDeduction,
    DecisionEmail,
}

/// Inclusive day count of a leave range. Jan 1 to Jan 5 is 5 days.
pub fn inclusive_day_count(from_date: NaiveDate, to_date: NaiveDate) -> i64 {
    (to_date - from_date).num_days() + 1
}

/// Monetary value of unpaid leave days: monthly gross over a fixed 26-day
/// divisor, rounded to the nearest whole unit.
pub fn unpaid_leave_amount(monthly_gross: f64, total_days: i32) -> f64 {
    let per_day = monthly_gross / UNPAID_LEAVE_DIVISOR;
    (per_day * f64::from(total_days)).round()
}

#[derive(Clone)]
pub struct LeaveService {
    leave_repository: LeaveRepository,
    policy_repository: LeavePolicyRepository,
    structure_repository: SalaryStructureRepository,
    deduction_repository: DeductionRepository,
    user_repository: UserRepository,
    notifications: NotificationService,
}

impl LeaveService {
    pub fn new(
        leave_repository: LeaveRepository,
        policy_repository: LeavePolicyRepository,
        structure_repository: SalaryStructureRepository,
        deduction_repository: DeductionRepository,
        user_repository: UserRepository,
        notifications: NotificationService,
    ) -> Self {
        Self {
            leave_repository,
            policy_repository,
            structure_repository,
            deduction_repository,
            user_repository,
            notifications,
        }
    }

    /// Validate and file a new application. Non-unpaid types are checked
    /// against the employee's per-type policy for the year of `from_date`;
    /// unpaid leave is always permitted.
    pub async fn create_application(
        &self,
        input: LeaveApplicationInput,
    ) -> Result<LeaveApplication, AppError> {
        let total_days = inclusive_day_count(input.from_date, input.to_date);
        if total_days <= 0 {
            return Err(AppError::BadRequest(
                "Leave end date must not be before start date".to_string(),
            ));
        }
        let total_days = total_days as i32;

        if input.leave_type != LeaveType::Unpaid {
            self.check_balance(&input, total_days).await?;
        }

        let application = self
            .leave_repository
            .create(
                &input.username,
                input.leave_type,
                input.from_date,
                input.to_date,
                total_days,
            )
            .await?;

        Ok(application)
    }

    async fn check_balance(
        &self,
        input: &LeaveApplicationInput,
        requested_days: i32,
    ) -> Result<(), AppError> {
        let year = input.from_date.year();

        let policy = self
            .policy_repository
            .find(&input.username, input.leave_type, year)
            .await?;

        let policy = match policy {
            Some(p) if p.is_enabled => p,
            _ => {
                return Err(AppError::BadRequest(format!(
                    "Leave type '{}' is not enabled for this employee",
                    input.leave_type
                )));
            }
        };

        let taken = self
            .leave_repository
            .approved_days_in_year(&input.username, input.leave_type, year)
            .await?;

        if taken + i64::from(requested_days) > i64::from(policy.allowed_days) {
            return Err(AppError::BadRequest(format!(
                "Insufficient leave balance: {} day(s) taken, {} requested, {} allowed",
                taken, requested_days, policy.allowed_days
            )));
        }

        Ok(())
    }

    /// Approve a pending application. Approval is the primary write; the
    /// unpaid-leave deduction and the notification email run as post-commit
    /// hooks and must never undo it.
    pub async fn approve(&self, id: Uuid) -> Result<LeaveApplication, AppError> {
        let existing = self
            .leave_repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Leave application not found".to_string()))?;

        if existing.status != LeaveStatus::Pending {
            return Err(AppError::BadRequest(
                "Only pending leave applications can be approved".to_string(),
            ));
        }

        let approved = self
            .leave_repository
            .approve(id)
            .await?
            .ok_or_else(|| {
                AppError::BadRequest("Only pending leave applications can be approved".to_string())
            })?;

        let mut hooks = Vec::new();
        if approved.leave_type == LeaveType::Unpaid {
            hooks.push(PostCommitHook::UnpaidLeaveDeduction);
        }
        hooks.push(PostCommitHook::DecisionEmail);
        self.run_post_commit_hooks(&approved, &hooks).await;

        Ok(approved)
    }

    /// Reject a pending application, recording the reason.
    pub async fn reject(
        &self,
        id: Uuid,
        reason: Option<String>,
    ) -> Result<LeaveApplication, AppError> {
        let existing = self
            .leave_repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Leave application not found".to_string()))?;

        if existing.status != LeaveStatus::Pending {
            return Err(AppError::BadRequest(
                "Only pending leave applications can be rejected".to_string(),
            ));
        }

        let rejected = self
            .leave_repository
            .reject(id, reason.as_deref())
            .await?
            .ok_or_else(|| {
                AppError::BadRequest("Only pending leave applications can be rejected".to_string())
            })?;

        self.run_post_commit_hooks(&rejected, &[PostCommitHook::DecisionEmail])
            .await;

        Ok(rejected)
    }

    /// Delete an application: pending-only, owner-only.
    pub async fn delete(&self, id: Uuid, requester: &str) -> Result<(), AppError> {
        let existing = self
            .leave_repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Leave application not found".to_string()))?;

        if existing.username != requester {
            return Err(AppError::PermissionDenied(
                "Cannot delete another employee's leave application".to_string(),
            ));
        }

        if existing.status != LeaveStatus::Pending {
            return Err(AppError::BadRequest(
                "Only pending leave applications can be deleted".to_string(),
            ));
        }

        self.leave_repository.delete(id).await?;

        Ok(())
    }

    async fn run_post_commit_hooks(
        &self,
        application: &LeaveApplication,
        hooks: &[PostCommitHook],
    ) {
        for hook in hooks {
            let outcome = match hook {
                PostCommitHook::UnpaidLeaveDeduction => self
                    .apply_unpaid_leave_deduction(application)
                    .await
                    .map(|_| ()),
                PostCommitHook::DecisionEmail => self.notify_decision(application).await,
            };

            if let Err(err) = outcome {
                log::error!(
                    "Post-commit hook {:?} failed for leave {} ({}): {}",
                    hook,
                    application.id,
                    application.username,
                    err
                );
            }
        }
    }

    /// Synthesize the salary deduction for an approved unpaid leave. Skips
    /// insertion when an active deduction of the same type already covers
    /// the leave start date, so overlapping approvals do not double-charge.
    async fn apply_unpaid_leave_deduction(
        &self,
        leave: &LeaveApplication,
    ) -> anyhow::Result<bool> {
        let structure = self
            .structure_repository
            .latest_active(&leave.username)
            .await?
            .ok_or_else(|| {
                anyhow::anyhow!("No active salary structure for {}", leave.username)
            })?;

        let amount = unpaid_leave_amount(structure.monthly_gross(), leave.total_days);

        let deduction_type = self
            .deduction_repository
            .ensure_type(UNPAID_LEAVE_CODE, UNPAID_LEAVE_NAME, CalculationType::Fixed)
            .await?;

        let existing = self
            .deduction_repository
            .active_covering(&leave.username, deduction_type.id, leave.from_date)
            .await?;

        if existing.is_some() {
            log::info!(
                "Unpaid-leave deduction already covers {} on {}, skipping insert",
                leave.username,
                leave.from_date
            );
            return Ok(false);
        }

        self.deduction_repository
            .create_deduction(
                SalaryDeductionInput {
                    username: leave.username.clone(),
                    deduction_type_id: deduction_type.id,
                    amount: Some(amount),
                    percentage: None,
                    effective_from: leave.from_date,
                    effective_to: Some(leave.to_date),
                    reason: Some(format!("Unpaid Leave: {} day(s)", leave.total_days)),
                },
                "system",
            )
            .await?;

        Ok(true)
    }

    /// Email the employee about an approve/reject decision.
    async fn notify_decision(&self, application: &LeaveApplication) -> anyhow::Result<()> {
        let user = self
            .user_repository
            .find_by_username(&application.username)
            .await?
            .ok_or_else(|| anyhow::anyhow!("No user record for {}", application.username))?;

        self.notifications
            .send_leave_decision(&user.email, application)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_count_is_inclusive() {
        let from = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(inclusive_day_count(from, to), 5);
    }

    #[test]
    fn single_day_leave_counts_one() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(inclusive_day_count(day, day), 1);
    }

    #[test]
    fn inverted_range_is_non_positive() {
        let from = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        assert!(inclusive_day_count(from, to) <= 0);
    }

    #[test]
    fn unpaid_amount_uses_fixed_divisor() {
        // 26000 / 26 = 1000 per day
        assert_eq!(unpaid_leave_amount(26000.0, 3), 3000.0);
    }

    #[test]
    fn unpaid_amount_rounds_to_nearest() {
        // 10000 / 26 = 384.615..., * 2 = 769.23... -> 769
        assert_eq!(unpaid_leave_amount(10000.0, 2), 769.0);
    }
}
