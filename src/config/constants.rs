//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// User Roles
// =============================================================================

/// Administrator role with full access to rosters, payments and the shop
pub const ROLE_ADMIN: &str = "admin";

/// Teacher role managing groups, lessons, attendance and points
pub const ROLE_TEACHER: &str = "teacher";

/// Student role consuming the rewards portal
pub const ROLE_STUDENT: &str = "student";

/// All valid role values
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_TEACHER, ROLE_STUDENT];

/// Check if a role value is valid
pub fn is_valid_role(role: &str) -> bool {
    VALID_ROLES.contains(&role)
}

// =============================================================================
// Validation
// =============================================================================

/// Minimum name length requirement
pub const MIN_NAME_LENGTH: u64 = 1;

/// Lowest mark a teacher can award
pub const MIN_MARK: u8 = 1;

/// Highest mark a teacher can award
pub const MAX_MARK: u8 = 10;

/// Smallest amount a student can spend in one go
pub const MIN_SPEND_AMOUNT: i64 = 1;
