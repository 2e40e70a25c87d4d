//! Input validation before model construction.
//!
//! The optimizer keys its maps by user and AP names, so uniqueness is
//! enforced here rather than trusted from the input layer. Missing
//! coordinates are valid input (the entity just has no feasibility
//! edges) and are reported as warnings only.

use std::collections::HashSet;

use crate::diagnostics::Diagnostics;
use crate::error::{WnaError, WnaResult};
use crate::{AccessPoint, User};

/// Collect all input problems into a [`Diagnostics`] without failing.
///
/// Errors: empty or duplicate names, capacity < 1, channel < 1.
/// Warnings: entities without a position (valid but unreachable).
pub fn check_inputs(users: &[User], aps: &[AccessPoint]) -> Diagnostics {
    let mut diag = Diagnostics::new();

    let mut seen_users: HashSet<&str> = HashSet::new();
    for user in users {
        if user.name.trim().is_empty() {
            diag.add_error("validation", "user name must be non-empty");
        } else if !seen_users.insert(user.name.as_str()) {
            diag.add_error_with_entity(
                "validation",
                "duplicate user name",
                &format!("User {}", user.name),
            );
        }
        if user.position.is_none() {
            diag.add_warning_with_entity(
                "geometry",
                "no position; user cannot be served",
                &format!("User {}", user.name),
            );
        }
    }

    let mut seen_aps: HashSet<&str> = HashSet::new();
    for ap in aps {
        let entity = format!("AP {}", ap.name);
        if ap.name.trim().is_empty() {
            diag.add_error("validation", "AP name must be non-empty");
        } else if !seen_aps.insert(ap.name.as_str()) {
            diag.add_error_with_entity("validation", "duplicate AP name", &entity);
        }
        if ap.capacity < 1 {
            diag.add_error_with_entity("validation", "capacity must be >= 1", &entity);
        }
        if ap.channel < 1 {
            diag.add_error_with_entity("validation", "channel must be >= 1", &entity);
        }
        if ap.position.is_none() {
            diag.add_warning_with_entity(
                "geometry",
                "no position; AP cannot serve anyone",
                &entity,
            );
        }
    }

    diag
}

/// Validate inputs, failing on the first collected error.
pub fn validate_inputs(users: &[User], aps: &[AccessPoint]) -> WnaResult<()> {
    let diag = check_inputs(users, aps);
    if diag.has_errors() {
        return Err(WnaError::Validation(diag.error_summary()));
    }
    Ok(())
}
