//! Role based page access.
//!
//! Which roles may open which section of the app is plain data: a table from
//! the first path segment to a [`Rule`]. It is consulted once per navigation.

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::Choice;

/// Where a denied navigation is sent.
pub const FORBIDDEN_ROUTE: &str = "/403";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display,
)]
pub enum Role {
    Admin,
    Employee,
    Manager,
    Client,
}

impl Role {
    /// Roles that can be assigned to staff accounts.
    pub const STAFF: &'static [Role] =
        &[Role::Admin, Role::Employee, Role::Manager];

    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl Choice for Role {
    const ALL: &'static [Self] = Role::STAFF;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    AdminOnly,
    NotClient,
    ClientOnly,
    NotEmployee,
}

impl Rule {
    pub fn permits(self, role: Role) -> bool {
        match self {
            Rule::AdminOnly => role == Role::Admin,
            Rule::NotClient => role != Role::Client,
            Rule::ClientOnly => role == Role::Client,
            Rule::NotEmployee => role != Role::Employee,
        }
    }
}

/// First path segment to the rule guarding it. Segments not listed are open
/// to every logged in role.
pub const ACCESS_TABLE: &[(&str, Rule)] = &[
    ("dashboard", Rule::AdminOnly),
    ("clients", Rule::AdminOnly),
    ("employees", Rule::AdminOnly),
    ("config-company-info", Rule::AdminOnly),
    ("dashboard-jobs", Rule::AdminOnly),
    ("skills", Rule::AdminOnly),
    ("jobs", Rule::AdminOnly),
    ("job-applications", Rule::AdminOnly),
    ("job-offer-letters", Rule::AdminOnly),
    ("leaves", Rule::NotClient),
    ("attendance", Rule::NotClient),
    ("holidays", Rule::NotClient),
    ("messages", Rule::NotClient),
    ("sticky-notes", Rule::NotClient),
    ("private-dashboard", Rule::NotClient),
    ("private-dashboard-client", Rule::ClientOnly),
    ("contracts", Rule::NotEmployee),
    ("salaries", Rule::NotEmployee),
];

/// Project sub-pages clients may never open, wherever they appear under
/// `projects`.
const PROJECT_STAFF_ONLY: &[&str] = &["discussions", "files", "notes"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Redirect(&'static str),
}

impl Access {
    pub fn is_allowed(self) -> bool {
        matches!(self, Access::Allow)
    }
}

/// Decide whether `role` may open `path`.
///
/// Without a role (not logged in, or the token could not be read) every path
/// is allowed here: sending anonymous users to the login page is the auth
/// guard's job, not this table's.
pub fn check(role: Option<Role>, path: &str) -> Access {
    let Some(role) = role else {
        return Access::Allow;
    };

    let segments: Vec<&str> = path
        .split(['?', '#'])
        .next()
        .unwrap_or("")
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();

    if let Some(first) = segments.first()
        && let Some((_, rule)) =
            ACCESS_TABLE.iter().find(|(segment, _)| segment == first)
        && !rule.permits(role)
    {
        return Access::Redirect(FORBIDDEN_ROUTE);
    }

    if role == Role::Client
        && segments.contains(&"projects")
        && segments.iter().any(|s| PROJECT_STAFF_ONLY.contains(s))
    {
        return Access::Redirect(FORBIDDEN_ROUTE);
    }

    Access::Allow
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_is_kept_out_of_staff_sections() {
        assert_eq!(
            check(Some(Role::Client), "/attendance"),
            Access::Redirect(FORBIDDEN_ROUTE)
        );
        assert_eq!(check(Some(Role::Admin), "/attendance"), Access::Allow);
        assert!(!check(Some(Role::Client), "/sticky-notes").is_allowed());
        assert!(check(Some(Role::Employee), "/sticky-notes").is_allowed());
    }

    #[test]
    fn employee_salaries_denied_attendance_allowed() {
        assert_eq!(
            check(Some(Role::Employee), "/salaries"),
            Access::Redirect(FORBIDDEN_ROUTE)
        );
        assert_eq!(check(Some(Role::Employee), "/attendance"), Access::Allow);
    }

    #[test]
    fn admin_only_sections() {
        for role in [Role::Employee, Role::Manager, Role::Client] {
            assert!(!check(Some(role), "/employees").is_allowed());
            assert!(!check(Some(role), "/job-applications/3/update").is_allowed());
        }
        assert!(check(Some(Role::Admin), "/employees/12/detail").is_allowed());
    }

    #[test]
    fn client_only_dashboard() {
        assert!(check(Some(Role::Client), "/private-dashboard-client").is_allowed());
        assert!(!check(Some(Role::Manager), "/private-dashboard-client").is_allowed());
        // the longer segment must not be confused with its prefix
        assert!(!check(Some(Role::Client), "/private-dashboard").is_allowed());
    }

    #[test]
    fn project_sub_pages() {
        assert!(!check(Some(Role::Client), "/projects/4/discussions").is_allowed());
        assert!(!check(Some(Role::Client), "/projects/4/notes/1").is_allowed());
        assert!(check(Some(Role::Client), "/projects/4/tasks-table").is_allowed());
        assert!(check(Some(Role::Employee), "/projects/4/files").is_allowed());
    }

    #[test]
    fn unknown_role_and_open_sections() {
        assert!(check(None, "/salaries").is_allowed());
        assert!(check(Some(Role::Client), "/").is_allowed());
        assert!(check(Some(Role::Employee), "/tasks?status=2").is_allowed());
        assert!(!check(Some(Role::Employee), "/contracts?client=2").is_allowed());
    }
}
