use serde::Serialize;

/// The two recognized roles. Anything else coming from the authentication
/// provider is dropped, which fails closed toward restricted visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Employee,
}

impl Role {
    pub fn parse(value: &str) -> Option<Role> {
        if value.eq_ignore_ascii_case("ADMIN") {
            Some(Role::Admin)
        } else if value.eq_ignore_ascii_case("EMPLOYEE") {
            Some(Role::Employee)
        } else {
            None
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Employee => "EMPLOYEE",
        }
    }
}

/// Identity resolved by the authentication provider: a username and the
/// recognized subset of its role strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub username: String,
    pub roles: Vec<Role>,
}

impl Caller {
    pub fn new<I, S>(username: impl Into<String>, raw_roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let roles = raw_roles
            .into_iter()
            .filter_map(|role| Role::parse(role.as_ref()))
            .collect();

        Caller {
            username: username.into(),
            roles,
        }
    }

    /// Endpoint precondition: at least one recognized role.
    pub fn has_role(&self) -> bool {
        !self.roles.is_empty()
    }

    pub fn is_admin(&self) -> bool {
        self.roles.contains(&Role::Admin)
    }

    /// The role echoed back to the view: ADMIN when present, EMPLOYEE
    /// otherwise.
    pub fn effective_role(&self) -> Role {
        if self.is_admin() {
            Role::Admin
        } else {
            Role::Employee
        }
    }
}

/// Which report variant a caller may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Every employee's rows, no implicit filter.
    All,
    /// Only rows for the caller's own username.
    OwnRecords,
}

/// Role-driven selection between the two query variants. Non-admins are
/// always bound to their own username; a client-supplied parameter never
/// widens visibility.
pub fn resolve_visibility(caller: &Caller) -> Visibility {
    if caller.is_admin() {
        Visibility::All
    } else {
        Visibility::OwnRecords
    }
}
