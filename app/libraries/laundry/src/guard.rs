use app_schema::profile::Role;

pub const LOGIN_ROUTE: &str = "/login";
pub const CUSTOMER_DASHBOARD_ROUTE: &str = "/customer-dashboard";
pub const ADMIN_DASHBOARD_ROUTE: &str = "/admin-dashboard";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteScope {
    /// Any signed-in user.
    Authenticated,
    /// Signed-in users whose profile role is `admin`.
    AdminOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Redirect(&'static str),
}

/// `role` is `None` when there is no valid session.
pub fn authorize(scope: RouteScope, role: Option<Role>) -> Access {
    match (scope, role) {
        (_, None) => Access::Redirect(LOGIN_ROUTE),
        (RouteScope::AdminOnly, Some(role)) if !role.is_admin() => {
            Access::Redirect(CUSTOMER_DASHBOARD_ROUTE)
        }
        _ => Access::Allow,
    }
}

/// Where a user lands after signing in.
pub fn landing_for(role: Role) -> &'static str {
    match role {
        Role::Admin => ADMIN_DASHBOARD_ROUTE,
        Role::Customer => CUSTOMER_DASHBOARD_ROUTE,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn anonymous_visitors_go_to_login() {
        assert_eq!(
            authorize(RouteScope::Authenticated, None),
            Access::Redirect(LOGIN_ROUTE)
        );
        assert_eq!(
            authorize(RouteScope::AdminOnly, None),
            Access::Redirect(LOGIN_ROUTE)
        );
    }

    #[test]
    fn customers_are_kept_out_of_admin_routes() {
        assert_eq!(
            authorize(RouteScope::AdminOnly, Some(Role::Customer)),
            Access::Redirect(CUSTOMER_DASHBOARD_ROUTE)
        );
        assert_eq!(
            authorize(RouteScope::Authenticated, Some(Role::Customer)),
            Access::Allow
        );
    }

    #[test]
    fn admins_go_everywhere() {
        assert_eq!(authorize(RouteScope::AdminOnly, Some(Role::Admin)), Access::Allow);
        assert_eq!(
            authorize(RouteScope::Authenticated, Some(Role::Admin)),
            Access::Allow
        );
    }

    #[test]
    fn landing_depends_on_role() {
        assert_eq!(landing_for(Role::Admin), "/admin-dashboard");
        assert_eq!(landing_for(Role::Customer), "/customer-dashboard");
    }
}
