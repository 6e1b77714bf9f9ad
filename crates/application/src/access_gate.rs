//! Reactive access gate mirroring the web client's route guard.
//!
//! The gate turns a resolution snapshot plus a requirement into one of four
//! observable states. Being unauthenticated and being denied are distinct
//! terminal outcomes with different redirect targets.

use atelier_domain::{AccessDecision, AccessRequirement, check};

use crate::session_resolver::Resolution;

/// Route shown when an unauthenticated visitor hits a protected view.
pub const LOGIN_ROUTE: &str = "/auth/login";

/// Route shown when an authenticated user lacks the required access.
pub const UNAUTHORIZED_ROUTE: &str = "/unauthorized";

/// Observable states of the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Identity resolution still in flight; render a loading state and
    /// never redirect.
    Pending,
    /// The resolved identity satisfies the requirement.
    Allowed,
    /// No authenticated identity; send the visitor to the login view.
    RedirectToLogin,
    /// Authenticated but denied; send the user to the unauthorized view.
    RedirectToUnauthorized,
}

impl GateState {
    /// Returns the redirect target for denial states.
    #[must_use]
    pub fn redirect_target(&self) -> Option<&'static str> {
        match self {
            Self::RedirectToLogin => Some(LOGIN_ROUTE),
            Self::RedirectToUnauthorized => Some(UNAUTHORIZED_ROUTE),
            Self::Pending | Self::Allowed => None,
        }
    }
}

/// Evaluates the gate for a resolution snapshot.
///
/// `None` means resolution has not completed yet.
#[must_use]
pub fn evaluate(resolution: Option<&Resolution>, requirement: &AccessRequirement) -> GateState {
    match resolution {
        None => GateState::Pending,
        Some(Resolution::Unauthenticated) => GateState::RedirectToLogin,
        Some(Resolution::Authenticated(identity)) => {
            match check(Some(identity), requirement) {
                AccessDecision::Allow => GateState::Allowed,
                AccessDecision::Deny => GateState::RedirectToUnauthorized,
            }
        }
    }
}

/// Memoizing gate: recomputes only when the resolution snapshot or the
/// requirement changes, not on every observation.
#[derive(Debug, Clone)]
pub struct AccessGate {
    requirement: AccessRequirement,
    last_input: Option<Option<Resolution>>,
    state: GateState,
    evaluations: u64,
}

impl AccessGate {
    /// Creates a pending gate for a requirement.
    #[must_use]
    pub fn new(requirement: AccessRequirement) -> Self {
        Self {
            requirement,
            last_input: None,
            state: GateState::Pending,
            evaluations: 0,
        }
    }

    /// Observes a resolution snapshot and returns the gate state.
    pub fn observe(&mut self, resolution: Option<&Resolution>) -> GateState {
        let input = resolution.cloned();
        if self.last_input.as_ref() != Some(&input) {
            self.state = evaluate(input.as_ref(), &self.requirement);
            self.evaluations = self.evaluations.saturating_add(1);
            self.last_input = Some(input);
        }

        self.state
    }

    /// Replaces the requirement, re-evaluating against the last snapshot.
    pub fn set_requirement(&mut self, requirement: AccessRequirement) {
        if self.requirement == requirement {
            return;
        }

        self.requirement = requirement;
        if let Some(input) = self.last_input.as_ref() {
            self.state = evaluate(input.as_ref(), &self.requirement);
            self.evaluations = self.evaluations.saturating_add(1);
        }
    }

    /// Number of evaluations performed so far (observability for tests and
    /// diagnostics).
    #[must_use]
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }
}

#[cfg(test)]
mod tests {
    use atelier_domain::{AccessRequirement, Identity, Permission, Role};

    use super::{AccessGate, GateState, LOGIN_ROUTE, UNAUTHORIZED_ROUTE, evaluate};
    use crate::session_resolver::Resolution;

    fn manage_users() -> AccessRequirement {
        AccessRequirement::Permission(Permission::ManageUsers)
    }

    #[test]
    fn pending_while_resolution_is_in_flight() {
        let state = evaluate(None, &manage_users());
        assert_eq!(state, GateState::Pending);
        assert_eq!(state.redirect_target(), None);
    }

    #[test]
    fn unauthenticated_redirects_to_login_for_any_requirement() {
        let state = evaluate(Some(&Resolution::Unauthenticated), &manage_users());
        assert_eq!(state, GateState::RedirectToLogin);
        assert_eq!(state.redirect_target(), Some(LOGIN_ROUTE));
    }

    #[test]
    fn denied_client_redirects_to_unauthorized() {
        let resolution = Resolution::Authenticated(Identity::new("client-1", Role::Client));
        let state = evaluate(Some(&resolution), &manage_users());
        assert_eq!(state, GateState::RedirectToUnauthorized);
        assert_eq!(state.redirect_target(), Some(UNAUTHORIZED_ROUTE));
    }

    #[test]
    fn allowed_admin_renders_protected_content() {
        let resolution = Resolution::Authenticated(Identity::new("admin-1", Role::Admin));
        let state = evaluate(Some(&resolution), &manage_users());
        assert_eq!(state, GateState::Allowed);
    }

    #[test]
    fn gate_does_not_reevaluate_for_an_unchanged_snapshot() {
        let mut gate = AccessGate::new(manage_users());
        let resolution = Resolution::Authenticated(Identity::new("admin-1", Role::Admin));

        assert_eq!(gate.observe(Some(&resolution)), GateState::Allowed);
        assert_eq!(gate.observe(Some(&resolution)), GateState::Allowed);
        assert_eq!(gate.observe(Some(&resolution)), GateState::Allowed);
        assert_eq!(gate.evaluations(), 1);
    }

    #[test]
    fn gate_reevaluates_when_the_resolution_changes() {
        let mut gate = AccessGate::new(manage_users());

        assert_eq!(gate.observe(None), GateState::Pending);
        assert_eq!(
            gate.observe(Some(&Resolution::Unauthenticated)),
            GateState::RedirectToLogin
        );

        let resolution = Resolution::Authenticated(Identity::new("admin-1", Role::Admin));
        assert_eq!(gate.observe(Some(&resolution)), GateState::Allowed);
        assert_eq!(gate.evaluations(), 3);
    }

    #[test]
    fn gate_reevaluates_when_the_requirement_changes() {
        let mut gate = AccessGate::new(manage_users());
        let resolution = Resolution::Authenticated(Identity::new("client-1", Role::Client));

        assert_eq!(
            gate.observe(Some(&resolution)),
            GateState::RedirectToUnauthorized
        );

        gate.set_requirement(AccessRequirement::Permission(Permission::ViewOrders));
        assert_eq!(gate.observe(Some(&resolution)), GateState::Allowed);
    }
}
