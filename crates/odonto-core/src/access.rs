//! Role-based access policy.
//!
//! Every gated view and action asks `can` instead of comparing roles
//! inline; `gate` turns the session state into a navigation decision.

use serde::{Deserialize, Serialize};

use crate::session::SessionState;
use crate::user::Role;

/// An action or view that is restricted by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    ViewDashboard,
    ViewStatistics,
    ViewClients,
    ManageClients,
    ViewTreatments,
    ManageTreatments,
    ViewAppointments,
    ManageAppointments,
    ViewProfessionals,
    ManageProfessionals,
    ManageUsers,
    SummarizeHistory,
}

/// Whether `role` holds `capability`.
pub fn can(role: Role, capability: Capability) -> bool {
    use Capability::*;

    match role {
        Role::Admin => true,
        Role::Professional => matches!(
            capability,
            ViewDashboard
                | ViewStatistics
                | ViewClients
                | ManageClients
                | ViewTreatments
                | ViewAppointments
                | ManageAppointments
                | ViewProfessionals
                | SummarizeHistory
        ),
        Role::Client => matches!(
            capability,
            ViewDashboard | ViewTreatments | ViewAppointments | ViewProfessionals
        ),
    }
}

/// What a gated view should do for the current session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Startup revalidation still running; render nothing yet
    Wait,
    /// No session; go to the login view
    RedirectToLogin,
    /// Signed in without the capability; go back to the dashboard
    RedirectToDashboard,
    Render,
}

/// Decides whether a view requiring `required` may render.
///
/// `None` means the view only requires a signed-in user.
pub fn gate(state: &SessionState, required: Option<Capability>) -> GateDecision {
    match state {
        SessionState::Loading => GateDecision::Wait,
        SessionState::Anonymous => GateDecision::RedirectToLogin,
        SessionState::Authenticated(session) => match required {
            Some(capability) if !can(session.role, capability) => GateDecision::RedirectToDashboard,
            _ => GateDecision::Render,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use crate::user::UserProfile;

    fn signed_in(role: Role) -> SessionState {
        SessionState::Authenticated(Session::new(
            UserProfile {
                id: "u-1".to_string(),
                name: "Ana".to_string(),
                email: "ana@clinic.test".to_string(),
                role,
            },
            "tok",
        ))
    }

    #[test]
    fn test_admin_can_everything() {
        for capability in [
            Capability::ManageUsers,
            Capability::ManageTreatments,
            Capability::SummarizeHistory,
        ] {
            assert!(can(Role::Admin, capability));
        }
    }

    #[test]
    fn test_professional_cannot_manage_users_or_treatments() {
        assert!(!can(Role::Professional, Capability::ManageUsers));
        assert!(!can(Role::Professional, Capability::ManageTreatments));
        assert!(can(Role::Professional, Capability::ManageClients));
    }

    #[test]
    fn test_client_is_read_only() {
        assert!(can(Role::Client, Capability::ViewTreatments));
        assert!(!can(Role::Client, Capability::ManageAppointments));
        assert!(!can(Role::Client, Capability::ViewClients));
    }

    #[test]
    fn test_gate_waits_while_loading() {
        assert_eq!(
            gate(&SessionState::Loading, Some(Capability::ManageUsers)),
            GateDecision::Wait
        );
    }

    #[test]
    fn test_gate_redirects() {
        assert_eq!(gate(&SessionState::Anonymous, None), GateDecision::RedirectToLogin);
        assert_eq!(
            gate(&signed_in(Role::Professional), Some(Capability::ManageUsers)),
            GateDecision::RedirectToDashboard
        );
        assert_eq!(
            gate(&signed_in(Role::Admin), Some(Capability::ManageUsers)),
            GateDecision::Render
        );
        assert_eq!(gate(&signed_in(Role::Client), None), GateDecision::Render);
    }
}
