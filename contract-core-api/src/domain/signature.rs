use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::audit::AuditAction;
use crate::error::{CoreError, CoreResult};

/// Signature lifecycle of a contract. `Draft` is the only editable state;
/// `Signed`, `Declined` and `Expired` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignStatus {
    Draft,
    Sent,
    Signed,
    Declined,
    Expired,
}

impl SignStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignStatus::Draft => "draft",
            SignStatus::Sent => "sent",
            SignStatus::Signed => "signed",
            SignStatus::Declined => "declined",
            SignStatus::Expired => "expired",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SignStatus::Signed | SignStatus::Declined | SignStatus::Expired
        )
    }

    pub fn can_transition_to(&self, next: SignStatus) -> bool {
        matches!(
            (self, next),
            (SignStatus::Draft, SignStatus::Sent)
                | (SignStatus::Sent, SignStatus::Signed)
                | (SignStatus::Sent, SignStatus::Declined)
                | (SignStatus::Sent, SignStatus::Expired)
        )
    }

    /// Move to `next`, or fail with the transition spelled out.
    pub fn transition(self, next: SignStatus) -> CoreResult<SignStatus> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(CoreError::InvalidTransition(format!(
                "cannot move from {self} to {next}"
            )))
        }
    }
}

impl fmt::Display for SignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(SignStatus::Draft),
            "sent" => Ok(SignStatus::Sent),
            "signed" => Ok(SignStatus::Signed),
            "declined" => Ok(SignStatus::Declined),
            "expired" => Ok(SignStatus::Expired),
            _ => Err(format!("unknown sign status: {s}")),
        }
    }
}

/// Terminal outcome reported by the signing provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureEvent {
    Signed,
    Declined,
    Expired,
}

impl SignatureEvent {
    pub fn target_status(&self) -> SignStatus {
        match self {
            SignatureEvent::Signed => SignStatus::Signed,
            SignatureEvent::Declined => SignStatus::Declined,
            SignatureEvent::Expired => SignStatus::Expired,
        }
    }

    pub fn audit_action(&self) -> AuditAction {
        match self {
            SignatureEvent::Signed => AuditAction::SignatureSigned,
            SignatureEvent::Declined => AuditAction::SignatureDeclined,
            SignatureEvent::Expired => AuditAction::SignatureExpired,
        }
    }
}

impl fmt::Display for SignatureEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SignatureEvent::Signed => "signed",
            SignatureEvent::Declined => "declined",
            SignatureEvent::Expired => "expired",
        })
    }
}

impl FromStr for SignatureEvent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "signed" => Ok(SignatureEvent::Signed),
            "declined" => Ok(SignatureEvent::Declined),
            "expired" => Ok(SignatureEvent::Expired),
            _ => Err(format!("unknown signature event: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_can_only_be_sent() {
        assert!(SignStatus::Draft.can_transition_to(SignStatus::Sent));
        assert!(!SignStatus::Draft.can_transition_to(SignStatus::Signed));
        assert!(!SignStatus::Draft.can_transition_to(SignStatus::Declined));
        assert!(!SignStatus::Draft.can_transition_to(SignStatus::Expired));
        assert!(!SignStatus::Draft.can_transition_to(SignStatus::Draft));
    }

    #[test]
    fn sent_resolves_to_any_terminal_state() {
        assert!(SignStatus::Sent.can_transition_to(SignStatus::Signed));
        assert!(SignStatus::Sent.can_transition_to(SignStatus::Declined));
        assert!(SignStatus::Sent.can_transition_to(SignStatus::Expired));
        assert!(!SignStatus::Sent.can_transition_to(SignStatus::Draft));
        assert!(!SignStatus::Sent.can_transition_to(SignStatus::Sent));
    }

    #[test]
    fn terminal_states_accept_nothing() {
        for from in [SignStatus::Signed, SignStatus::Declined, SignStatus::Expired] {
            assert!(from.is_terminal());
            for to in [
                SignStatus::Draft,
                SignStatus::Sent,
                SignStatus::Signed,
                SignStatus::Declined,
                SignStatus::Expired,
            ] {
                assert!(!from.can_transition_to(to), "{from} -> {to} should be blocked");
            }
        }
    }

    #[test]
    fn transition_reports_the_blocked_pair() {
        let err = SignStatus::Signed.transition(SignStatus::Sent).unwrap_err();
        assert!(err.to_string().contains("signed"));
        assert!(err.to_string().contains("sent"));
    }

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            SignStatus::Draft,
            SignStatus::Sent,
            SignStatus::Signed,
            SignStatus::Declined,
            SignStatus::Expired,
        ] {
            assert_eq!(status.as_str().parse::<SignStatus>().unwrap(), status);
        }
        assert!("cancelled".parse::<SignStatus>().is_err());
    }

    #[test]
    fn events_map_to_statuses_and_actions() {
        assert_eq!(SignatureEvent::Signed.target_status(), SignStatus::Signed);
        assert_eq!(SignatureEvent::Declined.target_status(), SignStatus::Declined);
        assert_eq!(SignatureEvent::Expired.target_status(), SignStatus::Expired);
        assert_eq!(
            "declined".parse::<SignatureEvent>().unwrap().audit_action(),
            AuditAction::SignatureDeclined
        );
        assert!("viewed".parse::<SignatureEvent>().is_err());
    }
}
