use crate::core::error::{DirectoryError, Result};
use crate::features::pois::models::ValidationStatus;

/// A requested lifecycle event for a POI record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionEvent {
    /// Moderator accepts a pending record into the public directory
    Approve,
    /// Moderator turns a pending record down, with a reason
    Reject { motivo: String },
    /// Owner sends a rejected record back to the moderation queue
    Resubmit,
    /// Owner or moderator edits descriptive fields without a state change
    Edit,
}

impl TransitionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            TransitionEvent::Approve => "approve",
            TransitionEvent::Reject { .. } => "reject",
            TransitionEvent::Resubmit => "resubmit",
            TransitionEvent::Edit => "edit",
        }
    }
}

/// The validated outcome of a lifecycle event: the state the record moves to
/// and the rejection reason it carries afterwards (`None` clears it).
///
/// A plan is computed without touching the record and committed through the
/// store in one step, so a failing precondition can never leave a
/// half-applied transition behind.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionPlan {
    pub estado: ValidationStatus,
    pub motivo_rechazo: Option<String>,
}

/// Guards the moderation workflow: pendiente → aprobado/rechazado,
/// rechazado → pendiente on resubmission, state-preserving edits.
///
/// The planner is authorization-agnostic; whether the actor may moderate is
/// checked by the caller before planning (see `PoiService`).
pub struct LifecycleService;

impl LifecycleService {
    /// Validate `event` against the record's current state and produce the
    /// plan to commit. No mutation happens here.
    pub fn plan(current: ValidationStatus, event: &TransitionEvent) -> Result<TransitionPlan> {
        match (current, event) {
            (ValidationStatus::Pendiente, TransitionEvent::Approve) => Ok(TransitionPlan {
                estado: ValidationStatus::Aprobado,
                motivo_rechazo: None,
            }),
            (ValidationStatus::Pendiente, TransitionEvent::Reject { motivo }) => {
                let motivo = motivo.trim();
                if motivo.is_empty() {
                    return Err(DirectoryError::MissingRejectionReason);
                }
                Ok(TransitionPlan {
                    estado: ValidationStatus::Rechazado,
                    motivo_rechazo: Some(motivo.to_string()),
                })
            }
            // Editing a rejected record implies resubmission
            (ValidationStatus::Rechazado, TransitionEvent::Resubmit)
            | (ValidationStatus::Rechazado, TransitionEvent::Edit) => Ok(TransitionPlan {
                estado: ValidationStatus::Pendiente,
                motivo_rechazo: None,
            }),
            (ValidationStatus::Pendiente, TransitionEvent::Edit)
            | (ValidationStatus::Aprobado, TransitionEvent::Edit) => Ok(TransitionPlan {
                estado: current,
                motivo_rechazo: None,
            }),
            (from, event) => Err(DirectoryError::InvalidTransition {
                from: from.to_string(),
                event: event.name().to_string(),
            }),
        }
    }
}
