//! Approval routing: process lookup and first-step approver
//! resolution.

use crate::error::FinalizeError;
use crate::store::ApprovalStore;
use uuid::Uuid;

/// The resolved entry point of an approval process for one
/// requester. Step order and description are carried verbatim into
/// the approval transaction and task records.
#[derive(Debug, Clone)]
pub struct RoutedStep {
    pub process_id: Uuid,
    pub step_id: Uuid,
    pub step_order: i32,
    pub step_description: String,
    pub approver_id: Uuid,
}

/// Resolve the approver for the first step of the named process.
///
/// Routing always begins at the step with the lowest `order_index`;
/// later steps are advanced by the approval-decision flow, never
/// here. A missing process, a process with zero steps, or a missing
/// step assignment blocks finalization outright — there is no
/// fallback approver.
pub async fn resolve_approver(
    store: &dyn ApprovalStore,
    process_title: &str,
    requester_id: Uuid,
) -> Result<RoutedStep, FinalizeError> {
    let process = store
        .find_process_by_title(process_title)
        .await?
        .ok_or_else(|| FinalizeError::ProcessNotConfigured {
            title: process_title.to_string(),
        })?;

    let first_step = process
        .steps
        .iter()
        .min_by_key(|s| s.order_index)
        .ok_or_else(|| FinalizeError::ProcessNotConfigured {
            title: process_title.to_string(),
        })?;

    let approver_id = store
        .find_approver(first_step.step_id, requester_id)
        .await?
        .ok_or(FinalizeError::ApproverNotAssigned {
            requester_id,
            step_order: first_step.order_index,
        })?;

    Ok(RoutedStep {
        process_id: process.process_id,
        step_id: first_step.step_id,
        step_order: first_step.order_index,
        step_description: first_step.description.clone(),
        approver_id,
    })
}
