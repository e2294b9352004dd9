//! Assertions over what the recording collaborators saw.

use crate::recorders::RecordingNotifier;
use crate::transport::ScriptedTransport;
use anyhow::Result;
use notekit_types::{InteractionEvent, InteractionState};

/// Assert the notifier showed exactly `expected`, in order.
pub fn assert_notices(notifier: &RecordingNotifier, expected: &[&str]) -> Result<()> {
    let messages = notifier.messages();
    if messages != expected {
        anyhow::bail!("Expected notices {:?}, got {:?}", expected, messages);
    }
    Ok(())
}

pub fn assert_call_count(transport: &ScriptedTransport, expected: usize) -> Result<()> {
    let calls = transport.calls();
    if calls.len() != expected {
        anyhow::bail!(
            "Expected {} transport calls, got {}: {:?}",
            expected,
            calls.len(),
            calls
        );
    }
    Ok(())
}

/// Assert an event sequence as (is_revert, current state) pairs.
pub fn assert_events(
    events: &[InteractionEvent],
    expected: &[(bool, InteractionState)],
) -> Result<()> {
    let actual: Vec<(bool, InteractionState)> = events
        .iter()
        .map(|event| (event.is_revert(), event.current().state))
        .collect();
    if actual != expected {
        anyhow::bail!("Expected events {:?}, got {:?}", expected, actual);
    }
    Ok(())
}
