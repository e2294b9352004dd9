//! Testing infrastructure for notekit integration tests.
//!
//! - `TestWorld`: wires the runtime to scripted collaborators
//! - `transport`: `ScriptedTransport` with per-endpoint replies and a gate
//! - `recorders`: notifier and navigator that record what they were told
//! - `fixtures`: sample view state and payloads
//! - `assertions`: readable checks over the recordings

pub mod assertions;
pub mod fixtures;
pub mod recorders;
pub mod transport;
pub mod world;

pub use recorders::{RecordingNavigator, RecordingNotifier};
pub use transport::{RecordedCall, ScriptedTransport};
pub use world::{TestWorld, drain};
