mod controller;
mod events;
mod guard;

pub use controller::{
    INVALID_SUBJECT, InteractionController, Rejection, ToggleOutcome, confirm_request,
    success_message,
};
pub use events::{EventBus, Observer, Subscription};
pub use guard::{BusyRegistry, BusyToken};
