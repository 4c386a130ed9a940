//! src/client/mod.rs
//!
//! The invite page's form-submission flow, host-side: a controller that
//! wires a submit event to the invite call and mirrors the outcome in the
//! submit control. Page handles are injected, so the flow can be driven
//! against any form and button implementation.

pub mod controller;
pub mod invite;

pub use controller::{
    Appearance, ButtonUiState, FormFields, InviteFormController, SubmitControl, SubmitEvent,
};
pub use invite::{InviteClient, SubmissionFailure};
