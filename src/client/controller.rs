//! src/client/controller.rs

use crate::client::invite::InviteClient;

const WAITING_LABEL: &str = "Please Wait";
const SUCCESS_LABEL: &str = "WOOT. Check your email!";

/// A form submission event. The controller always suppresses the default
/// action so the page never navigates.
#[derive(Debug, Default)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn was_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Read access to the page's form fields. Values are read at submit time,
/// never cached, so the captcha token is whatever the widget holds at the
/// moment of submission.
pub trait FormFields {
    fn email(&self) -> String;
    fn first_name(&self) -> String;
    fn last_name(&self) -> String;
    /// `false` when the checkbox is absent from the page.
    fn code_of_conduct_accepted(&self) -> bool;
    fn captcha_token(&self) -> String;
}

/// Write access to the submit button.
pub trait SubmitControl {
    fn set_enabled(&mut self, enabled: bool);
    fn set_label(&mut self, label: &str);
    fn set_appearance(&mut self, appearance: Appearance);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appearance {
    Plain,
    Error,
    Success,
}

impl Appearance {
    pub fn as_class(&self) -> &'static str {
        match self {
            Appearance::Plain => "",
            Appearance::Error => "error",
            Appearance::Success => "success",
        }
    }
}

/// Where the submit button stands in the submission cycle. `Success` is
/// terminal; `Error` leaves the button interactive for another attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonUiState {
    Idle,
    Submitting,
    Success,
    Error(String),
}

/// Wires a page's submit event to the invite call and reflects the
/// outcome in the submit control.
pub struct InviteFormController<F, C> {
    fields: F,
    control: C,
    client: InviteClient,
    state: ButtonUiState,
}

impl<F, C> InviteFormController<F, C>
where
    F: FormFields,
    C: SubmitControl,
{
    /// Takes ownership of the page handles and clears any loading state
    /// the button was delivered with.
    pub fn new(fields: F, control: C, client: InviteClient) -> Self {
        let mut controller = Self {
            fields,
            control,
            client,
            state: ButtonUiState::Idle,
        };
        controller.control.set_appearance(Appearance::Plain);
        controller
    }

    /// One full submission cycle: suppress the default action, park the
    /// button in its waiting state, issue the invite call and render the
    /// outcome. On failure the button is handed back to the visitor; on
    /// success it stays disabled.
    pub async fn on_submit(&mut self, event: &mut SubmitEvent) {
        event.prevent_default();
        self.control.set_enabled(false);
        self.control.set_appearance(Appearance::Plain);
        self.control.set_label(WAITING_LABEL);
        self.state = ButtonUiState::Submitting;

        let code_of_conduct = u8::from(self.fields.code_of_conduct_accepted());
        let outcome = self
            .client
            .invite(
                code_of_conduct,
                &self.fields.email(),
                &self.fields.first_name(),
                &self.fields.last_name(),
                &self.fields.captcha_token(),
            )
            .await;

        match outcome {
            Ok(()) => {
                self.control.set_appearance(Appearance::Success);
                self.control.set_label(SUCCESS_LABEL);
                self.state = ButtonUiState::Success;
            }
            Err(failure) => {
                self.control.set_enabled(true);
                self.control.set_appearance(Appearance::Error);
                self.control.set_label(&failure.message);
                self.state = ButtonUiState::Error(failure.message);
            }
        }
    }

    pub fn state(&self) -> &ButtonUiState {
        &self.state
    }

    pub fn control(&self) -> &C {
        &self.control
    }
}
