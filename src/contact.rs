//! Contact form submission.
//!
//! Submitting is split around its one suspension point:
//!
//! 1. [`ContactState::begin`] suppresses duplicate submissions, remembers the
//!    submit control's label, switches it to the busy label, disables it and
//!    hands back a [`Submission`] holding the serialized fields.
//! 2. The caller awaits a [`Transport`] with that submission. Other handlers
//!    keep running meanwhile; none of them touch the form.
//! 3. [`ContactState::finish`] shows the success or error message, clears
//!    the fields on success, restores and re-enables the control, and
//!    schedules the status message to be cleared.
//!
//! [`submit`] strings the three steps together for callers that have nothing
//! else to do while waiting.

use tracing::{debug, info, warn};

use crate::config::ContactConfig;
use crate::page::ContactForm;
use crate::scheduler::Scheduler;
use crate::transport::{SubmitResponse, Transport, TransportError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

/// Text currently shown in the status region.
#[derive(Debug, Clone, PartialEq)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

/// Delayed contact-form step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearStatus;

/// A request captured at submit time and not yet answered.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub endpoint: String,
    pub fields: Vec<(String, String)>,
    /// Label to put back on the submit control afterwards.
    pub original_label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactState {
    pub endpoint: String,
    pub fields: Vec<(String, String)>,
    pub submit_label: String,
    pub submit_disabled: bool,
    pub status: Option<Status>,
    pub submissions: u32,
}

impl ContactState {
    pub fn setup(form: &ContactForm) -> Self {
        Self {
            endpoint: form.endpoint.clone(),
            fields: form
                .fields
                .iter()
                .map(|f| (f.name.clone(), f.value.clone()))
                .collect(),
            submit_label: form.submit_label.clone(),
            submit_disabled: false,
            status: None,
            submissions: 0,
        }
    }

    /// Set a field's value as if the visitor typed it. Unknown names are ignored.
    pub fn fill(&mut self, name: &str, value: &str) {
        if let Some(field) = self.fields.iter_mut().find(|(n, _)| n == name) {
            field.1 = value.to_string();
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.submit_disabled
    }

    /// Start a submission. `None` while another one is in flight.
    pub fn begin(&mut self, config: &ContactConfig) -> Option<Submission> {
        if self.submit_disabled {
            debug!("Submission ignored, one already in flight");
            return None;
        }
        let original_label =
            std::mem::replace(&mut self.submit_label, config.busy_label.clone());
        self.submit_disabled = true;
        self.submissions += 1;
        debug!(fields = ?self.fields, endpoint = %self.endpoint, "Submitting contact form");
        Some(Submission {
            endpoint: self.endpoint.clone(),
            fields: self.fields.clone(),
            original_label,
        })
    }

    /// Reflect the outcome of a submission.
    pub fn finish<T: From<ClearStatus>>(
        &mut self,
        submission: Submission,
        outcome: &Result<SubmitResponse, TransportError>,
        config: &ContactConfig,
        scheduler: &mut Scheduler<T>,
    ) {
        match outcome {
            Ok(response) if response.ok() => {
                info!(status = response.status, "Contact form sent");
                self.status = Some(Status {
                    kind: StatusKind::Success,
                    message: config.success_message.clone(),
                });
                for field in &mut self.fields {
                    field.1.clear();
                }
            }
            Ok(response) => {
                warn!(status = response.status, "Contact form rejected");
                self.status = Some(Status {
                    kind: StatusKind::Error,
                    message: config.error_message.clone(),
                });
            }
            Err(e) => {
                warn!(error = %e, "Contact form submission failed");
                self.status = Some(Status {
                    kind: StatusKind::Error,
                    message: config.error_message.clone(),
                });
            }
        }
        self.submit_label = submission.original_label;
        self.submit_disabled = false;
        scheduler.schedule(config.status_clear_ms, ClearStatus.into());
    }

    /// Apply a due [`ClearStatus`].
    pub fn clear_status(&mut self, _task: ClearStatus) {
        self.status = None;
    }
}

/// Begin, await the transport, finish. Returns `false` if a submission was
/// already in flight.
pub async fn submit<T: From<ClearStatus>>(
    state: &mut ContactState,
    transport: &dyn Transport,
    config: &ContactConfig,
    scheduler: &mut Scheduler<T>,
) -> bool {
    let Some(submission) = state.begin(config) else {
        return false;
    };
    let outcome = transport
        .post_form(&submission.endpoint, &submission.fields)
        .await;
    state.finish(submission, &outcome, config, scheduler);
    true
}
