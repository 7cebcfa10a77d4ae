use std::future::Future;

use serde::Serialize;
use thiserror::Error;
use url::Url;

pub const SUCCESS_MESSAGE: &str = "Message sent successfully! I'll get back to you soon.";
pub const NOT_CONFIGURED_MESSAGE: &str =
    "Email service is not configured. Please contact me directly via email.";
pub const FAILURE_MESSAGE: &str =
    "Failed to send message. Please try again or contact me directly via email.";

/// Milliseconds a notice stays up before dismissing itself.
pub const NOTICE_TIMEOUT_MS: u32 = 5_000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelaySettings {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub endpoint: Url,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: &'static str,
}

impl Notice {
    pub fn sent() -> Self {
        Self {
            kind: NoticeKind::Success,
            message: SUCCESS_MESSAGE,
        }
    }

    pub fn not_configured() -> Self {
        Self {
            kind: NoticeKind::Error,
            message: NOT_CONFIGURED_MESSAGE,
        }
    }

    pub fn failed() -> Self {
        Self {
            kind: NoticeKind::Error,
            message: FAILURE_MESSAGE,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TemplateParams {
    pub from_name: String,
    pub from_email: String,
    pub message: String,
}

/// Body POSTed to the mail relay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RelayRequest {
    pub service_id: String,
    pub template_id: String,
    pub user_id: String,
    pub template_params: TemplateParams,
}

impl RelayRequest {
    pub fn new(settings: &RelaySettings, fields: &ContactFields) -> Self {
        Self {
            service_id: settings.service_id.clone(),
            template_id: settings.template_id.clone(),
            user_id: settings.public_key.clone(),
            template_params: TemplateParams {
                from_name: fields.name.clone(),
                from_email: fields.email.clone(),
                message: fields.message.clone(),
            },
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RelayError {
    #[error("request could not be encoded: {0}")]
    Encode(String),
    #[error("relay unreachable: {0}")]
    Transport(String),
    #[error("relay answered with status {0}")]
    Status(u16),
}

/// Delivers a contact request to the external mail service.
pub trait MailRelay {
    fn deliver(&self, request: &RelayRequest) -> impl Future<Output = Result<(), RelayError>>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    Dispatch(RelayRequest),
    NotConfigured(Notice),
    AlreadySubmitting,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub fields: ContactFields,
    submitting: bool,
    notice: Option<Notice>,
    notice_serial: u64,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submitting(&self) -> bool {
        self.submitting
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Bumped every time a notice is shown, even one equal to the last.
    pub fn notice_serial(&self) -> u64 {
        self.notice_serial
    }

    fn show_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.notice_serial += 1;
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn submit_label(&self) -> &'static str {
        if self.submitting {
            "Sending..."
        } else {
            "Send Message"
        }
    }

    /// First half of a submit. Only `Dispatch` leaves the form submitting;
    /// the caller must then hand the relay outcome to [`Self::finish_submission`].
    pub fn begin_submission(&mut self, settings: Option<&RelaySettings>) -> Submission {
        if self.submitting {
            return Submission::AlreadySubmitting;
        }
        let Some(settings) = settings else {
            let notice = Notice::not_configured();
            self.show_notice(notice.clone());
            return Submission::NotConfigured(notice);
        };

        self.submitting = true;
        self.notice = None;
        Submission::Dispatch(RelayRequest::new(settings, &self.fields))
    }

    /// Always releases the submitting flag. Fields are cleared only on success.
    pub fn finish_submission(&mut self, outcome: Result<(), RelayError>) -> Notice {
        self.submitting = false;

        let notice = match outcome {
            Ok(()) => {
                self.fields = ContactFields::default();
                Notice::sent()
            }
            Err(_) => Notice::failed(),
        };
        self.show_notice(notice.clone());
        notice
    }
}

/// Runs a whole submission against `relay`. Returns the notice shown, if any.
pub async fn submit<R: MailRelay>(
    form: &mut ContactForm,
    settings: Option<&RelaySettings>,
    relay: &R,
) -> Option<Notice> {
    match form.begin_submission(settings) {
        Submission::Dispatch(request) => {
            let outcome = relay.deliver(&request).await;
            Some(form.finish_submission(outcome))
        }
        Submission::NotConfigured(notice) => Some(notice),
        Submission::AlreadySubmitting => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct RecordingRelay {
        outcome: Result<(), RelayError>,
        requests: RefCell<Vec<RelayRequest>>,
    }

    impl RecordingRelay {
        fn answering(outcome: Result<(), RelayError>) -> Self {
            Self {
                outcome,
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl MailRelay for RecordingRelay {
        async fn deliver(&self, request: &RelayRequest) -> Result<(), RelayError> {
            self.requests.borrow_mut().push(request.clone());
            self.outcome.clone()
        }
    }

    fn settings() -> RelaySettings {
        RelaySettings {
            service_id: "service_folio".to_string(),
            template_id: "template_contact".to_string(),
            public_key: "pk_live".to_string(),
            endpoint: Url::parse("https://api.emailjs.com/api/v1.0/email/send").expect("valid url"),
        }
    }

    fn filled_form() -> ContactForm {
        ContactForm {
            fields: ContactFields {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                message: "Hello there".to_string(),
            },
            ..ContactForm::default()
        }
    }

    #[tokio::test]
    async fn successful_delivery_confirms_and_clears_fields() {
        let relay = RecordingRelay::answering(Ok(()));
        let mut form = filled_form();

        let notice = submit(&mut form, Some(&settings()), &relay).await;

        assert_eq!(notice, Some(Notice::sent()));
        assert_eq!(form.fields, ContactFields::default());
        assert!(!form.submitting());
        assert_eq!(relay.requests.borrow().len(), 1);
    }

    #[tokio::test]
    async fn missing_configuration_short_circuits_and_leaves_button_enabled() {
        let relay = RecordingRelay::answering(Ok(()));
        let mut form = filled_form();

        let notice = submit(&mut form, None, &relay).await;

        assert_eq!(notice, Some(Notice::not_configured()));
        assert_eq!(form.notice(), Some(&Notice::not_configured()));
        assert!(!form.submitting());
        assert_eq!(form.submit_label(), "Send Message");
        assert!(relay.requests.borrow().is_empty());
        assert_eq!(form.fields, filled_form().fields);
    }

    #[tokio::test]
    async fn delivery_failure_keeps_fields_for_retry() {
        let relay = RecordingRelay::answering(Err(RelayError::Status(500)));
        let mut form = filled_form();

        let notice = submit(&mut form, Some(&settings()), &relay).await;

        assert_eq!(notice, Some(Notice::failed()));
        assert_ne!(Notice::failed(), Notice::not_configured());
        assert_eq!(form.fields, filled_form().fields);
        assert!(!form.submitting());
    }

    #[tokio::test]
    async fn whitespace_message_is_still_dispatched() {
        let relay = RecordingRelay::answering(Ok(()));
        let mut form = filled_form();
        form.fields.message = "   ".to_string();

        let notice = submit(&mut form, Some(&settings()), &relay).await;

        assert_eq!(notice, Some(Notice::sent()));
        let requests = relay.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].template_params.message, "   ");
    }

    #[test]
    fn repeated_identical_notices_get_fresh_serials() {
        let mut form = filled_form();
        assert_eq!(form.notice_serial(), 0);

        form.begin_submission(None);
        let first = form.notice_serial();
        form.begin_submission(None);

        assert_eq!(form.notice(), Some(&Notice::not_configured()));
        assert!(form.notice_serial() > first);

        form.dismiss_notice();
        assert_eq!(form.notice(), None);
        assert_eq!(form.notice_serial(), 2);
    }

    #[test]
    fn second_submit_while_outstanding_is_ignored() {
        let mut form = filled_form();
        let first = form.begin_submission(Some(&settings()));
        assert!(matches!(first, Submission::Dispatch(_)));
        assert!(form.submitting());
        assert_eq!(form.submit_label(), "Sending...");

        assert_eq!(
            form.begin_submission(Some(&settings())),
            Submission::AlreadySubmitting
        );

        form.finish_submission(Err(RelayError::Transport("offline".to_string())));
        assert!(!form.submitting());
    }

    #[test]
    fn relay_request_serializes_template_params() {
        let request = RelayRequest::new(&settings(), &filled_form().fields);
        let body = serde_json::to_value(&request).expect("serializable");

        assert_eq!(body["service_id"], "service_folio");
        assert_eq!(body["user_id"], "pk_live");
        assert_eq!(body["template_params"]["from_name"], "Ada");
        assert_eq!(body["template_params"]["from_email"], "ada@example.com");
        assert_eq!(body["template_params"]["message"], "Hello there");
    }

    #[test]
    fn dismissing_clears_notice() {
        let mut form = filled_form();
        form.begin_submission(None);
        assert!(form.notice().is_some());

        form.dismiss_notice();
        assert_eq!(form.notice(), None);
    }
}
