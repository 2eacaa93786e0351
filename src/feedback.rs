//! Asynchronous submission of the feedback form.
//!
//! The form's fields are url-encoded and posted to the feedback endpoint.
//! The JSON reply decides which acknowledgment the visitor sees:
//!
//! - `status == "success"`: thank-you message, form cleared
//! - any other status: generic error message, form untouched
//! - transport failure or undecodable body: network error message, form untouched

use crate::config::{
    FEEDBACK_ENDPOINT, FEEDBACK_SUCCESS_STATUS, MSG_FEEDBACK_RECEIVED, MSG_FEEDBACK_REJECTED,
    MSG_NETWORK_ERROR,
};
use futures::future::LocalBoxFuture;
use log::{info, warn};
use serde::Deserialize;
use std::fmt;

/// Errors that prevent a reply from being read at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackError {
    /// The request could not be sent or the body could not be read.
    Network(String),
    /// The body was not a JSON feedback reply.
    Decode(String),
}

impl fmt::Display for FeedbackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedbackError::Network(e) => write!(f, "Feedback request failed: {}", e),
            FeedbackError::Decode(e) => write!(f, "Feedback reply could not be decoded: {}", e),
        }
    }
}

impl std::error::Error for FeedbackError {}

/// Body returned by the feedback endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeedbackReply {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl FeedbackReply {
    pub fn is_success(&self) -> bool {
        self.status == FEEDBACK_SUCCESS_STATUS
    }
}

/// How a submission ended, from the visitor's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Accepted,
    Rejected,
    NetworkError,
}

impl Outcome {
    /// Acknowledgment shown to the visitor.
    pub fn message(self) -> &'static str {
        match self {
            Outcome::Accepted => MSG_FEEDBACK_RECEIVED,
            Outcome::Rejected => MSG_FEEDBACK_REJECTED,
            Outcome::NetworkError => MSG_NETWORK_ERROR,
        }
    }
}

/// The form being submitted.
pub trait FeedbackForm {
    /// Current (name, value) pairs in document order.
    fn fields(&self) -> Vec<(String, String)>;
    /// Restore every field to its default.
    fn reset(&self);
}

/// Sends an url-encoded body and hands back the raw response body.
pub trait Transport {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        body: String,
    ) -> LocalBoxFuture<'a, Result<String, FeedbackError>>;
}

/// Blocking acknowledgment shown to the visitor.
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// `application/x-www-form-urlencoded` body for the given fields.
pub fn encode_form(fields: &[(String, String)]) -> String {
    fields
        .iter()
        .map(|(name, value)| {
            format!(
                "{}={}",
                urlencoding::encode(name),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

pub fn parse_reply(body: &str) -> Result<FeedbackReply, FeedbackError> {
    serde_json::from_str(body).map_err(|e| FeedbackError::Decode(e.to_string()))
}

/// Post the form once and acknowledge the result.
///
/// Never fails: every error path ends in a notification.
pub async fn submit_feedback<F, T, N>(form: &F, transport: &T, notifier: &N) -> Outcome
where
    F: FeedbackForm + ?Sized,
    T: Transport + ?Sized,
    N: Notifier + ?Sized,
{
    let body = encode_form(&form.fields());
    let reply = match transport.post_form(FEEDBACK_ENDPOINT, body).await {
        Ok(raw) => parse_reply(&raw),
        Err(e) => Err(e),
    };

    let outcome = match reply {
        Ok(reply) if reply.is_success() => {
            info!(
                "Feedback accepted: {}",
                reply.message.as_deref().unwrap_or("no message")
            );
            Outcome::Accepted
        }
        Ok(reply) => {
            warn!("Feedback rejected with status {:?}", reply.status);
            Outcome::Rejected
        }
        Err(e) => {
            warn!("{}", e);
            Outcome::NetworkError
        }
    };

    notifier.notify(outcome.message());
    if outcome == Outcome::Accepted {
        form.reset();
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::FutureExt;
    use std::cell::RefCell;

    struct FakeForm {
        fields: RefCell<Vec<(String, String)>>,
    }

    impl FakeForm {
        fn filled() -> Self {
            let fields = [
                ("name", "Ada Lovelace"),
                ("email", "ada@example.com"),
                ("role", "driver"),
                ("rating", "5"),
                ("message", "Rides & routes: great!"),
            ];
            Self {
                fields: RefCell::new(
                    fields
                        .iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect(),
                ),
            }
        }

        fn values(&self) -> Vec<String> {
            self.fields.borrow().iter().map(|(_, v)| v.clone()).collect()
        }
    }

    impl FeedbackForm for FakeForm {
        fn fields(&self) -> Vec<(String, String)> {
            self.fields.borrow().clone()
        }

        fn reset(&self) {
            for (_, value) in self.fields.borrow_mut().iter_mut() {
                value.clear();
            }
        }
    }

    struct ScriptedTransport {
        reply: Result<String, FeedbackError>,
        sent: RefCell<Vec<(String, String)>>,
    }

    impl ScriptedTransport {
        fn replying(body: &str) -> Self {
            Self {
                reply: Ok(body.to_string()),
                sent: RefCell::new(Vec::new()),
            }
        }

        fn failing(error: &str) -> Self {
            Self {
                reply: Err(FeedbackError::Network(error.to_string())),
                sent: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for ScriptedTransport {
        fn post_form<'a>(
            &'a self,
            url: &'a str,
            body: String,
        ) -> LocalBoxFuture<'a, Result<String, FeedbackError>> {
            self.sent.borrow_mut().push((url.to_string(), body));
            let reply = self.reply.clone();
            async move { reply }.boxed_local()
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        messages: RefCell<Vec<String>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, message: &str) {
            self.messages.borrow_mut().push(message.to_string());
        }
    }

    fn run(form: &FakeForm, transport: &ScriptedTransport) -> (Outcome, Vec<String>) {
        let notifier = RecordingNotifier::default();
        let outcome = block_on(submit_feedback(form, transport, &notifier));
        (outcome, notifier.messages.into_inner())
    }

    #[test]
    fn success_acknowledges_and_clears_form() {
        let form = FakeForm::filled();
        let transport =
            ScriptedTransport::replying(r#"{"status":"success","message":"Feedback received."}"#);
        let (outcome, messages) = run(&form, &transport);

        assert_eq!(outcome, Outcome::Accepted);
        assert_eq!(messages, [MSG_FEEDBACK_RECEIVED]);
        assert!(form.values().iter().all(String::is_empty));
    }

    #[test]
    fn posts_encoded_fields_to_endpoint() {
        let form = FakeForm::filled();
        let transport = ScriptedTransport::replying(r#"{"status":"success"}"#);
        run(&form, &transport);

        let sent = transport.sent.into_inner();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "/feedback");
        assert_eq!(
            sent[0].1,
            "name=Ada%20Lovelace&email=ada%40example.com&role=driver&rating=5\
             &message=Rides%20%26%20routes%3A%20great%21"
        );
    }

    #[test]
    fn other_status_is_rejection_and_keeps_fields() {
        let form = FakeForm::filled();
        let before = form.values();
        let transport = ScriptedTransport::replying(r#"{"status":"error"}"#);
        let (outcome, messages) = run(&form, &transport);

        assert_eq!(outcome, Outcome::Rejected);
        assert_eq!(messages, [MSG_FEEDBACK_REJECTED]);
        assert_eq!(form.values(), before);
    }

    #[test]
    fn status_comparison_is_exact() {
        let form = FakeForm::filled();
        let transport = ScriptedTransport::replying(r#"{"status":"Success"}"#);
        assert_eq!(run(&form, &transport).0, Outcome::Rejected);
    }

    #[test]
    fn malformed_json_is_network_error() {
        let form = FakeForm::filled();
        let before = form.values();
        let transport = ScriptedTransport::replying("<html>502 Bad Gateway</html>");
        let (outcome, messages) = run(&form, &transport);

        assert_eq!(outcome, Outcome::NetworkError);
        assert_eq!(messages, [MSG_NETWORK_ERROR]);
        assert_eq!(form.values(), before);
    }

    #[test]
    fn reply_without_status_is_network_error() {
        let form = FakeForm::filled();
        let transport = ScriptedTransport::replying(r#"{"message":"hi"}"#);
        assert_eq!(run(&form, &transport).0, Outcome::NetworkError);
    }

    #[test]
    fn connection_refused_is_network_error() {
        let form = FakeForm::filled();
        let before = form.values();
        let transport = ScriptedTransport::failing("connection refused");
        let (outcome, messages) = run(&form, &transport);

        assert_eq!(outcome, Outcome::NetworkError);
        assert_eq!(messages, [MSG_NETWORK_ERROR]);
        assert_eq!(form.values(), before);
    }

    #[test]
    fn each_submission_is_independent() {
        let form = FakeForm::filled();
        let transport = ScriptedTransport::replying(r#"{"status":"error"}"#);
        run(&form, &transport);
        run(&form, &transport);
        assert_eq!(transport.sent.borrow().len(), 2);
    }

    #[test]
    fn empty_form_encodes_to_empty_body() {
        assert_eq!(encode_form(&[]), "");
        assert_eq!(
            encode_form(&[("rating".to_string(), String::new())]),
            "rating="
        );
    }

    #[test]
    fn reply_message_is_optional() {
        let reply = parse_reply(r#"{"status":"success","extra":1}"#).unwrap();
        assert!(reply.is_success());
        assert_eq!(reply.message, None);
    }
}
