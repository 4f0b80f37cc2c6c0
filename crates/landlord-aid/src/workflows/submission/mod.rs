//! Sends a finished intake form to the persistence endpoint and keeps a local copy.

pub mod local_store;
pub mod transport;

pub use local_store::{JsonFileStore, LocalStore, LocalStoreError, MemoryStore, LOCAL_STORAGE_KEY};
pub use transport::{Acknowledgement, ApplicationTransport, HttpTransport, TransportError};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use super::intake::domain::ApplicationData;
use super::intake::form::{FormError, IntakeForm};

/// Notice shown to the applicant when delivery fails.
pub const SUBMISSION_FAILED_NOTICE: &str =
    "There was an error submitting your application. Please try again.";

/// Where the applicant lands once the submission settles successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Dashboard,
}

impl Destination {
    pub const fn path(self) -> &'static str {
        match self {
            Destination::Dashboard => "/dashboard",
        }
    }
}

#[derive(Debug)]
pub struct SubmissionOutcome {
    pub data: ApplicationData,
    pub acknowledgement: Acknowledgement,
    pub destination: Destination,
    /// False when the endpoint took the application but the local copy could not be written.
    pub saved_locally: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("a submission is already in progress")]
    InFlight,
    #[error(transparent)]
    Form(#[from] FormError),
    #[error("unable to encode application: {0}")]
    Encoding(#[from] serde_json::Error),
    #[error("submission could not be delivered: {0}")]
    Transport(#[from] TransportError),
}

impl SubmissionError {
    /// Text suitable for a blocking alert, if this failure should interrupt the applicant.
    pub fn user_notice(&self) -> Option<&'static str> {
        match self {
            SubmissionError::Transport(_) => Some(SUBMISSION_FAILED_NOTICE),
            _ => None,
        }
    }
}

/// Clears the in-flight flag when the request settles, whichever way it goes.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Submission flow for the final step of the intake form.
pub struct SubmissionClient<T, S> {
    transport: Arc<T>,
    store: Arc<S>,
    in_flight: AtomicBool,
}

impl<T, S> SubmissionClient<T, S>
where
    T: ApplicationTransport + 'static,
    S: LocalStore + 'static,
{
    pub fn new(transport: Arc<T>, store: Arc<S>) -> Self {
        Self {
            transport,
            store,
            in_flight: AtomicBool::new(false),
        }
    }

    /// The submit action should be disabled while this is true.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Validate the final step, deliver the payload, then keep a local copy.
    ///
    /// Nothing is written locally unless the endpoint accepted the payload, and a failed
    /// delivery leaves the form on its current step. Once the endpoint has the record a failed
    /// local write is only logged, so a retry cannot append the same application twice.
    pub async fn submit(&self, form: &mut IntakeForm) -> Result<SubmissionOutcome, SubmissionError> {
        let _guard = InFlightGuard::acquire(&self.in_flight).ok_or(SubmissionError::InFlight)?;

        let data = form.submit()?;
        let payload = serde_json::to_value(&data)?;

        let acknowledgement = match self.transport.send(&payload).await {
            Ok(ack) => ack,
            Err(err) => {
                warn!(error = %err, "application submission failed");
                return Err(err.into());
            }
        };

        let saved_locally = match self.store.save(&data) {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "application delivered but local copy not saved");
                false
            }
        };
        info!(
            status = acknowledgement.status,
            units = data.units.len(),
            saved_locally,
            "application submitted"
        );

        Ok(SubmissionOutcome {
            data,
            acknowledgement,
            destination: Destination::Dashboard,
            saved_locally,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::intake::addresses::AddressBook;
    use crate::workflows::intake::domain::{CostRange, RentalStatus};
    use crate::workflows::intake::form::FormStep;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Mutex;
    use tokio::sync::Notify;

    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<Value>>,
        fail: bool,
    }

    #[async_trait]
    impl ApplicationTransport for RecordingTransport {
        async fn send(&self, payload: &Value) -> Result<Acknowledgement, TransportError> {
            if self.fail {
                return Err(TransportError::Network("connection refused".to_string()));
            }
            self.sent.lock().unwrap().push(payload.clone());
            Ok(Acknowledgement {
                status: 200,
                body: json!({ "message": "Application saved" }),
            })
        }
    }

    #[derive(Default)]
    struct GatedTransport {
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl ApplicationTransport for GatedTransport {
        async fn send(&self, _payload: &Value) -> Result<Acknowledgement, TransportError> {
            self.entered.notify_one();
            self.release.notified().await;
            Ok(Acknowledgement {
                status: 200,
                body: Value::Null,
            })
        }
    }

    fn final_step_form() -> IntakeForm {
        let mut data = ApplicationData {
            first_name: "Mo".to_string(),
            email: "mo@example.com".to_string(),
            property_address: "600 Catharine St, Philadelphia, PA, 19147".to_string(),
            rented_out: Some(RentalStatus::Preparing),
            estimated_cost: Some(CostRange::From26kTo50k),
            ..ApplicationData::default()
        };
        data.set_number_of_units("1");
        data.units[0].monthly_rent = "875".to_string();
        IntakeForm::resume(Arc::new(AddressBook::default()), Some(data), Some("4"))
    }

    #[tokio::test]
    async fn successful_submission_saves_locally() {
        let transport = Arc::new(RecordingTransport::default());
        let store = Arc::new(MemoryStore::default());
        let client = SubmissionClient::new(transport.clone(), store.clone());
        let mut form = final_step_form();

        let outcome = client.submit(&mut form).await.expect("submission succeeds");

        assert_eq!(outcome.destination, Destination::Dashboard);
        assert_eq!(outcome.acknowledgement.body["message"], "Application saved");
        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0]["estimatedCost"], "26-50k");
        assert_eq!(store.load().unwrap(), Some(form.data().clone()));
        assert!(outcome.saved_locally);
        assert!(!client.is_submitting());
    }

    struct BrokenStore;

    impl LocalStore for BrokenStore {
        fn load(&self) -> Result<Option<ApplicationData>, LocalStoreError> {
            Ok(None)
        }

        fn save(&self, _data: &ApplicationData) -> Result<(), LocalStoreError> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
        }
    }

    #[tokio::test]
    async fn local_save_failure_after_delivery_still_reaches_dashboard() {
        let transport = Arc::new(RecordingTransport::default());
        let client = SubmissionClient::new(transport.clone(), Arc::new(BrokenStore));
        let mut form = final_step_form();

        let outcome = client.submit(&mut form).await.expect("delivery counts as success");

        assert_eq!(outcome.destination, Destination::Dashboard);
        assert!(!outcome.saved_locally);
        assert_eq!(transport.sent.lock().unwrap().len(), 1);
        assert!(!client.is_submitting());
    }

    #[tokio::test]
    async fn transport_failure_keeps_form_and_skips_local_copy() {
        let transport = Arc::new(RecordingTransport {
            fail: true,
            ..RecordingTransport::default()
        });
        let store = Arc::new(MemoryStore::default());
        let client = SubmissionClient::new(transport, store.clone());
        let mut form = final_step_form();

        let err = client.submit(&mut form).await.expect_err("delivery fails");

        assert!(matches!(err, SubmissionError::Transport(_)));
        assert_eq!(err.user_notice(), Some(SUBMISSION_FAILED_NOTICE));
        assert_eq!(form.step(), FormStep::Repairs);
        assert!(store.load().unwrap().is_none());
        assert!(!client.is_submitting(), "guard released after failure");
    }

    #[tokio::test]
    async fn invalid_final_step_is_not_sent() {
        let transport = Arc::new(RecordingTransport::default());
        let client = SubmissionClient::new(transport.clone(), Arc::new(MemoryStore::default()));
        let mut form = final_step_form();
        form.set_estimated_cost(None);

        let err = client.submit(&mut form).await.expect_err("validation fails");

        assert!(matches!(err, SubmissionError::Form(FormError::Invalid { .. })));
        assert!(transport.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn second_submit_is_rejected_while_first_is_pending() {
        let transport = Arc::new(GatedTransport::default());
        let client = Arc::new(SubmissionClient::new(
            transport.clone(),
            Arc::new(MemoryStore::default()),
        ));

        let pending = {
            let client = client.clone();
            tokio::spawn(async move {
                let mut form = final_step_form();
                client.submit(&mut form).await.map(|outcome| outcome.destination)
            })
        };
        transport.entered.notified().await;
        assert!(client.is_submitting());

        let mut duplicate = final_step_form();
        let err = client.submit(&mut duplicate).await.expect_err("duplicate rejected");
        assert!(matches!(err, SubmissionError::InFlight));

        transport.release.notify_one();
        let destination = pending.await.expect("task joins").expect("first submission succeeds");
        assert_eq!(destination, Destination::Dashboard);
        assert!(!client.is_submitting());
    }
}
