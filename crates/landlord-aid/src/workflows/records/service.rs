use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, info};

use super::store::{RecordStore, StoreError};
use crate::workflows::intake::domain::ApplicationData;
use crate::workflows::intake::validation::{validate_all, ValidationError};

/// Whether payloads are checked before they are appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayloadPolicy {
    /// Any JSON body is appended as received.
    #[default]
    Permissive,
    /// The body must be a complete, valid application.
    Validated,
}

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("applications must be sent as application/json")]
    UnsupportedMediaType,
    #[error("request body is not JSON: {0}")]
    Unreadable(serde_json::Error),
    #[error("payload is not an application: {0}")]
    Malformed(serde_json::Error),
    #[error("application failed validation ({} error(s))", .0.len())]
    Invalid(Vec<ValidationError>),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Receives submitted applications and appends them to the record store.
pub struct RecordService<S> {
    store: Arc<S>,
    policy: PayloadPolicy,
}

impl<S> RecordService<S>
where
    S: RecordStore + 'static,
{
    pub fn new(store: Arc<S>, policy: PayloadPolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> PayloadPolicy {
        self.policy
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Read a raw request body as JSON.
    ///
    /// The content type is only enforced under [`PayloadPolicy::Validated`]; otherwise the bytes
    /// are parsed whatever the header says. A blank body is recorded as `{}`.
    pub fn decode(&self, declared_json: bool, body: &[u8]) -> Result<Value, RecordError> {
        if self.policy == PayloadPolicy::Validated && !declared_json {
            return Err(RecordError::UnsupportedMediaType);
        }
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Object(Map::new()));
        }
        serde_json::from_slice(body).map_err(RecordError::Unreadable)
    }

    pub fn record(&self, payload: Value) -> Result<(), RecordError> {
        if self.policy == PayloadPolicy::Validated {
            let application: ApplicationData =
                serde_json::from_value(payload.clone()).map_err(RecordError::Malformed)?;
            let errors: Vec<ValidationError> = validate_all(&application).into_values().collect();
            if !errors.is_empty() {
                return Err(RecordError::Invalid(errors));
            }
        }

        debug!(%payload, "application payload received");
        self.store.append(&payload)?;
        info!(policy = ?self.policy, "application saved");
        Ok(())
    }
}
