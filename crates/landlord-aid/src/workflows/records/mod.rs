//! Backend side of submission: the append-only application ledger and its HTTP endpoint.

pub mod router;
pub mod service;
pub mod store;


pub use router::records_router;
pub use service::{PayloadPolicy, RecordError, RecordService};
pub use store::{JsonlRecordStore, MemoryRecordStore, RecordStore, StoreError};

pub const APPLICATIONS_PATH: &str = "/api/applications";
