//! Testing infrastructure for folio.
//!
//! - `FakeAdmin`: in-memory [`AdminApi`](folio_client::AdminApi) with scripted
//!   failures, latency and a call log, for controller tests
//! - `StubServer`: HTTP stub of the backend speaking the envelope contract
//! - `TestWorld`: isolated data directory for CLI integration tests
//! - `fixtures`: sample records
//! - `assertions`: checks over the CLI's JSON output

pub mod assertions;
pub mod fake;
pub mod fixtures;
pub mod stub;
pub mod world;

pub use fake::{Call, FakeAdmin, Op};
pub use stub::{RecordedRequest, StubServer};
pub use world::{CliResult, TestWorld};
