//! Pure data models shared by the e-invoice client crates.
//!
//! * [`envelope`]: the outer JSON envelope exchanged with the remote service.
//! * [`config`]: client, logging and application configuration.
//! * [`invoice`]: business payloads carried inside the encrypted `Data` field.

pub mod config;
pub mod envelope;
pub mod invoice;
