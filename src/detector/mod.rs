mod client;
pub mod protocol;
#[cfg(test)]
pub(crate) mod test_server;

pub use client::{DetectionBackend, DetectorClient};
pub use protocol::DetectorError;
