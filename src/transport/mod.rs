/// Payload encoding and response decoding by content kind
pub mod codec;
/// The request dispatcher and the executor interface services depend on
pub mod dispatcher;
/// Saving downloaded blobs to disk
pub mod download;

pub use dispatcher::{RequestDispatcher, RequestExecutor, Settlement};
