pub mod operation;
pub mod outcome;
pub mod payload;
pub mod transport;

pub use operation::{OpArg, Operation, ResolvedCall};
pub use outcome::{tag_payload, OperationOutcome, OutcomeFailure};
pub use payload::Paged;
pub use transport::ApiTransport;
