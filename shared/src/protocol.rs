mod error;
mod opcode;
mod operation;
mod snapshot;

pub use error::OperationError;
pub use opcode::Opcode;
pub use operation::GraphOperation;
pub use snapshot::snapshot_operations;
