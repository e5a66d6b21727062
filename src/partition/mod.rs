mod district;
mod memo;
mod partition;

pub(self) use memo::AttemptMemo;
pub use district::District;
pub use partition::PartitionState;
