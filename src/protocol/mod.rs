//! Call surfaces of the pull protocol. Both delegate to the same
//! `MessagePeeker` and `MessageDequeuer`.

pub mod contract;
pub mod legacy;
