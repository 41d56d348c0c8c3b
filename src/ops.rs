//! Operators returned by the [`ObservableExt`](crate::observable::ObservableExt)
//! methods.

pub mod filter;
pub mod finalize;
#[cfg(feature = "futures")]
pub mod into_stream;
pub mod map;
pub mod publish;
pub mod ref_count;
pub mod take;
