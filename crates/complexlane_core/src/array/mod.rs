//! Buffer contract checker.
//!
//! # Responsibility
//! - Describe host arrays through a plain handle descriptor.
//! - Turn handles into typed complex64 views or precise contract errors.
//!
//! # Invariants
//! - Validation is fully front-loaded; no view exists for an invalid handle.

mod contract;
mod handle;

pub use contract::{
    check_contract, require_mutable, require_readable, ContractError, LayoutFault, MutableView,
    ReadOnlyView,
};
pub use handle::{Access, ArrayHandle};
