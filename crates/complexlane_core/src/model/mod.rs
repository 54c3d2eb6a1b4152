//! Data model shared by the contract checker and the kernels.
//!
//! # Responsibility
//! - Define the complex64 sample layout and owned result buffers.
//! - Describe element types carried by host array handles.

pub mod buffer;
pub mod element_type;
