//! Complex64 elementwise kernels behind a strict buffer contract.
//! Hosts describe their arrays with an [`ArrayHandle`]; this crate validates
//! the handle and runs scale, affine and multiply kernels over it.

pub mod array;
pub mod config;
pub mod kernel;
pub mod logging;
pub mod model;
pub mod ops;

pub use array::{
    check_contract, require_mutable, require_readable, Access, ArrayHandle, ContractError,
    LayoutFault, MutableView, ReadOnlyView,
};
pub use config::LoggingConfig;
pub use kernel::{ErrorKind, KernelError, KernelResult};
pub use logging::{default_log_level, init_logging, init_logging_with, logging_status, LogLevel};
pub use model::buffer::{ComplexBuffer, Sample, SAMPLE_BYTES};
pub use model::element_type::{ByteOrder, ElementType, ElementTypeParseError, TypeKind};
pub use ops::{axpb, mul, scale_inplace};

/// Minimal health-check API for host integration smoke tests.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
