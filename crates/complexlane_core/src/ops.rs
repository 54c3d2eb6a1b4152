//! Handle-level operations exposed to hosts.
//!
//! # Responsibility
//! - Validate every input handle, then run exactly one kernel.
//! - Emit metadata-only diagnostic events for each call.
//!
//! # Invariants
//! - No numeric work starts before all inputs pass validation.
//! - Log events never include sample values.

use crate::array::{require_mutable, require_readable, ArrayHandle};
use crate::kernel::{self, KernelError, KernelResult};
use crate::model::buffer::{ComplexBuffer, Sample};
use log::{debug, warn};

/// In-place multiply: `x *= alpha`.
///
/// # Errors
/// - Contract errors when `x` is not a writable 1-D contiguous complex64 array.
pub fn scale_inplace(x: &mut ArrayHandle<'_>, alpha: Sample) -> KernelResult<()> {
    let view = require_mutable(x).map_err(|err| rejected("scale_inplace", err.into()))?;
    let len = view.len();
    kernel::scale_in_place(view, alpha);
    debug!("event=kernel_call module=ops op=scale_inplace status=ok len={len}");
    Ok(())
}

/// Returns `y = a * x + b` as a new buffer.
///
/// # Errors
/// - Contract errors when `x` is not a 1-D contiguous complex64 array.
pub fn axpb(x: &ArrayHandle<'_>, a: Sample, b: Sample) -> KernelResult<ComplexBuffer> {
    let view = require_readable(x).map_err(|err| rejected("axpb", err.into()))?;
    let out = kernel::affine(&view, a, b);
    debug!(
        "event=kernel_call module=ops op=axpb status=ok len={}",
        out.len()
    );
    Ok(out)
}

/// Returns the elementwise product `x * y` as a new buffer.
///
/// # Errors
/// - Contract errors for the first invalid input, checked `x` then `y`.
/// - `LengthMismatch` when both are valid but differ in length.
pub fn mul(x: &ArrayHandle<'_>, y: &ArrayHandle<'_>) -> KernelResult<ComplexBuffer> {
    let x_view = require_readable(x).map_err(|err| rejected("mul", err.into()))?;
    let y_view = require_readable(y).map_err(|err| rejected("mul", err.into()))?;
    let out = kernel::multiply(&x_view, &y_view).map_err(|err| rejected("mul", err))?;
    debug!(
        "event=kernel_call module=ops op=mul status=ok len={}",
        out.len()
    );
    Ok(out)
}

fn rejected(op: &'static str, err: KernelError) -> KernelError {
    warn!(
        "event=kernel_call module=ops op={op} status=error error={}",
        err.kind().as_str()
    );
    err
}
