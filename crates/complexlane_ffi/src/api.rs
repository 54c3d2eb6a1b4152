//! C ABI use-case API for host runtimes.
//!
//! # Responsibility
//! - Translate host array descriptors into core handles and back.
//! - Hand owned result buffers to the host and take them back for release.
//!
//! # Invariants
//! - Exported functions never unwind across the FFI boundary.
//! - Every status code is stable; `0` is success.
//! - A `ClBuffer` returned with status `0` must be released exactly once via
//!   `complexlane_buffer_free`.

use complexlane_core::{
    axpb, core_version as core_version_inner, init_logging as init_logging_inner, mul,
    ping as ping_inner, scale_inplace, Access, ArrayHandle, ByteOrder, ComplexBuffer, ElementType,
    ErrorKind, KernelError, Sample, TypeKind,
};
use log::warn;
use std::ffi::{c_char, c_void, CStr, CString};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::OnceLock;

pub const CL_STATUS_OK: i32 = 0;
pub const CL_STATUS_TYPE_MISMATCH: i32 = 1;
pub const CL_STATUS_SHAPE_MISMATCH: i32 = 2;
pub const CL_STATUS_LAYOUT_MISMATCH: i32 = 3;
pub const CL_STATUS_NOT_WRITABLE: i32 = 4;
pub const CL_STATUS_LENGTH_MISMATCH: i32 = 5;
pub const CL_STATUS_NULL_POINTER: i32 = 6;
pub const CL_STATUS_PANIC: i32 = 7;

static PING: &CStr = c"pong";
static CORE_VERSION: OnceLock<CString> = OnceLock::new();

/// One complex64 scalar or sample, `re` lane first.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClComplex {
    pub re: f32,
    pub im: f32,
}

const _: () = assert!(std::mem::size_of::<ClComplex>() == std::mem::size_of::<Sample>());
const _: () = assert!(std::mem::align_of::<ClComplex>() == std::mem::align_of::<Sample>());

impl From<ClComplex> for Sample {
    fn from(value: ClComplex) -> Self {
        Sample::new(value.re, value.im)
    }
}

/// Host array descriptor.
///
/// `kind` and `byte_order` are numpy type-string characters (`b'c'`,
/// `b'<'`); `strides` are in bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ClArrayDesc {
    pub kind: u8,
    pub itemsize: u32,
    pub byte_order: u8,
    pub ndim: usize,
    pub shape: *const usize,
    pub strides: *const isize,
    pub data: *mut c_void,
    pub writable: bool,
}

/// Result buffer owned by the host after a successful call.
#[repr(C)]
#[derive(Debug)]
pub struct ClBuffer {
    pub data: *mut ClComplex,
    pub len: usize,
}

impl ClBuffer {
    fn empty() -> Self {
        Self {
            data: std::ptr::null_mut(),
            len: 0,
        }
    }

    fn from_owned(buffer: ComplexBuffer) -> Self {
        let samples = buffer.into_vec().into_boxed_slice();
        let len = samples.len();
        let data = Box::into_raw(samples) as *mut Sample as *mut ClComplex;
        Self { data, len }
    }
}

/// Maps a kernel error to its stable status code.
pub fn status_for(err: &KernelError) -> i32 {
    match err.kind() {
        ErrorKind::TypeMismatch => CL_STATUS_TYPE_MISMATCH,
        ErrorKind::ShapeMismatch => CL_STATUS_SHAPE_MISMATCH,
        ErrorKind::LayoutMismatch => CL_STATUS_LAYOUT_MISMATCH,
        ErrorKind::NotWritable => CL_STATUS_NOT_WRITABLE,
        ErrorKind::LengthMismatch => CL_STATUS_LENGTH_MISMATCH,
    }
}

/// Returns a static description of `status`.
///
/// # FFI contract
/// - Never returns null; unknown codes map to a generic message.
#[no_mangle]
pub extern "C" fn complexlane_status_message(status: i32) -> *const c_char {
    let message: &'static CStr = match status {
        CL_STATUS_OK => c"ok",
        CL_STATUS_TYPE_MISMATCH => c"expected dtype=complex64",
        CL_STATUS_SHAPE_MISMATCH => c"expected a 1D array",
        CL_STATUS_LAYOUT_MISMATCH => c"expected a C-contiguous, aligned array",
        CL_STATUS_NOT_WRITABLE => c"expected a writable array",
        CL_STATUS_LENGTH_MISMATCH => c"arrays must have the same length",
        CL_STATUS_NULL_POINTER => c"required pointer argument is null",
        CL_STATUS_PANIC => c"internal panic caught at FFI boundary",
        _ => c"unknown status",
    };
    message.as_ptr()
}

/// Health check; returns a static `"pong"`.
#[no_mangle]
pub extern "C" fn complexlane_ping() -> *const c_char {
    PING.as_ptr()
}

/// Core crate version as a static C string.
#[no_mangle]
pub extern "C" fn complexlane_core_version() -> *const c_char {
    CORE_VERSION
        .get_or_init(|| CString::new(core_version_inner()).unwrap_or_default())
        .as_ptr()
}

/// Initializes core logging once per process.
///
/// # FFI contract
/// - Returns null on success.
/// - Otherwise returns an owned error message to release with
///   `complexlane_string_free`.
///
/// # Safety
/// - `level` and `log_dir` must be null or valid NUL-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn complexlane_init_logging(
    level: *const c_char,
    log_dir: *const c_char,
) -> *mut c_char {
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        if level.is_null() || log_dir.is_null() {
            return Err("level and log_dir must not be null".to_string());
        }
        let level = CStr::from_ptr(level).to_string_lossy();
        let log_dir = CStr::from_ptr(log_dir).to_string_lossy();
        init_logging_inner(&level, &log_dir)
    }));

    match outcome {
        Ok(Ok(())) => std::ptr::null_mut(),
        Ok(Err(message)) => owned_c_string(message),
        Err(_) => owned_c_string("init_logging panicked".to_string()),
    }
}

/// Releases a message returned by `complexlane_init_logging`.
///
/// # Safety
/// - `message` must be null or a pointer returned by this library that has
///   not been freed yet.
#[no_mangle]
pub unsafe extern "C" fn complexlane_string_free(message: *mut c_char) {
    if !message.is_null() {
        drop(CString::from_raw(message));
    }
}

/// In-place multiply: `x *= alpha`.
///
/// # Safety
/// - `x` must be null or point to a descriptor whose memory satisfies
///   `ArrayHandle::from_raw_parts`.
#[no_mangle]
pub unsafe extern "C" fn complexlane_scale_inplace(x: *const ClArrayDesc, alpha: ClComplex) -> i32 {
    guarded(|| {
        let Some(desc) = x.as_ref() else {
            return CL_STATUS_NULL_POINTER;
        };
        let mut handle = match handle_from_desc(desc) {
            Ok(handle) => handle,
            Err(status) => return status,
        };
        match scale_inplace(&mut handle, alpha.into()) {
            Ok(()) => CL_STATUS_OK,
            Err(err) => status_for(&err),
        }
    })
}

/// Writes `a * x + b` into a new buffer at `out`.
///
/// # Safety
/// - `x` as in `complexlane_scale_inplace`.
/// - `out` must be null or valid for one `ClBuffer` write.
#[no_mangle]
pub unsafe extern "C" fn complexlane_axpb(
    x: *const ClArrayDesc,
    a: ClComplex,
    b: ClComplex,
    out: *mut ClBuffer,
) -> i32 {
    guarded(|| {
        let (Some(desc), false) = (x.as_ref(), out.is_null()) else {
            return CL_STATUS_NULL_POINTER;
        };
        out.write(ClBuffer::empty());
        let handle = match handle_from_desc(desc) {
            Ok(handle) => handle,
            Err(status) => return status,
        };
        match axpb(&handle, a.into(), b.into()) {
            Ok(buffer) => {
                out.write(ClBuffer::from_owned(buffer));
                CL_STATUS_OK
            }
            Err(err) => status_for(&err),
        }
    })
}

/// Writes the elementwise product `x * y` into a new buffer at `out`.
///
/// # Safety
/// - `x` and `y` as in `complexlane_scale_inplace`.
/// - `out` must be null or valid for one `ClBuffer` write.
#[no_mangle]
pub unsafe extern "C" fn complexlane_mul(
    x: *const ClArrayDesc,
    y: *const ClArrayDesc,
    out: *mut ClBuffer,
) -> i32 {
    guarded(|| {
        let (Some(x_desc), Some(y_desc), false) = (x.as_ref(), y.as_ref(), out.is_null()) else {
            return CL_STATUS_NULL_POINTER;
        };
        out.write(ClBuffer::empty());
        let x_handle = match handle_from_desc(x_desc) {
            Ok(handle) => handle,
            Err(status) => return status,
        };
        let y_handle = match handle_from_desc(y_desc) {
            Ok(handle) => handle,
            Err(status) => return status,
        };
        match mul(&x_handle, &y_handle) {
            Ok(buffer) => {
                out.write(ClBuffer::from_owned(buffer));
                CL_STATUS_OK
            }
            Err(err) => status_for(&err),
        }
    })
}

/// Releases a buffer produced by `complexlane_axpb` or `complexlane_mul`.
///
/// # Safety
/// - `buffer` must come from this library and not have been freed yet.
#[no_mangle]
pub unsafe extern "C" fn complexlane_buffer_free(buffer: ClBuffer) {
    if buffer.data.is_null() {
        return;
    }
    let samples = std::ptr::slice_from_raw_parts_mut(buffer.data as *mut Sample, buffer.len);
    drop(Box::from_raw(samples));
}

fn guarded(call: impl FnOnce() -> i32) -> i32 {
    match catch_unwind(AssertUnwindSafe(call)) {
        Ok(status) => status,
        Err(_) => {
            warn!("event=ffi_call module=ffi status=error error=panic");
            CL_STATUS_PANIC
        }
    }
}

fn owned_c_string(message: String) -> *mut c_char {
    // Interior NULs cannot cross the boundary; replace them.
    let sanitized = message.replace('\0', " ");
    CString::new(sanitized).unwrap_or_default().into_raw()
}

/// Builds a core handle from a host descriptor.
///
/// Unknown kind or byte-order characters become a type mismatch. The element
/// type is judged before any shape or stride pointer is read, so a foreign
/// dtype reports `TYPE_MISMATCH` even when its other fields are unusable.
unsafe fn handle_from_desc<'a>(desc: &ClArrayDesc) -> Result<ArrayHandle<'a>, i32> {
    let kind = TypeKind::from_code(desc.kind).ok_or(CL_STATUS_TYPE_MISMATCH)?;
    let byte_order = ByteOrder::from_code(desc.byte_order).ok_or(CL_STATUS_TYPE_MISMATCH)?;
    let itemsize = usize::try_from(desc.itemsize).map_err(|_| CL_STATUS_TYPE_MISMATCH)?;
    let element_type = ElementType::new(kind, itemsize, byte_order);
    if !element_type.is_complex64() {
        return Err(CL_STATUS_TYPE_MISMATCH);
    }

    let (shape, strides) = if desc.ndim == 0 {
        (Vec::new(), Vec::new())
    } else {
        if desc.shape.is_null() || desc.strides.is_null() {
            return Err(CL_STATUS_NULL_POINTER);
        }
        (
            std::slice::from_raw_parts(desc.shape, desc.ndim).to_vec(),
            std::slice::from_raw_parts(desc.strides, desc.ndim).to_vec(),
        )
    };

    let access = if desc.writable {
        Access::Writable
    } else {
        Access::ReadOnly
    };

    Ok(ArrayHandle::from_raw_parts(
        element_type,
        shape,
        strides,
        desc.data as *mut u8,
        access,
    ))
}
