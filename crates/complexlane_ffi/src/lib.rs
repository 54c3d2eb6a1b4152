//! C ABI bridge for complexlane core.
//! Host runtimes describe their arrays with `ClArrayDesc` and receive owned
//! `ClBuffer` results.

pub mod api;
