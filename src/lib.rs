#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), no_std)]
#![deny(
    unsafe_code,
    unused_imports,
    unused_variables,
    unused_must_use,
    missing_docs,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented
)]

extern crate alloc;

mod order;
pub use order::{FloatOrder, Natural, Order, Reverse, compare};

mod tree;
pub use tree::{Iter, NodeId, Occupied, RbTree};

#[cfg(any(test, feature = "validate"))]
mod validate;
#[cfg(any(test, feature = "validate"))]
pub use validate::Violation;
