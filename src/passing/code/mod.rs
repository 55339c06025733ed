//! Timed call targets.
//!
//! Both functions are `#[inline(never)]` so a real CALL happens, and both
//! route their parameter through `black_box` so the optimizer can't elide
//! the copy (by value) or see through the pointer (by reference).
//! `random_work` runs first to keep the call from being hoisted out of the
//! timing loop.

use super::{random_work, EvalContext};
use crate::aggregate::{Element, RandArray};
use std::hint::black_box;

/// `arr` passed by value: the caller materializes all `N * size_of::<T>()`
/// bytes for this call.
///
/// Only the parameter's address goes through `black_box`; moving the value
/// itself would copy the array a second time inside the callee.
#[inline(never)]
pub fn by_val<T: Element, const N: usize>(ctx: &mut EvalContext, arr: RandArray<T, N>) -> u64 {
    let arr = black_box(&arr);
    random_work(ctx);
    arr.compute_value(&mut ctx.rng)
}

/// `arr` passed by reference: only its address crosses the boundary.
#[inline(never)]
pub fn by_ref<T: Element, const N: usize>(ctx: &mut EvalContext, arr: &RandArray<T, N>) -> u64 {
    let arr = black_box(arr);
    random_work(ctx);
    arr.compute_value(&mut ctx.rng)
}
