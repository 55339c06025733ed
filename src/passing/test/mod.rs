//! Tests for the timed call targets

use super::*;
use crate::aggregate::{Element, RandArray};

/// Run `passes` calls through each path from the same starting state and
/// check that values and final state agree.
fn verify_paths<T: Element, const N: usize>(seed: u64, passes: usize) -> Result<(), String> {
    let mut setup = EvalContext::new(seed);
    let arr = RandArray::<T, N>::new(&mut setup.rng);

    let mut inline = setup.clone();
    let mut via_ref = setup.clone();
    let mut via_val = setup;

    for pass in 0..passes {
        random_work(&mut inline);
        let expected = arr.compute_value(&mut inline.rng);
        let got_ref = by_ref(&mut via_ref, &arr);
        let got_val = by_val(&mut via_val, arr);

        if got_ref != expected || got_val != expected {
            return Err(format!(
                "RandArray<{}, {}> pass {}: inline {}, by ref {}, by val {}",
                std::any::type_name::<T>(),
                N,
                pass,
                expected,
                got_ref,
                got_val
            ));
        }
    }

    if inline.rng != via_ref.rng || inline.rng != via_val.rng {
        return Err("random streams diverged".to_string());
    }
    if inline.work != via_ref.work || inline.work != via_val.work {
        return Err("work slots diverged".to_string());
    }
    Ok(())
}

#[test]
fn test_all_paths_agree() {
    verify_paths::<u8, 1>(42, 500).unwrap();
    verify_paths::<u16, 8>(42, 500).unwrap();
    verify_paths::<u32, 256>(7, 500).unwrap();
    verify_paths::<u64, 2048>(7, 200).unwrap();
}

#[test]
fn test_random_work_touches_one_slot() {
    let mut ctx = EvalContext::new(11);
    let mut replay = ctx.rng.clone();
    let slot = replay.next_below(WORK_SLOTS as u64) as usize;
    let random = replay.next();

    random_work(&mut ctx);

    for (i, &w) in ctx.work.iter().enumerate() {
        if i == slot {
            assert_eq!(w, random ^ (random << 1));
        } else {
            assert_eq!(w, 0);
        }
    }
    assert_eq!(ctx.rng, replay);
}

#[test]
fn test_random_work_wraps() {
    let mut ctx = EvalContext::new(5);
    ctx.work = [u64::MAX; WORK_SLOTS];
    for _ in 0..1000 {
        random_work(&mut ctx);
    }
    assert!(ctx.work.iter().any(|&w| w != u64::MAX));
}

#[test]
fn test_checksum_stable() {
    let mut ctx = EvalContext::default();
    assert_eq!(ctx.checksum(), 0);

    ctx.by_val_sums.extend([10, 99]);
    ctx.by_ref_sums.extend([5, 1]);
    assert_eq!(ctx.checksum(), 15);

    ctx.work[3] = 0b1010;
    assert_eq!(ctx.checksum(), 15 ^ 0b1010);
}

#[test]
fn test_mode_labels() {
    assert_eq!(PassMode::ByRef.to_string(), "by ref");
    assert_eq!(PassMode::ByVal.label(), "by val");
    assert_eq!(PassMode::ALL, [PassMode::ByRef, PassMode::ByVal]);
}

#[test]
fn test_by_val_largest_array_matches_by_ref() {
    // u64 x 16384 is 128 KiB per copy
    let handle = std::thread::Builder::new()
        .stack_size(16 * 1024 * 1024)
        .spawn(|| {
            verify_paths::<u64, 16384>(42, 64)?;
            verify_paths::<u8, 16384>(3, 64)
        })
        .unwrap();
    handle.join().unwrap().unwrap();
}
