//! Fuzz testing for the insert/remove cycle.
//!
//! The input is decoded as a stream of 4-byte big-endian signed integers.
//! Every key not already present in a long-lived shared tree is recorded and
//! inserted; once the buffer is exhausted, every recorded key is removed
//! again. Membership is asserted after each step, so any invariant breakage
//! that loses or duplicates a key aborts the run. Insertion and removal
//! decode keys identically, keeping the two passes symmetric.

#![no_main]

use std::sync::Mutex;

use libfuzzer_sys::fuzz_target;

use mindeg_tree::MinDegBTreeSet;

// The tree outlives individual runs; one mutex serialises all access.
static TREE: Mutex<MinDegBTreeSet<i32, 4>> = Mutex::new(MinDegBTreeSet::new());

fuzz_target!(|data: &[u8]| {
    let mut tree = TREE.lock().unwrap();
    let mut recorded: Vec<i32> = Vec::new();

    for chunk in data.chunks_exact(4) {
        let key = i32::from_be_bytes(chunk.try_into().unwrap());
        if !tree.contains(&key) {
            recorded.push(key);
            assert!(tree.insert(key));
        }
        assert!(tree.contains(&key));
    }

    for key in &recorded {
        assert!(tree.remove(key));
        assert!(!tree.contains(key));
    }
});
