#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use vtcore::Ring;

#[derive(Arbitrary, Debug)]
enum Op {
    Append(u16),
    Insert { offset: u8, value: u16 },
    InsertPreserve { offset: u8, value: u16 },
    Remove { offset: u8, free: bool },
    SetCache { offset: u8 },
    Get { offset: u8 },
}

fuzz_target!(|input: (u8, Vec<Op>)| {
    let (max, ops) = input;
    // The ring validates its own invariants after every operation when
    // debug assertions are on, so replaying arbitrary operation sequences
    // is the whole test.
    let mut ring: Ring<u16> = Ring::new(max as usize % 32);

    for op in ops {
        // Offsets are taken relative to delta so most operations land in or
        // near the live window; the rest exercise the no-op paths.
        match op {
            Op::Append(value) => ring.append(value),
            Op::Insert { offset, value } => {
                ring.insert(ring.delta() + offset as i64 - 8, value);
            }
            Op::InsertPreserve { offset, value } => {
                ring.insert_preserve(ring.delta() + offset as i64 - 8, value);
            }
            Op::Remove { offset, free } => {
                ring.remove(ring.delta() + offset as i64 - 8, free);
            }
            Op::SetCache { offset } => {
                ring.set_cache(ring.delta() + offset as i64 - 8);
            }
            Op::Get { offset } => {
                let position = ring.delta() + offset as i64 - 8;
                let row = ring.get(position);
                assert_eq!(row.is_some(), ring.contains(position));
            }
        }
        assert!(ring.len() <= ring.capacity());
    }
});
