//! Integration test: independent threads raising into their own slots.

use pmta_error::{raise, taxonomy, ErrorKind, ErrorSignal, OriginTag};
use std::thread;

#[test]
fn test_concurrent_slots_do_not_interfere() {
    let handles: Vec<_> = (0..16i64)
        .map(|i| {
            thread::spawn(move || {
                let tag = OriginTag::ALL[(i % 4) as usize];
                let message = format!("worker {}", i);
                let mut results = Vec::new();

                for round in 0..200i64 {
                    let mut slot: Option<ErrorSignal> = None;
                    let code = i * 1_000 + round;
                    raise(tag, code, &message, Some(&mut slot)).unwrap();
                    results.push((code, slot.unwrap()));
                }
                (tag, message, results)
            })
        })
        .collect();

    for handle in handles {
        let (tag, message, results) = handle.join().unwrap();
        for (code, signal) in results {
            assert_eq!(signal.code(), code);
            assert_eq!(signal.message(), message);
            assert_eq!(signal.origin(), tag);
        }
    }
}

#[test]
fn test_taxonomy_read_from_many_threads() {
    let handles: Vec<_> = (0..8)
        .map(|_| {
            thread::spawn(|| {
                let table = taxonomy::global();
                ErrorKind::ALL
                    .iter()
                    .all(|k| table.constant(k.constant_name()) == Some(k.code()))
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
