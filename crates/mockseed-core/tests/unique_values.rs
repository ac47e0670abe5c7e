use std::collections::HashSet;

use mockseed_core::{DEFAULT_MAX_ATTEMPTS, IssuedSet, ensure_unique};

#[test]
fn distinct_when_range_is_large_enough() {
    let mut issued = IssuedSet::new();
    let mut next = 0_u32;
    let mut produce = || {
        next = (next + 7) % 50;
        format!("value-{next}")
    };

    let values: Vec<String> = (0..50)
        .map(|_| ensure_unique(&mut produce, &mut issued, DEFAULT_MAX_ATTEMPTS))
        .collect();

    let distinct: HashSet<&String> = values.iter().collect();
    assert_eq!(distinct.len(), 50);
    assert_eq!(issued.len(), 50);
    assert_eq!(issued.fallbacks(), 0);
    for value in &values {
        assert!(issued.contains(value));
    }
}

#[test]
fn distinct_when_range_is_too_small() {
    let mut issued = IssuedSet::new();
    let pool = ["red", "green", "blue"];
    let mut idx = 0_usize;
    let mut produce = || {
        idx += 1;
        pool[idx % pool.len()].to_string()
    };

    let values: Vec<String> = (0..10)
        .map(|_| ensure_unique(&mut produce, &mut issued, 20))
        .collect();

    let distinct: HashSet<&String> = values.iter().collect();
    assert_eq!(distinct.len(), 10);
    assert_eq!(issued.len(), 10);
    assert_eq!(issued.fallbacks(), 7);
    assert!(values.iter().any(|value| value == "green1" || value == "blue1" || value == "red1"));
}

#[test]
fn single_value_producer_uses_increasing_suffixes() {
    let mut issued = IssuedSet::new();
    let values: Vec<String> = (0..4)
        .map(|_| ensure_unique(|| "dup".to_string(), &mut issued, 3))
        .collect();
    assert_eq!(values, vec!["dup", "dup1", "dup2", "dup3"]);
}
