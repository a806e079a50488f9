// Property tests for ChainTable kept inside the crate so they can reach
// chain layout helpers without widening the public API.

use crate::chain_table::ChainTable;
use crate::hasher::{Djb2, Poly31, Sdbm, SlotHasher};
use crate::sync_chain_table::SyncChainTable;
use crate::table::Table;
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashMap};

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize, i32),
    Get(usize),
    Remove(usize),
    Contains(String),
    Mutate(usize, i32),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Put(i, v)),
            idx.clone().prop_map(OpI::Get),
            idx.clone().prop_map(OpI::Remove),
            prop_oneof![contains_pool, "[a-z]{0,5}"].prop_map(OpI::Contains),
            (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

#[derive(Clone, Default)]
struct ConstHasher;
impl SlotHasher for ConstHasher {
    fn hash(&self, _key: &[u8]) -> u64 {
        0
    }
}

// State-machine equivalence against std::collections::HashMap.
// Invariants checked after every op:
// - put returns the replaced value exactly when the model held the key.
// - get/contains_key/remove agree with the model.
// - A full cursor walk visits each key once, in chain-consistent order.
// - Every key sits in the chain selected by its hash.
// - size equals the model's len.
fn run<H: SlotHasher>(
    mut sut: ChainTable<i32, H>,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, i32> = HashMap::new();
    for op in ops {
        match op {
            OpI::Put(i, v) => {
                let k = &pool[i];
                let prev = sut.put(k, v);
                prop_assert_eq!(prev, model.insert(k.clone(), v));
            }
            OpI::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k), model.get(k));
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.remove(k), model.remove(k));
                prop_assert!(sut.get(k).is_none());
            }
            OpI::Contains(s) => {
                prop_assert_eq!(sut.contains_key(&s), model.contains_key(&s));
            }
            OpI::Mutate(i, d) => {
                let k = &pool[i];
                if let Some(v) = sut.get_mut(k) {
                    *v = v.wrapping_add(d);
                    let mv = model.get_mut(k).expect("present in model");
                    *mv = mv.wrapping_add(d);
                } else {
                    prop_assert!(!model.contains_key(k));
                }
            }
            OpI::Iterate => {
                let mut c = sut.cursor();
                let mut seen: Vec<(String, i32)> = Vec::new();
                while c.has_next() {
                    prop_assert!(c.has_next(), "has_next must be stable");
                    let (k, v) = c.next_entry().expect("has_next promised an entry");
                    seen.push((k.to_owned(), *v));
                }
                prop_assert!(c.get_next().is_none());
                prop_assert_eq!(seen.len(), model.len());
                let as_map: BTreeMap<String, i32> = seen.into_iter().collect();
                let expected: BTreeMap<String, i32> =
                    model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                prop_assert_eq!(as_map, expected);
            }
        }

        // Post-conditions after each op
        prop_assert_eq!(sut.size(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        let lengths = sut.chain_lengths();
        prop_assert_eq!(lengths.iter().sum::<usize>(), model.len());
        // Scan order is non-decreasing in slot index.
        let slots: Vec<usize> = sut.keys().map(|k| sut_slot(&sut, k)).collect();
        prop_assert!(slots.windows(2).all(|w| w[0] <= w[1]));
    }
    Ok(())
}

fn sut_slot<H: SlotHasher>(t: &ChainTable<i32, H>, key: &str) -> usize {
    t.hasher().slot_index(key.as_bytes(), t.slot_count())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    #[test]
    fn prop_state_machine_djb2((pool, ops) in arb_scenario(), slots in 1usize..8) {
        run(ChainTable::with_hasher(slots, Djb2), &pool, ops)?;
    }

    #[test]
    fn prop_state_machine_sdbm((pool, ops) in arb_scenario()) {
        run(ChainTable::with_hasher(3, Sdbm), &pool, ops)?;
    }

    #[test]
    fn prop_state_machine_poly31((pool, ops) in arb_scenario()) {
        run(ChainTable::with_hasher(5, Poly31), &pool, ops)?;
    }

    // Same invariants with every key in one chain: stresses head, middle
    // and tail unlinking.
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run(ChainTable::with_hasher(4, ConstHasher), &pool, ops)?;
    }

    // Keys inserted in any order are all retrievable with their last value,
    // and repeating a put does not change size.
    #[test]
    fn prop_last_put_wins(pairs in proptest::collection::vec(("[a-c]{1,3}", any::<u16>()), 0..40)) {
        let mut t = ChainTable::new(8);
        let mut model = BTreeMap::new();
        for (k, v) in &pairs {
            t.put(k, *v);
            model.insert(k.clone(), *v);
            let before = t.size();
            t.put(k, *v);
            prop_assert_eq!(t.size(), before);
        }
        for (k, v) in &model {
            prop_assert_eq!(t.get(k), Some(v));
        }
        let keys: BTreeSet<&str> = t.keys().collect();
        prop_assert_eq!(keys.len(), model.len());
    }

    // The shared trait contract holds for the synchronized variant too.
    #[test]
    fn prop_sync_matches_model((pool, ops) in arb_scenario()) {
        let mut sut: SyncChainTable<i32> = SyncChainTable::new(3);
        let mut model: HashMap<String, i32> = HashMap::new();
        for op in ops {
            match op {
                OpI::Put(i, v) => {
                    let k = &pool[i];
                    prop_assert_eq!(Table::put(&mut sut, k, v), model.insert(k.clone(), v));
                }
                OpI::Get(i) | OpI::Mutate(i, _) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.get_cloned(k), model.get(k).copied());
                }
                OpI::Remove(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(Table::remove(&mut sut, k), model.remove(k));
                }
                OpI::Contains(s) => {
                    prop_assert_eq!(Table::contains_key(&sut, &s), model.contains_key(&s));
                }
                OpI::Iterate => {
                    let snap: BTreeMap<String, i32> = sut.snapshot().into_iter().collect();
                    let expected: BTreeMap<String, i32> =
                        model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                    prop_assert_eq!(snap, expected);
                }
            }
            prop_assert_eq!(Table::size(&sut), model.len());
        }
    }
}
