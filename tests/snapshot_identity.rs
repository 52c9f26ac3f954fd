use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher as _};
use std::sync::Arc;

use resolution_core::snapshot::{
    HashCode, Hashable, Hasher, ManagedValueSnapshot, SnapshotKind, StructuralSnapshot,
    ValueSnapshot,
};

fn h(s: &str) -> HashCode {
    s.content_hash()
}

fn std_hash<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

fn managed(children: Vec<HashCode>) -> StructuralSnapshot<HashCode> {
    StructuralSnapshot::new(SnapshotKind::Managed, children)
}

#[test]
fn scenario_same_children_are_equal_and_hash_equal() {
    let a = managed(vec![h("a"), h("b")]);
    let b = managed(vec![h("a"), h("b")]);
    let reversed = managed(vec![h("b"), h("a")]);

    assert_eq!(a, b);
    assert_eq!(std_hash(&a), std_hash(&b));
    assert_eq!(a.content_hash(), b.content_hash());

    assert_ne!(a, reversed);
    assert_ne!(b, reversed);
    assert_ne!(a.content_hash(), reversed.content_hash());
}

#[test]
fn invariant_kind_takes_part_in_equality() {
    let mutable = StructuralSnapshot::new(SnapshotKind::Managed, vec![h("a")]);
    let immutable = StructuralSnapshot::new(SnapshotKind::ImmutableManaged, vec![h("a")]);

    assert_ne!(mutable, immutable);
}

#[test]
fn invariant_hash_depends_on_children_only() {
    let mutable = StructuralSnapshot::new(SnapshotKind::Managed, vec![h("a"), h("b")]);
    let immutable = StructuralSnapshot::new(SnapshotKind::ImmutableManaged, vec![h("a"), h("b")]);

    assert_eq!(std_hash(&mutable), std_hash(&immutable));
    assert_eq!(mutable.content_hash(), immutable.content_hash());
}

#[test]
fn length_mismatch_is_not_equal() {
    let short = managed(vec![h("a")]);
    let long = managed(vec![h("a"), h("b")]);

    assert_ne!(short, long);
    assert_ne!(short.content_hash(), long.content_hash());
}

#[test]
fn empty_snapshot_hashes_to_empty_composition() {
    let empty: StructuralSnapshot<HashCode> = managed(Vec::new());

    assert!(empty.is_empty());
    assert_eq!(empty.content_hash(), Hasher::new().finish());
    assert_eq!(empty, managed(Vec::new()));
}

#[test]
fn contribution_is_the_children_fed_in_order() {
    let snapshot = managed(vec![h("x"), h("y"), h("z")]);

    let mut expected = Hasher::new();
    h("x").append_to_hasher(&mut expected);
    h("y").append_to_hasher(&mut expected);
    h("z").append_to_hasher(&mut expected);

    assert_eq!(snapshot.content_hash(), expected.finish());
}

#[test]
fn snapshots_compose_into_parent_snapshots() {
    let left = managed(vec![h("a")]);
    let right = managed(vec![h("b")]);

    let parent = managed(vec![left.content_hash(), right.content_hash()]);
    let swapped = managed(vec![right.content_hash(), left.content_hash()]);
    assert_ne!(parent.content_hash(), swapped.content_hash());

    let nested = StructuralSnapshot::new(SnapshotKind::Managed, vec![left.clone(), right.clone()]);
    let nested_again = StructuralSnapshot::new(SnapshotKind::Managed, vec![left, right]);
    assert_eq!(nested, nested_again);
    assert_eq!(nested.content_hash(), nested_again.content_hash());
}

#[test]
fn shared_children_behave_like_owned_children() {
    let shared = Arc::new(h("a"));
    let via_arc = StructuralSnapshot::new(SnapshotKind::Managed, vec![Arc::clone(&shared)]);
    let owned = managed(vec![h("a")]);

    assert_eq!(via_arc.content_hash(), owned.content_hash());
}

#[test]
fn snapshots_work_as_map_keys() {
    let mut cache: HashMap<StructuralSnapshot<HashCode>, &str> = HashMap::new();
    cache.insert(managed(vec![h("a"), h("b")]), "hit");

    assert_eq!(cache.get(&managed(vec![h("a"), h("b")])), Some(&"hit"));
    assert_eq!(cache.get(&managed(vec![h("b"), h("a")])), None);
    assert_eq!(
        cache.get(&StructuralSnapshot::new(
            SnapshotKind::ImmutableManaged,
            vec![h("a"), h("b")]
        )),
        None
    );
}

#[test]
fn managed_values_differ_by_kind_type_and_fields() {
    let fields = || vec![ValueSnapshot::from("main"), ValueSnapshot::from(3i32)];

    let base = ManagedValueSnapshot::new("com.example.Settings", fields());
    let same = ManagedValueSnapshot::new("com.example.Settings", fields());
    let immutable = ManagedValueSnapshot::immutable("com.example.Settings", fields());
    let other_type = ManagedValueSnapshot::new("com.example.Other", fields());

    assert_eq!(base, same);
    assert_eq!(base.content_hash(), same.content_hash());
    assert_eq!(base.kind(), SnapshotKind::Managed);
    assert_eq!(immutable.kind(), SnapshotKind::ImmutableManaged);
    assert_eq!(base.fields().len(), 2);

    assert_ne!(base, immutable);
    assert_ne!(base.content_hash(), immutable.content_hash());
    assert_ne!(base, other_type);
    assert_ne!(base.content_hash(), other_type.content_hash());
}

#[test]
fn nested_managed_values_stay_distinguishable() {
    // Same flattened leaves, different nesting.
    let inner_two = ManagedValueSnapshot::new(
        "Inner",
        vec![ValueSnapshot::from("a"), ValueSnapshot::from("b")],
    );
    let outer_a = ManagedValueSnapshot::new("Outer", vec![inner_two.into()]);

    let inner_one = ManagedValueSnapshot::new("Inner", vec![ValueSnapshot::from("a")]);
    let outer_b = ManagedValueSnapshot::new(
        "Outer",
        vec![inner_one.into(), ValueSnapshot::from("b")],
    );

    assert_ne!(outer_a.content_hash(), outer_b.content_hash());
}

#[test]
fn snapshots_are_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<StructuralSnapshot<HashCode>>();
    assert_send_sync::<ValueSnapshot>();
    assert_send_sync::<ManagedValueSnapshot>();

    let snapshot = Arc::new(managed(vec![h("a"), h("b")]));
    let expected = snapshot.content_hash();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let snapshot = Arc::clone(&snapshot);
            std::thread::spawn(move || snapshot.content_hash())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
