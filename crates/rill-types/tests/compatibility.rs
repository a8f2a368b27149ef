//! Equivalence and assignability properties
//!
//! Pins the algebraic properties the rest of the system relies on:
//! reflexivity, symmetry, cyclic termination, and the coherence between
//! canonical signatures and structural equivalence over a generated
//! corpus of anonymous types.

use indexmap::IndexMap;
use proptest::prelude::*;
use rill_types::{
    assignable, equivalent, TypeArena, TypeContext, TypeData, TypeId, TypeTag,
};
use rstest::rstest;

fn point(arena: &mut TypeArena, open: bool, extra_field: bool) -> TypeId {
    let int = arena.int();
    let mut fields = IndexMap::new();
    fields.insert("x".to_string(), int);
    fields.insert("y".to_string(), int);
    if extra_field {
        let string = arena.string();
        fields.insert("label".to_string(), string);
    }
    arena.record(fields, open)
}

#[test]
fn equivalence_is_reflexive_and_symmetric() {
    let mut arena = TypeArena::new();
    let int = arena.int();
    let string = arena.string();
    let samples = vec![
        int,
        arena.array(int),
        arena.map(string, int),
        arena.union([int, string]).unwrap(),
        arena.stream(int, None),
        point(&mut arena, true, false),
    ];

    for &a in &samples {
        assert!(equivalent(&arena, a, a));
        assert!(assignable(&arena, a, a));
        for &b in &samples {
            assert_eq!(equivalent(&arena, a, b), equivalent(&arena, b, a));
        }
    }
}

#[rstest]
// Width subtyping: extra fields flow into an open target
#[case(true, true, true, false, true)]
// Closed target rejects an open source
#[case(true, false, false, false, false)]
// Closed source with exactly the target's fields into a closed target
#[case(false, false, false, false, true)]
// Closed source with extra fields into a closed target of fewer fields
#[case(false, true, false, false, false)]
fn record_openness_policy(
    #[case] source_open: bool,
    #[case] source_extra: bool,
    #[case] target_open: bool,
    #[case] target_extra: bool,
    #[case] expected: bool,
) {
    let mut arena = TypeArena::new();
    let source = point(&mut arena, source_open, source_extra);
    let target = point(&mut arena, target_open, target_extra);
    assert_eq!(assignable(&arena, source, target), expected);
}

#[test]
fn cyclic_record_checks_terminate() {
    let mut arena = TypeArena::new();
    let int = arena.int();

    // Two separately built self-referential list nodes
    let make = |arena: &mut TypeArena| {
        let node = arena.reserve();
        let mut fields = IndexMap::new();
        fields.insert("value".to_string(), int);
        fields.insert("next".to_string(), node);
        arena
            .define(
                node,
                TypeTag::Record,
                None,
                None,
                TypeData::Record {
                    fields,
                    open: false,
                },
            )
            .unwrap()
    };
    let a = make(&mut arena);
    let b = make(&mut arena);

    assert!(equivalent(&arena, a, a));
    assert!(assignable(&arena, a, a));
    // Structurally identical cycles hold co-inductively
    assert!(equivalent(&arena, a, b));
    assert!(assignable(&arena, a, b));
}

#[test]
fn mutually_recursive_records_terminate() {
    let mut arena = TypeArena::new();
    let ping = arena.reserve();
    let pong = arena.reserve();

    let mut ping_fields = IndexMap::new();
    ping_fields.insert("other".to_string(), pong);
    arena
        .define(
            ping,
            TypeTag::Record,
            None,
            None,
            TypeData::Record {
                fields: ping_fields,
                open: false,
            },
        )
        .unwrap();

    let mut pong_fields = IndexMap::new();
    pong_fields.insert("other".to_string(), ping);
    arena
        .define(
            pong,
            TypeTag::Record,
            None,
            None,
            TypeData::Record {
                fields: pong_fields,
                open: false,
            },
        )
        .unwrap();

    assert!(equivalent(&arena, ping, pong));

    let cx = TypeContext::new(arena);
    // Finite signatures for both roots of the cycle
    assert_eq!(
        cx.signature_of(ping),
        "record { other: record { other: ... } }"
    );
    assert_eq!(cx.signature_of(ping), cx.signature_of(pong));
}

// === Signature / equivalence coherence over a generated corpus ===

/// Anonymous structural type shapes; lowered into an arena per test case
#[derive(Debug, Clone)]
enum Shape {
    Int,
    Float,
    String,
    Boolean,
    Array(Box<Shape>),
    Map(Box<Shape>, Box<Shape>),
    Record(Vec<(String, Shape)>, bool),
    Tuple(Vec<Shape>),
    Union(Vec<Shape>),
    Function(Vec<Shape>, Box<Shape>),
    Stream(Box<Shape>, Option<Box<Shape>>),
}

fn lower(arena: &mut TypeArena, shape: &Shape) -> TypeId {
    match shape {
        Shape::Int => arena.int(),
        Shape::Float => arena.float(),
        Shape::String => arena.string(),
        Shape::Boolean => arena.boolean(),
        Shape::Array(element) => {
            let element = lower(arena, element);
            arena.array(element)
        }
        Shape::Map(key, value) => {
            let key = lower(arena, key);
            let value = lower(arena, value);
            arena.map(key, value)
        }
        Shape::Record(fields, open) => {
            let mut lowered = IndexMap::new();
            for (name, shape) in fields {
                let ty = lower(arena, shape);
                lowered.insert(name.clone(), ty);
            }
            arena.record(lowered, *open)
        }
        Shape::Tuple(members) => {
            let members: Vec<TypeId> = members.iter().map(|m| lower(arena, m)).collect();
            arena.tuple(members)
        }
        Shape::Union(members) => {
            let members: Vec<TypeId> = members.iter().map(|m| lower(arena, m)).collect();
            arena.union(members).unwrap()
        }
        Shape::Function(params, ret) => {
            let params: Vec<TypeId> = params.iter().map(|p| lower(arena, p)).collect();
            let ret = lower(arena, ret);
            arena.function(params, ret)
        }
        Shape::Stream(value, completion) => {
            let value = lower(arena, value);
            let completion = completion.as_ref().map(|c| lower(arena, c));
            arena.stream(value, completion)
        }
    }
}

fn shape_strategy() -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![
        Just(Shape::Int),
        Just(Shape::Float),
        Just(Shape::String),
        Just(Shape::Boolean),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        let field_name = prop_oneof![Just("a"), Just("b"), Just("c")];
        prop_oneof![
            inner.clone().prop_map(|s| Shape::Array(Box::new(s))),
            (inner.clone(), inner.clone())
                .prop_map(|(k, v)| Shape::Map(Box::new(k), Box::new(v))),
            (
                prop::collection::vec((field_name, inner.clone()), 0..3),
                any::<bool>()
            )
                .prop_map(|(fields, open)| {
                    // Canonical declaration order, so signature and
                    // name-based equivalence agree over the corpus
                    let mut fields: Vec<(String, Shape)> = fields
                        .into_iter()
                        .map(|(name, shape)| (name.to_string(), shape))
                        .collect();
                    fields.sort_by(|a, b| a.0.cmp(&b.0));
                    fields.dedup_by(|a, b| a.0 == b.0);
                    Shape::Record(fields, open)
                }),
            prop::collection::vec(inner.clone(), 0..3).prop_map(Shape::Tuple),
            prop::collection::vec(inner.clone(), 1..3).prop_map(Shape::Union),
            (prop::collection::vec(inner.clone(), 0..3), inner.clone())
                .prop_map(|(params, ret)| Shape::Function(params, Box::new(ret))),
            (inner.clone(), prop::option::of(inner))
                .prop_map(|(v, c)| Shape::Stream(Box::new(v), c.map(Box::new))),
        ]
    })
}

proptest! {
    /// Two lowerings of the same shape are equivalent and share a signature
    #[test]
    fn same_shape_is_equivalent(shape in shape_strategy()) {
        let mut arena = TypeArena::new();
        let a = lower(&mut arena, &shape);
        let b = lower(&mut arena, &shape);

        prop_assert!(equivalent(&arena, a, b));
        prop_assert!(assignable(&arena, a, b));

        let cx = TypeContext::new(arena);
        prop_assert_eq!(cx.signature_of(a), cx.signature_of(b));
    }

    /// Signatures coincide exactly when shapes are structurally equivalent
    #[test]
    fn signature_coheres_with_equivalence(
        a in shape_strategy(),
        b in shape_strategy(),
    ) {
        let mut arena = TypeArena::new();
        let a = lower(&mut arena, &a);
        let b = lower(&mut arena, &b);

        let equal = equivalent(&arena, a, b);
        let cx = TypeContext::new(arena);
        prop_assert_eq!(cx.signature_of(a) == cx.signature_of(b), equal);
    }
}
