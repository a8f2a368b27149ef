//! Structural equivalence and assignability
//!
//! Both checks are total boolean functions over well-formed graphs;
//! malformed nodes are rejected at construction, so there are no error
//! outcomes here. Recursion over cyclic graphs is guarded by a per-call
//! visited-pair set: a pair encountered while it is still being decided
//! holds co-inductively.
//!
//! Dispatch is a single exhaustive match per check, so a new structural
//! kind cannot be added without both checks taking a position on it.

use crate::{TypeArena, TypeData, TypeId};
use std::collections::HashSet;

/// Check whether two types are structurally interchangeable
pub fn equivalent(arena: &TypeArena, a: TypeId, b: TypeId) -> bool {
    equivalent_inner(arena, a, b, &mut HashSet::new())
}

/// Check whether values of `source` can be used where `target` is expected
pub fn assignable(arena: &TypeArena, source: TypeId, target: TypeId) -> bool {
    assignable_inner(arena, source, target, &mut HashSet::new())
}

fn equivalent_inner(
    arena: &TypeArena,
    a: TypeId,
    b: TypeId,
    visited: &mut HashSet<(TypeId, TypeId)>,
) -> bool {
    let a = arena.resolve_ref(a);
    let b = arena.resolve_ref(b);
    if a == b {
        return true;
    }
    if arena.tag_of(a) != arena.tag_of(b) {
        return false;
    }
    if !visited.insert((a, b)) {
        return true;
    }

    // Tags are equal, so the counterpart extraction below only fails for
    // a genuinely different shape behind the same tag.
    match arena.node(a).data() {
        TypeData::Scalar => true,

        TypeData::Array { element: ea } => {
            let TypeData::Array { element: eb } = arena.node(b).data() else {
                return false;
            };
            equivalent_inner(arena, *ea, *eb, visited)
        }

        TypeData::Map { key: ka, value: va } => {
            let TypeData::Map { key: kb, value: vb } = arena.node(b).data() else {
                return false;
            };
            equivalent_inner(arena, *ka, *kb, visited)
                && equivalent_inner(arena, *va, *vb, visited)
        }

        TypeData::Record {
            fields: fa,
            open: oa,
        } => {
            let TypeData::Record {
                fields: fb,
                open: ob,
            } = arena.node(b).data()
            else {
                return false;
            };
            oa == ob
                && fa.len() == fb.len()
                && fa.iter().all(|(name, ta)| {
                    fb.get(name)
                        .is_some_and(|tb| equivalent_inner(arena, *ta, *tb, visited))
                })
        }

        TypeData::Tuple { members: ma } => {
            let TypeData::Tuple { members: mb } = arena.node(b).data() else {
                return false;
            };
            ma.len() == mb.len()
                && ma
                    .iter()
                    .zip(mb.iter())
                    .all(|(ta, tb)| equivalent_inner(arena, *ta, *tb, visited))
        }

        // Unions are unordered sets: mutual member coverage
        TypeData::Union { members: ma } => {
            let TypeData::Union { members: mb } = arena.node(b).data() else {
                return false;
            };
            ma.iter().all(|ta| {
                mb.iter()
                    .any(|tb| equivalent_inner(arena, *ta, *tb, visited))
            }) && mb.iter().all(|tb| {
                ma.iter()
                    .any(|ta| equivalent_inner(arena, *ta, *tb, visited))
            })
        }

        TypeData::Function {
            params: pa,
            ret: ra,
        } => {
            let TypeData::Function {
                params: pb,
                ret: rb,
            } = arena.node(b).data()
            else {
                return false;
            };
            pa.len() == pb.len()
                && pa
                    .iter()
                    .zip(pb.iter())
                    .all(|(ta, tb)| equivalent_inner(arena, *ta, *tb, visited))
                && equivalent_inner(arena, *ra, *rb, visited)
        }

        TypeData::Error { detail: da } => {
            let TypeData::Error { detail: db } = arena.node(b).data() else {
                return false;
            };
            optional_equivalent(arena, *da, *db, visited)
        }

        TypeData::Stream {
            value: va,
            completion: ca,
        } => {
            let TypeData::Stream {
                value: vb,
                completion: cb,
            } = arena.node(b).data()
            else {
                return false;
            };
            equivalent_inner(arena, *va, *vb, visited)
                && optional_equivalent(arena, *ca, *cb, visited)
        }

        TypeData::Table { row: ra } => {
            let TypeData::Table { row: rb } = arena.node(b).data() else {
                return false;
            };
            equivalent_inner(arena, *ra, *rb, visited)
        }

        // References were resolved away above
        TypeData::Ref { target } => equivalent_inner(arena, *target, b, visited),
    }
}

/// Absent is a distinguished bottom: equivalent only to absent
fn optional_equivalent(
    arena: &TypeArena,
    a: Option<TypeId>,
    b: Option<TypeId>,
    visited: &mut HashSet<(TypeId, TypeId)>,
) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => equivalent_inner(arena, a, b, visited),
        _ => false,
    }
}

fn assignable_inner(
    arena: &TypeArena,
    source: TypeId,
    target: TypeId,
    visited: &mut HashSet<(TypeId, TypeId)>,
) -> bool {
    let source = arena.resolve_ref(source);
    let target = arena.resolve_ref(target);
    if source == target {
        return true;
    }
    if !visited.insert((source, target)) {
        return true;
    }

    // A union target accepts a source matching any member; checked before
    // the main dispatch so every non-union source benefits.
    let target_union_accepts = |visited: &mut HashSet<(TypeId, TypeId)>| {
        if let TypeData::Union { members } = arena.node(target).data() {
            members
                .iter()
                .any(|m| assignable_inner(arena, source, *m, visited))
        } else {
            false
        }
    };

    match arena.node(source).data() {
        TypeData::Scalar => {
            if arena.tag_of(source) == arena.tag_of(target) {
                true
            } else {
                target_union_accepts(visited)
            }
        }

        // A union source needs every member accepted
        TypeData::Union { members } => members
            .iter()
            .all(|m| assignable_inner(arena, *m, target, visited)),

        // Covariant element
        TypeData::Array { element: es } => {
            if let TypeData::Array { element: et } = arena.node(target).data() {
                assignable_inner(arena, *es, *et, visited)
            } else {
                target_union_accepts(visited)
            }
        }

        TypeData::Map { key: ks, value: vs } => {
            if let TypeData::Map { key: kt, value: vt } = arena.node(target).data() {
                assignable_inner(arena, *ks, *kt, visited)
                    && assignable_inner(arena, *vs, *vt, visited)
            } else {
                target_union_accepts(visited)
            }
        }

        // Width/depth subtyping; a closed target demands a closed source
        // with no fields beyond its own.
        TypeData::Record {
            fields: fs,
            open: os,
        } => {
            if let TypeData::Record {
                fields: ft,
                open: ot,
            } = arena.node(target).data()
            {
                let width_depth = ft.iter().all(|(name, tt)| {
                    fs.get(name)
                        .is_some_and(|ts| assignable_inner(arena, *ts, *tt, visited))
                });
                width_depth
                    && (*ot || (!*os && fs.keys().all(|name| ft.contains_key(name))))
            } else {
                target_union_accepts(visited)
            }
        }

        TypeData::Tuple { members: ms } => {
            if let TypeData::Tuple { members: mt } = arena.node(target).data() {
                ms.len() == mt.len()
                    && ms
                        .iter()
                        .zip(mt.iter())
                        .all(|(ts, tt)| assignable_inner(arena, *ts, *tt, visited))
            } else {
                target_union_accepts(visited)
            }
        }

        // Contravariant parameters, covariant return, matching arity
        TypeData::Function {
            params: ps,
            ret: rs,
        } => {
            if let TypeData::Function {
                params: pt,
                ret: rt,
            } = arena.node(target).data()
            {
                ps.len() == pt.len()
                    && ps
                        .iter()
                        .zip(pt.iter())
                        .all(|(s, t)| assignable_inner(arena, *t, *s, visited))
                    && assignable_inner(arena, *rs, *rt, visited)
            } else {
                target_union_accepts(visited)
            }
        }

        TypeData::Error { detail: ds } => {
            if let TypeData::Error { detail: dt } = arena.node(target).data() {
                optional_assignable(arena, *ds, *dt, visited)
            } else {
                target_union_accepts(visited)
            }
        }

        TypeData::Stream {
            value: vs,
            completion: cs,
        } => {
            if let TypeData::Stream {
                value: vt,
                completion: ct,
            } = arena.node(target).data()
            {
                assignable_inner(arena, *vs, *vt, visited)
                    && optional_assignable(arena, *cs, *ct, visited)
            } else {
                target_union_accepts(visited)
            }
        }

        TypeData::Table { row: rs } => {
            if let TypeData::Table { row: rt } = arena.node(target).data() {
                assignable_inner(arena, *rs, *rt, visited)
            } else {
                target_union_accepts(visited)
            }
        }

        // References were resolved away above
        TypeData::Ref { target: referent } => {
            assignable_inner(arena, *referent, target, visited)
        }
    }
}

/// Absent is a distinguished bottom: assignable to anything, nothing
/// assignable to it but itself
fn optional_assignable(
    arena: &TypeArena,
    source: Option<TypeId>,
    target: Option<TypeId>,
    visited: &mut HashSet<(TypeId, TypeId)>,
) -> bool {
    match (source, target) {
        (None, _) => true,
        (Some(s), Some(t)) => assignable_inner(arena, s, t, visited),
        (Some(_), None) => false,
    }
}
