//! Canonical type signatures
//!
//! The signature is the canonical textual form of a type, used for
//! display and as an equality/cache key. Rendering is deterministic and
//! compositional:
//!
//! - scalar kinds render as their keyword,
//! - parameterized kinds wrap their parameters (`stream<int, Err>`,
//!   `map<string, int>`, `int[]`),
//! - records list fields in declaration order, with a trailing `...` for
//!   open records,
//! - union members are sorted after rendering, so the signature of an
//!   unordered construct is order-independent,
//! - nominal types render as their module-qualified name,
//! - an anonymous node already on the current rendering stack becomes the
//!   `...` placeholder, which makes signatures of cyclic types finite.

use crate::{ModuleId, TypeContext, TypeData, TypeId, TypeSymbol};

/// Render a symbol's signature, caching complete renderings on the view
///
/// `cycle_hit` reports whether the rendering below this point contains a
/// cycle placeholder; such renderings depend on the enclosing stack and
/// are only cached at the stack root, where they are canonical.
pub(crate) fn render(
    cx: &TypeContext,
    sym: &TypeSymbol,
    visited: &mut Vec<TypeId>,
    cycle_hit: &mut bool,
) -> String {
    // A cached rendering may contain a placeholder that is relative to
    // its own stack, so it is only reused at a stack root.
    if visited.is_empty() {
        if let Some(cached) = sym.signature.get() {
            return cached.clone();
        }
    }

    // Nominal types render as their qualified name and never recurse
    if let Some(name) = &sym.name {
        let rendered = qualified(sym.module.as_ref(), name);
        return sym.signature.get_or_init(|| rendered).clone();
    }

    if visited.contains(&sym.id) {
        *cycle_hit = true;
        return "...".to_string();
    }

    visited.push(sym.id);
    let mut local_hit = false;
    let rendered = render_structure(cx, sym, visited, &mut local_hit);
    visited.pop();

    if local_hit {
        *cycle_hit = true;
    }
    if !local_hit || visited.is_empty() {
        sym.signature.get_or_init(|| rendered).clone()
    } else {
        rendered
    }
}

fn qualified(module: Option<&ModuleId>, name: &str) -> String {
    match module {
        Some(module) => format!("{module}:{name}"),
        None => name.to_string(),
    }
}

fn child(
    cx: &TypeContext,
    sym: &TypeSymbol,
    id: TypeId,
    visited: &mut Vec<TypeId>,
    cycle_hit: &mut bool,
) -> String {
    let view = cx.resolve(sym.module.as_ref(), id);
    render(cx, &view, visited, cycle_hit)
}

fn render_structure(
    cx: &TypeContext,
    sym: &TypeSymbol,
    visited: &mut Vec<TypeId>,
    hit: &mut bool,
) -> String {
    match cx.arena().node(sym.id).data() {
        TypeData::Scalar => sym.type_tag().keyword().to_string(),

        TypeData::Array { element } => {
            format!("{}[]", child(cx, sym, *element, visited, hit))
        }

        TypeData::Map { key, value } => format!(
            "map<{}, {}>",
            child(cx, sym, *key, visited, hit),
            child(cx, sym, *value, visited, hit)
        ),

        TypeData::Record { fields, open } => {
            let mut parts: Vec<String> = fields
                .iter()
                .map(|(name, ty)| format!("{}: {}", name, child(cx, sym, *ty, visited, hit)))
                .collect();
            if *open {
                parts.push("...".to_string());
            }
            if parts.is_empty() {
                "record { }".to_string()
            } else {
                format!("record {{ {} }}", parts.join(", "))
            }
        }

        TypeData::Tuple { members } => {
            let parts: Vec<String> = members
                .iter()
                .map(|ty| child(cx, sym, *ty, visited, hit))
                .collect();
            format!("[{}]", parts.join(", "))
        }

        TypeData::Union { members } => {
            let mut parts: Vec<String> = members
                .iter()
                .map(|ty| child(cx, sym, *ty, visited, hit))
                .collect();
            parts.sort();
            parts.dedup();
            format!("({})", parts.join("|"))
        }

        TypeData::Function { params, ret } => {
            let parts: Vec<String> = params
                .iter()
                .map(|ty| child(cx, sym, *ty, visited, hit))
                .collect();
            format!(
                "function({}) -> {}",
                parts.join(", "),
                child(cx, sym, *ret, visited, hit)
            )
        }

        TypeData::Error { detail } => match detail {
            None => "error".to_string(),
            Some(detail) => format!("error<{}>", child(cx, sym, *detail, visited, hit)),
        },

        TypeData::Stream { value, completion } => {
            let value = child(cx, sym, *value, visited, hit);
            match completion {
                None => format!("stream<{value}>"),
                Some(completion) => format!(
                    "stream<{}, {}>",
                    value,
                    child(cx, sym, *completion, visited, hit)
                ),
            }
        }

        TypeData::Table { row } => {
            format!("table<{}>", child(cx, sym, *row, visited, hit))
        }

        // Reference nodes are nominal by construction and rendered above;
        // fall through to the referent for robustness.
        TypeData::Ref { target } => child(cx, sym, *target, visited, hit),
    }
}

#[cfg(test)]
mod tests {
    use crate::{TypeArena, TypeContext, TypeData, TypeTag};
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scalar_signatures() {
        let mut arena = TypeArena::new();
        let int = arena.int();
        let nil = arena.nil();
        let cx = TypeContext::new(arena);

        assert_eq!(cx.signature_of(int), "int");
        assert_eq!(cx.signature_of(nil), "()");
    }

    #[test]
    fn test_composite_signatures() {
        let mut arena = TypeArena::new();
        let int = arena.int();
        let string = arena.string();
        let bytes = arena.byte();
        let arr = arena.array(bytes);
        let map = arena.map(string, int);
        let tup = arena.tuple([int, string]);
        let fun = arena.function([int, string], arr);
        let cx = TypeContext::new(arena);

        assert_eq!(cx.signature_of(arr), "byte[]");
        assert_eq!(cx.signature_of(map), "map<string, int>");
        assert_eq!(cx.signature_of(tup), "[int, string]");
        assert_eq!(cx.signature_of(fun), "function(int, string) -> byte[]");
    }

    #[test]
    fn test_record_signatures() {
        let mut arena = TypeArena::new();
        let int = arena.int();
        let string = arena.string();
        let mut fields = IndexMap::new();
        fields.insert("id".to_string(), int);
        fields.insert("name".to_string(), string);
        let closed = arena.record(fields.clone(), false);
        let open = arena.record(fields, true);
        let cx = TypeContext::new(arena);

        assert_eq!(cx.signature_of(closed), "record { id: int, name: string }");
        assert_eq!(
            cx.signature_of(open),
            "record { id: int, name: string, ... }"
        );
    }

    #[test]
    fn test_union_signature_order_independent() {
        let mut arena = TypeArena::new();
        let int = arena.int();
        let string = arena.string();
        let a = arena.union([int, string]).unwrap();
        let b = arena.union([string, int]).unwrap();
        let cx = TypeContext::new(arena);

        assert_eq!(cx.signature_of(a), "(int|string)");
        assert_eq!(cx.signature_of(a), cx.signature_of(b));
    }

    #[test]
    fn test_nominal_rendering() {
        use crate::ModuleId;

        let mut arena = TypeArena::new();
        let int = arena.int();
        let alias = arena.type_ref("Count", Some(ModuleId::new("acme", "math")), int);
        let cx = TypeContext::new(arena);

        assert_eq!(cx.signature_of(alias), "acme/math:Count");
    }

    #[test]
    fn test_cyclic_record_signature_finite() {
        let mut arena = TypeArena::new();
        let int = arena.int();
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
            .unwrap();
        let cx = TypeContext::new(arena);

        assert_eq!(
            cx.signature_of(node),
            "record { value: int, next: ... }"
        );
    }

    #[test]
    fn test_signature_idempotent_without_new_resolution() {
        let mut arena = TypeArena::new();
        let int = arena.int();
        let err = arena.named_error("Err", None, None);
        let stream = arena.stream(int, Some(err));
        let cx = TypeContext::new(arena);

        let symbol = cx.resolve(None, stream);
        let first = symbol.signature(&cx);
        let resolutions = cx.resolutions();
        let second = symbol.signature(&cx);

        assert_eq!(first, second);
        assert_eq!(cx.resolutions(), resolutions);
    }
}
