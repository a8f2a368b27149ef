//! The type graph
//!
//! Types are immutable nodes in a [`TypeArena`], addressed by stable
//! [`TypeId`] handles. A node owns its structural children as handles, so
//! recursive and mutually-referential definitions share nodes by identity
//! instead of expanding into copies, and handle equality gives cheap cycle
//! detection.
//!
//! Structural fields are set exactly once: either at [`TypeArena::insert`]
//! time, or through [`TypeArena::reserve`] / [`TypeArena::define`] for
//! definitions that need to refer to themselves before they are complete.

use crate::{TypeModelError, TypeModelResult, TypeTag};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::ops::Index;

/// Handle of a node in a [`TypeArena`]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TypeId(u32);

impl TypeId {
    /// Position of the node in its arena
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Module-qualified identity for nominal types
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleId {
    /// Organization name
    pub org: String,
    /// Module name
    pub name: String,
}

impl ModuleId {
    /// Create a new module identity
    pub fn new(org: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            org: org.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.org, self.name)
    }
}

/// Short list of type handles
pub type TypeList = SmallVec<[TypeId; 4]>;

/// Structural data of a node
///
/// The node's tag fully determines which variant is meaningful;
/// [`TypeArena::insert`] rejects mismatches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeData {
    /// Scalar kinds carry no structural children
    Scalar,
    /// Array element type
    Array { element: TypeId },
    /// Map key and value types
    Map { key: TypeId, value: TypeId },
    /// Record fields in declaration order, plus the openness policy flag
    Record {
        fields: IndexMap<String, TypeId>,
        open: bool,
    },
    /// Tuple members in positional order
    Tuple { members: TypeList },
    /// Union members (an unordered set)
    Union { members: TypeList },
    /// Function parameters and return type
    Function { params: TypeList, ret: TypeId },
    /// Error detail type, when the error carries one
    Error { detail: Option<TypeId> },
    /// Stream value type and optional completion type
    Stream {
        value: TypeId,
        completion: Option<TypeId>,
    },
    /// Table row type
    Table { row: TypeId },
    /// Non-owning reference to another node, resolved by identity
    Ref { target: TypeId },
}

impl TypeData {
    /// Check whether this data variant is the one the tag calls for
    pub fn matches(&self, tag: TypeTag) -> bool {
        match (tag, self) {
            (t, Self::Scalar) => t.is_scalar(),
            (TypeTag::Array, Self::Array { .. }) => true,
            (TypeTag::Map, Self::Map { .. }) => true,
            (TypeTag::Record, Self::Record { .. }) => true,
            (TypeTag::Tuple, Self::Tuple { .. }) => true,
            (TypeTag::Union, Self::Union { .. }) => true,
            (TypeTag::Function, Self::Function { .. }) => true,
            (TypeTag::Error, Self::Error { .. }) => true,
            (TypeTag::Stream, Self::Stream { .. }) => true,
            (TypeTag::Table, Self::Table { .. }) => true,
            (TypeTag::TypeRef, Self::Ref { .. }) => true,
            _ => false,
        }
    }

    /// Short name of the variant, for error messages
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Array { .. } => "array",
            Self::Map { .. } => "map",
            Self::Record { .. } => "record",
            Self::Tuple { .. } => "tuple",
            Self::Union { .. } => "union",
            Self::Function { .. } => "function",
            Self::Error { .. } => "error",
            Self::Stream { .. } => "stream",
            Self::Table { .. } => "table",
            Self::Ref { .. } => "reference",
        }
    }
}

/// An immutable node in the type graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeNode {
    tag: TypeTag,
    name: Option<String>,
    module: Option<ModuleId>,
    data: TypeData,
}

impl TypeNode {
    /// The node's structural kind
    pub fn tag(&self) -> TypeTag {
        self.tag
    }

    /// Name of the node, present for nominal types
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Owning module of the node, present for nominal types
    pub fn module(&self) -> Option<&ModuleId> {
        self.module.as_ref()
    }

    /// The node's structural data
    pub fn data(&self) -> &TypeData {
        &self.data
    }
}

/// Arena owning every node of a compilation context's type graph
#[derive(Debug, Default)]
pub struct TypeArena {
    slots: Vec<Option<TypeNode>>,
}

impl TypeArena {
    /// Create an empty arena
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of reserved handles (defined or not)
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the arena holds no nodes
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Reserve a handle for a node defined later
    ///
    /// This is how self-referential definitions are built: reserve the
    /// handle, use it as a child of its own structural data, then
    /// [`define`](Self::define) it.
    pub fn reserve(&mut self) -> TypeId {
        let id = TypeId(self.slots.len() as u32);
        self.slots.push(None);
        id
    }

    /// Define a reserved handle, exactly once
    pub fn define(
        &mut self,
        id: TypeId,
        tag: TypeTag,
        name: Option<String>,
        module: Option<ModuleId>,
        data: TypeData,
    ) -> TypeModelResult<TypeId> {
        validate_shape(tag, &name, &data)?;
        let slot = &mut self.slots[id.index()];
        if slot.is_some() {
            return Err(TypeModelError::AlreadyDefined {
                index: id.0,
            });
        }
        *slot = Some(TypeNode {
            tag,
            name,
            module,
            data,
        });
        Ok(id)
    }

    /// Insert a new node, validating that the data matches the tag
    pub fn insert(
        &mut self,
        tag: TypeTag,
        name: Option<String>,
        module: Option<ModuleId>,
        data: TypeData,
    ) -> TypeModelResult<TypeId> {
        let id = self.reserve();
        self.define(id, tag, name, module, data)
    }

    /// Get the node for a handle
    ///
    /// Panics if the handle is reserved but not yet defined; a graph must
    /// be fully defined before it is queried.
    pub fn node(&self, id: TypeId) -> &TypeNode {
        &self[id]
    }

    /// The tag of a node
    pub fn tag_of(&self, id: TypeId) -> TypeTag {
        self[id].tag
    }

    /// The owned structural children of a node, empty for scalars
    pub fn children_of(&self, id: TypeId) -> TypeList {
        match self[id].data() {
            TypeData::Scalar => TypeList::new(),
            TypeData::Array { element } => [*element].into_iter().collect(),
            TypeData::Map { key, value } => [*key, *value].into_iter().collect(),
            TypeData::Record { fields, .. } => fields.values().copied().collect(),
            TypeData::Tuple { members } | TypeData::Union { members } => members.clone(),
            TypeData::Function { params, ret } => {
                let mut children = params.clone();
                children.push(*ret);
                children
            }
            TypeData::Error { detail } => detail.iter().copied().collect(),
            TypeData::Stream { value, completion } => {
                let mut children = TypeList::new();
                children.push(*value);
                children.extend(completion.iter().copied());
                children
            }
            TypeData::Table { row } => [*row].into_iter().collect(),
            TypeData::Ref { target } => [*target].into_iter().collect(),
        }
    }

    /// Follow reference nodes to the referent
    ///
    /// A cycle of references resolves to the first node revisited, so the
    /// call terminates on any graph.
    pub fn resolve_ref(&self, id: TypeId) -> TypeId {
        let mut seen: TypeList = TypeList::new();
        let mut current = id;
        while let TypeData::Ref { target } = self[current].data() {
            if seen.contains(&current) {
                break;
            }
            seen.push(current);
            current = *target;
        }
        current
    }

    // === Convenience constructors ===
    //
    // These build tag-consistent nodes directly and cannot fail shape
    // validation.

    fn alloc(
        &mut self,
        tag: TypeTag,
        name: Option<String>,
        module: Option<ModuleId>,
        data: TypeData,
    ) -> TypeId {
        let id = TypeId(self.slots.len() as u32);
        self.slots.push(Some(TypeNode {
            tag,
            name,
            module,
            data,
        }));
        id
    }

    fn scalar(&mut self, tag: TypeTag) -> TypeId {
        self.alloc(tag, None, None, TypeData::Scalar)
    }

    /// The nil type
    pub fn nil(&mut self) -> TypeId {
        self.scalar(TypeTag::Nil)
    }

    /// The boolean type
    pub fn boolean(&mut self) -> TypeId {
        self.scalar(TypeTag::Boolean)
    }

    /// The int type
    pub fn int(&mut self) -> TypeId {
        self.scalar(TypeTag::Int)
    }

    /// The float type
    pub fn float(&mut self) -> TypeId {
        self.scalar(TypeTag::Float)
    }

    /// The decimal type
    pub fn decimal(&mut self) -> TypeId {
        self.scalar(TypeTag::Decimal)
    }

    /// The string type
    pub fn string(&mut self) -> TypeId {
        self.scalar(TypeTag::String)
    }

    /// The byte type
    pub fn byte(&mut self) -> TypeId {
        self.scalar(TypeTag::Byte)
    }

    /// The json type
    pub fn json(&mut self) -> TypeId {
        self.scalar(TypeTag::Json)
    }

    /// The xml type
    pub fn xml(&mut self) -> TypeId {
        self.scalar(TypeTag::Xml)
    }

    /// An array of `element`
    pub fn array(&mut self, element: TypeId) -> TypeId {
        self.alloc(TypeTag::Array, None, None, TypeData::Array { element })
    }

    /// A map from `key` to `value`
    pub fn map(&mut self, key: TypeId, value: TypeId) -> TypeId {
        self.alloc(TypeTag::Map, None, None, TypeData::Map { key, value })
    }

    /// An anonymous record
    pub fn record(&mut self, fields: IndexMap<String, TypeId>, open: bool) -> TypeId {
        self.alloc(TypeTag::Record, None, None, TypeData::Record { fields, open })
    }

    /// A named record owned by a module
    pub fn named_record(
        &mut self,
        name: impl Into<String>,
        module: Option<ModuleId>,
        fields: IndexMap<String, TypeId>,
        open: bool,
    ) -> TypeId {
        self.alloc(
            TypeTag::Record,
            Some(name.into()),
            module,
            TypeData::Record { fields, open },
        )
    }

    /// A tuple of `members`
    pub fn tuple(&mut self, members: impl IntoIterator<Item = TypeId>) -> TypeId {
        let members = members.into_iter().collect();
        self.alloc(TypeTag::Tuple, None, None, TypeData::Tuple { members })
    }

    /// A union of `members`; fails on an empty member list
    pub fn union(
        &mut self,
        members: impl IntoIterator<Item = TypeId>,
    ) -> TypeModelResult<TypeId> {
        let members = members.into_iter().collect();
        self.insert(TypeTag::Union, None, None, TypeData::Union { members })
    }

    /// A function from `params` to `ret`
    pub fn function(
        &mut self,
        params: impl IntoIterator<Item = TypeId>,
        ret: TypeId,
    ) -> TypeId {
        let params = params.into_iter().collect();
        self.alloc(TypeTag::Function, None, None, TypeData::Function { params, ret })
    }

    /// An error with an optional detail type
    pub fn error_type(&mut self, detail: Option<TypeId>) -> TypeId {
        self.alloc(TypeTag::Error, None, None, TypeData::Error { detail })
    }

    /// A named error owned by a module
    pub fn named_error(
        &mut self,
        name: impl Into<String>,
        module: Option<ModuleId>,
        detail: Option<TypeId>,
    ) -> TypeId {
        self.alloc(
            TypeTag::Error,
            Some(name.into()),
            module,
            TypeData::Error { detail },
        )
    }

    /// A stream of `value`, optionally completing with `completion`
    pub fn stream(&mut self, value: TypeId, completion: Option<TypeId>) -> TypeId {
        self.alloc(TypeTag::Stream, None, None, TypeData::Stream { value, completion })
    }

    /// A table of `row` rows
    pub fn table(&mut self, row: TypeId) -> TypeId {
        self.alloc(TypeTag::Table, None, None, TypeData::Table { row })
    }

    /// A named reference to `target`
    pub fn type_ref(
        &mut self,
        name: impl Into<String>,
        module: Option<ModuleId>,
        target: TypeId,
    ) -> TypeId {
        self.alloc(
            TypeTag::TypeRef,
            Some(name.into()),
            module,
            TypeData::Ref { target },
        )
    }
}

impl Index<TypeId> for TypeArena {
    type Output = TypeNode;

    fn index(&self, id: TypeId) -> &TypeNode {
        match &self.slots[id.index()] {
            Some(node) => node,
            None => panic!("type handle {id} used before definition"),
        }
    }
}

fn validate_shape(
    tag: TypeTag,
    name: &Option<String>,
    data: &TypeData,
) -> TypeModelResult<()> {
    if !data.matches(tag) {
        return Err(TypeModelError::InvalidTypeShape {
            tag,
            detail: format!("given {} data", data.kind_name()),
        });
    }
    if let TypeData::Union { members } = data {
        if members.is_empty() {
            return Err(TypeModelError::InvalidTypeShape {
                tag,
                detail: "has no members".to_string(),
            });
        }
    }
    if matches!(data, TypeData::Ref { .. }) && name.is_none() {
        return Err(TypeModelError::InvalidTypeShape {
            tag,
            detail: "reference is unnamed".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TypeModelError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tag_stable_after_construction() {
        let mut arena = TypeArena::new();
        let int = arena.int();
        let stream = arena.stream(int, None);

        assert_eq!(arena.tag_of(stream), TypeTag::Stream);
        assert_eq!(arena.tag_of(stream), TypeTag::Stream);
        assert_eq!(arena.tag_of(int), TypeTag::Int);
    }

    #[test]
    fn test_invalid_shape_rejected() {
        let mut arena = TypeArena::new();
        let err = arena
            .insert(TypeTag::Array, None, None, TypeData::Scalar)
            .unwrap_err();
        assert!(matches!(
            err,
            TypeModelError::InvalidTypeShape {
                tag: TypeTag::Array,
                ..
            }
        ));
    }

    #[test]
    fn test_empty_union_rejected() {
        let mut arena = TypeArena::new();
        let err = arena.union([]).unwrap_err();
        assert!(matches!(err, TypeModelError::InvalidTypeShape { .. }));
    }

    #[test]
    fn test_define_exactly_once() {
        let mut arena = TypeArena::new();
        let id = arena.reserve();
        arena
            .define(id, TypeTag::Int, None, None, TypeData::Scalar)
            .unwrap();
        let err = arena
            .define(id, TypeTag::String, None, None, TypeData::Scalar)
            .unwrap_err();
        assert!(matches!(err, TypeModelError::AlreadyDefined { .. }));
    }

    #[test]
    fn test_self_referential_record() {
        let mut arena = TypeArena::new();
        let node = arena.reserve();
        let mut fields = IndexMap::new();
        fields.insert("value".to_string(), arena.int());
        fields.insert("next".to_string(), node);
        arena
            .define(
                node,
                TypeTag::Record,
                Some("Node".to_string()),
                None,
                TypeData::Record {
                    fields,
                    open: false,
                },
            )
            .unwrap();

        let children = arena.children_of(node);
        assert_eq!(children.len(), 2);
        assert_eq!(children[1], node);
    }

    #[test]
    fn test_children_of_scalars_empty() {
        let mut arena = TypeArena::new();
        let b = arena.boolean();
        assert!(arena.children_of(b).is_empty());
    }

    #[test]
    fn test_resolve_ref_follows_chain() {
        let mut arena = TypeArena::new();
        let int = arena.int();
        let alias = arena.type_ref("Count", None, int);
        let alias2 = arena.type_ref("Total", None, alias);

        assert_eq!(arena.resolve_ref(alias2), int);
        assert_eq!(arena.resolve_ref(int), int);
    }

    #[test]
    fn test_unnamed_ref_rejected() {
        let mut arena = TypeArena::new();
        let int = arena.int();
        let err = arena
            .insert(TypeTag::TypeRef, None, None, TypeData::Ref { target: int })
            .unwrap_err();
        assert!(matches!(err, TypeModelError::InvalidTypeShape { .. }));
    }
}
