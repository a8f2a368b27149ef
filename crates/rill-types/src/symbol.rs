//! Public type symbol views
//!
//! A [`TypeSymbol`] is a read-only wrapper around one graph node, adding
//! module-qualified identity and lazy, memoized accessors for the node's
//! structural parameters and signature. Views are created on demand by
//! [`TypeContext::resolve`], which caches them by node identity so
//! repeated requests share one view.
//!
//! Lazy resolution is not an optimization here: the graph may be cyclic,
//! so each accessor resolves exactly one level and caches the result
//! before anything can recurse through it.

use crate::signature;
use crate::{
    compat, ModuleId, TypeArena, TypeData, TypeId, TypeModelError, TypeModelResult, TypeTag,
};
use std::cell::{Cell, OnceCell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// Compilation context owning the type graph and the view cache
///
/// Passed explicitly wherever types are resolved; there is no process-wide
/// factory instance.
#[derive(Debug)]
pub struct TypeContext {
    arena: TypeArena,
    views: RefCell<HashMap<TypeId, Rc<TypeSymbol>>>,
    resolutions: Cell<usize>,
}

impl TypeContext {
    /// Wrap a fully built arena
    pub fn new(arena: TypeArena) -> Self {
        Self {
            arena,
            views: RefCell::new(HashMap::new()),
            resolutions: Cell::new(0),
        }
    }

    /// The underlying graph
    pub fn arena(&self) -> &TypeArena {
        &self.arena
    }

    /// Resolve a node into its symbol view
    ///
    /// Total for any defined node. `module` is the requesting module's
    /// identity, used for anonymous nodes; nominal nodes keep their own.
    /// Repeated calls for the same node return the same view.
    pub fn resolve(&self, module: Option<&ModuleId>, id: TypeId) -> Rc<TypeSymbol> {
        if let Some(view) = self.views.borrow().get(&id) {
            return view.clone();
        }
        self.resolutions.set(self.resolutions.get() + 1);
        let node = self.arena.node(id);
        let view = Rc::new(TypeSymbol {
            id,
            tag: node.tag(),
            name: node.name().map(str::to_string),
            module: node.module().cloned().or_else(|| module.cloned()),
            type_parameter: OnceCell::new(),
            completion: OnceCell::new(),
            signature: OnceCell::new(),
        });
        self.views.borrow_mut().insert(id, view.clone());
        view
    }

    /// Number of views constructed so far
    ///
    /// Stable across repeated accessor calls on already-resolved symbols;
    /// tests use it to observe that memoized accessors do no new work.
    pub fn resolutions(&self) -> usize {
        self.resolutions.get()
    }

    /// Structural equivalence over this context's graph
    pub fn equivalent(&self, a: TypeId, b: TypeId) -> bool {
        compat::equivalent(&self.arena, a, b)
    }

    /// Assignability over this context's graph
    pub fn assignable(&self, source: TypeId, target: TypeId) -> bool {
        compat::assignable(&self.arena, source, target)
    }

    /// Canonical signature of a node
    pub fn signature_of(&self, id: TypeId) -> String {
        self.resolve(None, id).signature(self)
    }
}

/// Read-only view of one type node
#[derive(Debug)]
pub struct TypeSymbol {
    pub(crate) id: TypeId,
    tag: TypeTag,
    pub(crate) name: Option<String>,
    pub(crate) module: Option<ModuleId>,
    type_parameter: OnceCell<Rc<TypeSymbol>>,
    completion: OnceCell<Option<Rc<TypeSymbol>>>,
    pub(crate) signature: OnceCell<String>,
}

impl TypeSymbol {
    /// Handle of the wrapped node
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The wrapped node's tag
    pub fn type_tag(&self) -> TypeTag {
        self.tag
    }

    /// Name of the type, for nominal types
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Module identity of the type
    pub fn module(&self) -> Option<&ModuleId> {
        self.module.as_ref()
    }

    /// The primary structural parameter: array element, map value, stream
    /// value, table row, error detail, reference target
    ///
    /// Computed through the context factory on first call and cached on
    /// this view; fails with [`TypeModelError::NoTypeParameter`] for kinds
    /// that carry none.
    pub fn type_parameter(&self, cx: &TypeContext) -> TypeModelResult<Rc<TypeSymbol>> {
        if let Some(view) = self.type_parameter.get() {
            return Ok(view.clone());
        }
        let target = match cx.arena().node(self.id).data() {
            TypeData::Array { element } => *element,
            TypeData::Map { value, .. } => *value,
            TypeData::Stream { value, .. } => *value,
            TypeData::Table { row } => *row,
            TypeData::Ref { target } => *target,
            TypeData::Error {
                detail: Some(detail),
            } => *detail,
            _ => return Err(TypeModelError::NoTypeParameter { tag: self.tag }),
        };
        let view = cx.resolve(self.module.as_ref(), target);
        Ok(self.type_parameter.get_or_init(|| view).clone())
    }

    /// The completion type of a stream
    ///
    /// Empty, never an error, for a stream without a completion child and
    /// for every non-stream kind. Cached after the first call.
    pub fn completion_value_type_parameter(
        &self,
        cx: &TypeContext,
    ) -> Option<Rc<TypeSymbol>> {
        if let Some(cached) = self.completion.get() {
            return cached.clone();
        }
        let resolved = match cx.arena().node(self.id).data() {
            TypeData::Stream {
                completion: Some(completion),
                ..
            } => Some(cx.resolve(self.module.as_ref(), *completion)),
            _ => None,
        };
        self.completion.get_or_init(|| resolved).clone()
    }

    /// Canonical signature string, built once and cached
    pub fn signature(&self, cx: &TypeContext) -> String {
        if let Some(cached) = self.signature.get() {
            return cached.clone();
        }
        signature::render(cx, self, &mut Vec::new(), &mut false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn context_with_stream(completion: bool) -> (TypeContext, TypeId) {
        let mut arena = TypeArena::new();
        let int = arena.int();
        let completion = completion.then(|| arena.named_error("Err", None, None));
        let stream = arena.stream(int, completion);
        (TypeContext::new(arena), stream)
    }

    #[test]
    fn test_resolve_returns_identical_view() {
        let (cx, stream) = context_with_stream(false);
        let a = cx.resolve(None, stream);
        let b = cx.resolve(None, stream);
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(cx.resolutions(), 1);
    }

    #[test]
    fn test_type_parameter_memoized() {
        let (cx, stream) = context_with_stream(false);
        let symbol = cx.resolve(None, stream);

        let first = symbol.type_parameter(&cx).unwrap();
        let after_first = cx.resolutions();
        let second = symbol.type_parameter(&cx).unwrap();

        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(cx.resolutions(), after_first);
        assert_eq!(first.type_tag(), TypeTag::Int);
    }

    #[test]
    fn test_no_type_parameter() {
        let mut arena = TypeArena::new();
        let int = arena.int();
        let cx = TypeContext::new(arena);
        let symbol = cx.resolve(None, int);

        let err = symbol.type_parameter(&cx).unwrap_err();
        assert!(matches!(
            err,
            TypeModelError::NoTypeParameter { tag: TypeTag::Int }
        ));
    }

    #[test]
    fn test_completion_absent_is_empty_not_error() {
        let (cx, stream) = context_with_stream(false);
        let symbol = cx.resolve(None, stream);
        assert!(symbol.completion_value_type_parameter(&cx).is_none());
        // Cached: a second call resolves nothing new
        let count = cx.resolutions();
        assert!(symbol.completion_value_type_parameter(&cx).is_none());
        assert_eq!(cx.resolutions(), count);
    }

    #[test]
    fn test_completion_present() {
        let (cx, stream) = context_with_stream(true);
        let symbol = cx.resolve(None, stream);
        let completion = symbol.completion_value_type_parameter(&cx).unwrap();
        assert_eq!(completion.type_tag(), TypeTag::Error);
        assert_eq!(completion.name(), Some("Err"));
    }

    #[test]
    fn test_module_inherited_by_anonymous_children() {
        let mut arena = TypeArena::new();
        let int = arena.int();
        let stream = arena.stream(int, None);
        let cx = TypeContext::new(arena);

        let module = ModuleId::new("acme", "feed");
        let symbol = cx.resolve(Some(&module), stream);
        assert_eq!(symbol.module(), Some(&module));

        let value = symbol.type_parameter(&cx).unwrap();
        assert_eq!(value.module(), Some(&module));
    }
}
