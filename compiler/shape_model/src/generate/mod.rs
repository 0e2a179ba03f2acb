//! Model → ASG generation.
//!
//! [`AsgBuilder`] turns models into shared ASG nodes. Each model kind has
//! one rule (see the submodules); the builder caches the node of every
//! content-addressed model so that asking twice returns the same [`NodeId`]
//! and never appends the same declaration twice. That identity is what the
//! lowering pass later detects as sharing.
//!
//! Generation has side effects: it appends top-level declarations (the
//! global alias, static property writes, external-parameter placeholders)
//! to a [`DeclSink`]. All roots must be generated before lowering starts.

mod aggregates;
mod functions;
mod primitives;
mod scope;

use rustc_hash::{FxHashMap, FxHashSet};
use shape_ir::{is_identifier, AsgArena, AsgKind, BindingNames, LowerResult, NodeId};
use shape_stack::ensure_sufficient_stack;

use crate::model::Model;
use crate::{ModelGraph, ModelId};

/// Knobs for node generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerateConfig {
    /// Name hint for the binding that aliases the global scope.
    pub global_name: String,
    /// Skip `F.prototype = {}` writes for prototypes that render empty.
    pub suppress_empty_prototype: bool,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            global_name: "global".to_owned(),
            suppress_empty_prototype: true,
        }
    }
}

/// Top-level statements appended during generation.
///
/// External-parameter placeholders are collected into one uninitialised
/// `var` statement that always comes first.
#[derive(Clone, Debug, Default)]
pub struct DeclSink {
    placeholders: Option<NodeId>,
    decls: Vec<NodeId>,
}

impl DeclSink {
    pub fn push(&mut self, stmt: NodeId) {
        self.decls.push(stmt);
    }

    /// Add `var name;` to the leading placeholder statement.
    fn declare_placeholder(&mut self, arena: &mut AsgArena, name: String) {
        let declarator = arena.push(AsgKind::Declarator { name, init: None });
        match self.placeholders {
            Some(decl) => {
                if let AsgKind::VarDecl { declarators } = arena.kind_mut(decl) {
                    declarators.push(declarator);
                }
            }
            None => {
                self.placeholders = Some(arena.push(AsgKind::VarDecl {
                    declarators: vec![declarator],
                }));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.decls.len() + usize::from(self.placeholders.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Statements in emission order, placeholder declaration first.
    pub fn into_roots(self) -> Vec<NodeId> {
        self.placeholders.into_iter().chain(self.decls).collect()
    }
}

/// Result of a generation run, ready for lowering.
#[derive(Clone, Debug)]
pub struct Generated {
    pub arena: AsgArena,
    /// Names handed out so far; lowering keeps drawing from the same pool.
    pub names: BindingNames,
    /// Top-level statements in emission order.
    pub roots: Vec<NodeId>,
}

/// One generation run over a [`ModelGraph`].
pub struct AsgBuilder<'g> {
    graph: &'g ModelGraph,
    config: GenerateConfig,
    arena: AsgArena,
    names: BindingNames,
    sink: DeclSink,
    /// Generated node per content-addressed model.
    nodes: FxHashMap<ModelId, NodeId>,
    /// `new F()` node per function or constructible builtin.
    constructs: FxHashMap<ModelId, NodeId>,
    /// Builtins whose monkey-patched properties were already written out.
    builtins_done: FxHashSet<ModelId>,
    global: Option<String>,
    placeholders: FxHashMap<ModelId, String>,
}

impl<'g> AsgBuilder<'g> {
    /// `names` should already hold every name the output must not shadow.
    pub fn new(graph: &'g ModelGraph, config: GenerateConfig, names: BindingNames) -> Self {
        Self {
            graph,
            config,
            arena: AsgArena::new(),
            names,
            sink: DeclSink::default(),
            nodes: FxHashMap::default(),
            constructs: FxHashMap::default(),
            builtins_done: FxHashSet::default(),
            global: None,
            placeholders: FxHashMap::default(),
        }
    }

    pub fn graph(&self) -> &'g ModelGraph {
        self.graph
    }

    pub fn arena(&self) -> &AsgArena {
        &self.arena
    }

    pub fn sink(&self) -> &DeclSink {
        &self.sink
    }

    /// The node reconstructing `model`.
    ///
    /// Idempotent for every model that has identity: a second call returns
    /// the same node and appends nothing. `undefined`, `null`, and name
    /// references (global, builtin, placeholder) come back as fresh leaves.
    pub fn to_node(&mut self, model: ModelId) -> LowerResult<NodeId> {
        if let Some(&node) = self.nodes.get(&model) {
            return Ok(node);
        }
        ensure_sufficient_stack(|| self.generate(model))
    }

    fn generate(&mut self, id: ModelId) -> LowerResult<NodeId> {
        let graph = self.graph;
        match graph.model(id) {
            Model::Primitive(kind) => Ok(self.primitive(id, *kind)),
            Model::Object(obj) => self.object(id, obj),
            Model::Array(arr) => self.array(id, arr),
            Model::Function(f) => self.function(id, f),
            Model::Instance(inst) => self.instance(inst),
            Model::Union(union) => self.union(id, union),
            Model::Builtin(builtin) => self.builtin(id, builtin),
            Model::Global(_) => self.global(),
            Model::ExternalParameter(param) => self.external_parameter(id, param),
        }
    }

    /// Generate `value` and append `name = value;` as a top-level statement.
    ///
    /// Names that are not identifiers are written through the global alias:
    /// `global["a b"] = value;`.
    pub fn assign_global(&mut self, name: &str, value: ModelId) -> LowerResult<NodeId> {
        let value = self.to_node(value)?;
        let target = if is_identifier(name) {
            self.arena.ident(name)
        } else {
            let scope = self.global()?;
            self.arena.member(scope, name)
        };
        let stmt = self.arena.assign_stmt(target, value);
        self.sink.push(stmt);
        Ok(stmt)
    }

    pub fn finish(self) -> Generated {
        tracing::debug!(
            nodes = self.arena.len(),
            roots = self.sink.len(),
            "generation finished"
        );
        Generated {
            arena: self.arena,
            names: self.names,
            roots: self.sink.into_roots(),
        }
    }

    fn cache(&mut self, model: ModelId, node: NodeId) {
        self.nodes.insert(model, node);
    }
}
