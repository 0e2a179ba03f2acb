//! Model registry: creation, content-addressed caching, and accumulation.
//!
//! One `ModelGraph` per trace. It replaces process-wide caches: re-observing
//! a code site or builtin name returns the model already registered here,
//! and independent graphs never see each other's models.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use shape_ir::array_index;
use smallvec::SmallVec;

use crate::model::{
    AccessorKind, ArrayModel, BuiltinModel, ExternalParameterModel, FunctionModel, GlobalModel,
    InstanceModel, Model, ObjectModel, PrimitiveKind, PropertyMap, UnionModel,
};
use crate::{ModelId, SiteKey};

/// Slot all non-identifier, non-index array property names fold into.
pub const ARRAY_WILDCARD: &str = "*";

#[derive(Clone, Debug)]
pub struct ModelGraph {
    models: Vec<Model>,
    objects: FxHashMap<SiteKey, ModelId>,
    arrays: FxHashMap<SiteKey, ModelId>,
    functions: FxHashMap<SiteKey, ModelId>,
    builtins: FxHashMap<String, ModelId>,
    builtin_instances: FxHashMap<ModelId, ModelId>,
    params: FxHashMap<(ModelId, u32), ModelId>,
    primitives: [ModelId; 6],
    global: ModelId,
}

impl Default for ModelGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelGraph {
    /// Create a graph holding the six primitives and the global scope.
    pub fn new() -> Self {
        let mut graph = Self {
            models: Vec::new(),
            objects: FxHashMap::default(),
            arrays: FxHashMap::default(),
            functions: FxHashMap::default(),
            builtins: FxHashMap::default(),
            builtin_instances: FxHashMap::default(),
            params: FxHashMap::default(),
            primitives: [ModelId::new(0); 6],
            global: ModelId::new(0),
        };
        for (slot, kind) in PrimitiveKind::ALL.into_iter().enumerate() {
            graph.primitives[slot] = graph.alloc(Model::Primitive(kind));
        }
        graph.global = graph.alloc(Model::Global(GlobalModel::default()));
        graph
    }

    fn alloc(&mut self, model: Model) -> ModelId {
        let raw = u32::try_from(self.models.len())
            .unwrap_or_else(|_| panic!("model graph exceeds u32::MAX models"));
        self.models.push(model);
        ModelId::new(raw)
    }

    /// # Panics
    /// Panics if `id` belongs to another graph.
    #[inline]
    pub fn model(&self, id: ModelId) -> &Model {
        &self.models[id.index()]
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ModelId, &Model)> + '_ {
        (0u32..).zip(&self.models).map(|(raw, m)| (ModelId::new(raw), m))
    }

    /// Number used in binding-name hints: the code site when there is one,
    /// the model id otherwise.
    pub fn label(&self, id: ModelId) -> u32 {
        self.model(id).site().map_or(id.raw(), |site| site.0)
    }

    // Creation

    pub fn primitive(&self, kind: PrimitiveKind) -> ModelId {
        let slot = PrimitiveKind::ALL
            .iter()
            .position(|k| *k == kind)
            .unwrap_or_default();
        self.primitives[slot]
    }

    pub fn global(&self) -> ModelId {
        self.global
    }

    pub fn object(&mut self, site: Option<SiteKey>) -> ModelId {
        let make = |site| {
            Model::Object(ObjectModel {
                site,
                ..ObjectModel::default()
            })
        };
        match site {
            Some(key) => {
                if let Some(&id) = self.objects.get(&key) {
                    return id;
                }
                let id = self.alloc(make(site));
                self.objects.insert(key, id);
                id
            }
            None => self.alloc(make(None)),
        }
    }

    pub fn array(&mut self, site: Option<SiteKey>) -> ModelId {
        let make = |site| {
            Model::Array(ArrayModel {
                object: ObjectModel {
                    site,
                    ..ObjectModel::default()
                },
                degraded: false,
            })
        };
        match site {
            Some(key) => {
                if let Some(&id) = self.arrays.get(&key) {
                    return id;
                }
                let id = self.alloc(make(site));
                self.arrays.insert(key, id);
                id
            }
            None => self.alloc(make(None)),
        }
    }

    /// Function model with its paired instance model and empty return union.
    pub fn function(&mut self, site: Option<SiteKey>) -> ModelId {
        if let Some(&id) = site.and_then(|key| self.functions.get(&key)) {
            return id;
        }

        // The instance refers back to the function, so the function is
        // allocated first and its instance and return union patched in.
        let id = self.alloc(Model::Function(FunctionModel {
            site,
            used_params: BTreeMap::new(),
            properties: PropertyMap::new(),
            instance: self.global,
            returns: self.global,
            accessor: None,
        }));
        let instance = self.alloc(Model::Instance(InstanceModel {
            constructor: id,
            properties: PropertyMap::new(),
        }));
        let returns = self.alloc(Model::Union(UnionModel::default()));
        if let Model::Function(f) = &mut self.models[id.index()] {
            f.instance = instance;
            f.returns = returns;
        }

        if let Some(key) = site {
            self.functions.insert(key, id);
        }
        id
    }

    /// Builtin for a fully-qualified name. `constructible` only ever turns on.
    pub fn builtin(&mut self, full_name: &str, constructible: bool) -> ModelId {
        if let Some(&id) = self.builtins.get(full_name) {
            if constructible {
                if let Model::Builtin(b) = &mut self.models[id.index()] {
                    b.constructible = true;
                }
            }
            return id;
        }
        let id = self.alloc(Model::Builtin(BuiltinModel {
            full_name: full_name.to_owned(),
            properties: PropertyMap::new(),
            constructible,
        }));
        self.builtins.insert(full_name.to_owned(), id);
        id
    }

    /// Instance model for a function or constructible builtin.
    pub fn instance_of(&mut self, constructor: ModelId) -> Option<ModelId> {
        match self.model(constructor) {
            Model::Function(f) => Some(f.instance),
            Model::Builtin(b) if b.constructible => {
                if let Some(&id) = self.builtin_instances.get(&constructor) {
                    return Some(id);
                }
                let id = self.alloc(Model::Instance(InstanceModel {
                    constructor,
                    properties: PropertyMap::new(),
                }));
                self.builtin_instances.insert(constructor, id);
                Some(id)
            }
            _ => None,
        }
    }

    /// Placeholder for "what callers pass as parameter `index`".
    pub fn external_parameter(&mut self, function: ModelId, index: u32) -> ModelId {
        if let Some(&id) = self.params.get(&(function, index)) {
            return id;
        }
        let id = self.alloc(Model::ExternalParameter(ExternalParameterModel {
            function,
            index,
        }));
        self.params.insert((function, index), id);
        id
    }

    /// New union of `members`, flattened and deduplicated.
    pub fn union(&mut self, members: impl IntoIterator<Item = ModelId>) -> ModelId {
        let mut union = UnionModel::default();
        for member in members {
            self.absorb(&mut union.members, member);
        }
        self.alloc(Model::Union(union))
    }

    /// Add `member` to `into`, splicing unions and skipping duplicates.
    fn absorb(&self, into: &mut SmallVec<[ModelId; 4]>, member: ModelId) {
        match self.model(member) {
            Model::Union(nested) => {
                for &m in &nested.members {
                    if !into.contains(&m) {
                        into.push(m);
                    }
                }
            }
            _ => {
                if !into.contains(&member) {
                    into.push(member);
                }
            }
        }
    }

    /// Widen `existing` to also cover `incoming`.
    fn widen(&mut self, existing: ModelId, incoming: ModelId) -> ModelId {
        if existing == incoming {
            return existing;
        }
        let mut members = SmallVec::new();
        self.absorb(&mut members, existing);
        self.absorb(&mut members, incoming);
        if let Model::Union(old) = self.model(existing) {
            if old.members == members {
                return existing;
            }
        }
        self.alloc(Model::Union(UnionModel { members }))
    }

    // Accumulation

    /// Record `owner.name = value`.
    ///
    /// A name already bound to a different model widens into a union. Array
    /// names are normalised first; a non-index name degrades the array.
    /// Returns `false` if `owner` cannot carry properties.
    pub fn add_property(&mut self, owner: ModelId, name: &str, value: ModelId) -> bool {
        let name = match &mut self.models[owner.index()] {
            Model::Array(arr) => {
                let normalised = normalise_array_name(name);
                if array_index(normalised).is_none() && !arr.degraded {
                    tracing::trace!(array = owner.raw(), name, "array degraded to object");
                    arr.degraded = true;
                }
                normalised
            }
            model if model.properties().is_some() => name,
            model => {
                tracing::debug!(
                    owner = owner.raw(),
                    kind = model.kind_name(),
                    name,
                    "ignoring property on a model without properties"
                );
                return false;
            }
        };

        let current = self.model(owner).properties().and_then(|p| p.get(name));
        let slot = match current {
            Some(existing) => self.widen(existing, value),
            None => value,
        };
        if let Some(props) = self.models[owner.index()].properties_mut() {
            props.insert(name, slot);
        }
        true
    }

    /// Record a getter on an object (or array, which then degrades).
    pub fn add_getter(&mut self, owner: ModelId, name: &str, function: ModelId) -> bool {
        self.add_accessor(owner, name, function, AccessorKind::Getter)
    }

    /// Record a setter on an object (or array, which then degrades).
    pub fn add_setter(&mut self, owner: ModelId, name: &str, function: ModelId) -> bool {
        self.add_accessor(owner, name, function, AccessorKind::Setter)
    }

    fn add_accessor(
        &mut self,
        owner: ModelId,
        name: &str,
        function: ModelId,
        kind: AccessorKind,
    ) -> bool {
        if let Model::Function(f) = &mut self.models[function.index()] {
            f.accessor = Some(kind);
        }
        let object = match &mut self.models[owner.index()] {
            Model::Object(obj) => obj,
            Model::Array(arr) => {
                arr.degraded = true;
                &mut arr.object
            }
            _ => return false,
        };
        let map = match kind {
            AccessorKind::Getter => &mut object.getters,
            AccessorKind::Setter => &mut object.setters,
        };
        map.insert(name, function);
        true
    }

    /// Record `this.name = value` inside constructor `function`.
    pub fn add_instance_property(&mut self, function: ModelId, name: &str, value: ModelId) -> bool {
        match self.model(function) {
            Model::Function(f) => {
                let instance = f.instance;
                self.add_property(instance, name, value)
            }
            _ => false,
        }
    }

    /// Widen `function`'s return union. `undefined` returns are dropped.
    pub fn observe_return(&mut self, function: ModelId, value: ModelId) -> bool {
        if value == self.primitive(PrimitiveKind::Undefined) {
            return false;
        }
        let Model::Function(f) = self.model(function) else {
            return false;
        };
        let returns = f.returns;
        let mut members = match self.model(returns) {
            Model::Union(u) => u.members.clone(),
            _ => SmallVec::new(),
        };
        self.absorb(&mut members, value);
        if let Model::Union(u) = &mut self.models[returns.index()] {
            u.members = members;
        }
        true
    }

    /// Mark parameter `index` of `function` used (0 is the receiver) and
    /// return its external-parameter model.
    pub fn use_param(&mut self, function: ModelId, index: u32) -> Option<ModelId> {
        if !matches!(self.model(function), Model::Function(_)) {
            return None;
        }
        let param = self.external_parameter(function, index);
        if let Model::Function(f) = &mut self.models[function.index()] {
            f.used_params.insert(index, param);
        }
        Some(param)
    }

    /// Whether `id` generates nothing worth emitting: `undefined` or an
    /// empty union.
    pub fn is_absent(&self, id: ModelId) -> bool {
        match self.model(id) {
            Model::Primitive(PrimitiveKind::Undefined) => true,
            Model::Union(u) => u.members.is_empty(),
            _ => false,
        }
    }
}

/// Keep index and identifier names; fold everything else into `"*"`.
pub fn normalise_array_name(name: &str) -> &str {
    if shape_ir::is_identifier(name) || array_index(name).is_some() {
        name
    } else {
        ARRAY_WILDCARD
    }
}
