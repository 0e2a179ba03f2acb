//! Value-shape model variants.
//!
//! Models are plain data. All creation, caching, and accumulation goes
//! through [`ModelGraph`](crate::ModelGraph); all node generation goes
//! through [`AsgBuilder`](crate::AsgBuilder).

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::{ModelId, SiteKey};

/// The six primitive kinds. Each has one model per graph.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Undefined,
    Null,
    Boolean,
    Number,
    String,
    RegExp,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 6] = [
        PrimitiveKind::Undefined,
        PrimitiveKind::Null,
        PrimitiveKind::Boolean,
        PrimitiveKind::Number,
        PrimitiveKind::String,
        PrimitiveKind::RegExp,
    ];
}

/// Insertion-ordered property name to model map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropertyMap {
    entries: Vec<(String, ModelId)>,
    index: FxHashMap<String, usize>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<ModelId> {
        self.index.get(name).map(|&i| self.entries[i].1)
    }

    /// Insert or overwrite, keeping the original position on overwrite.
    pub fn insert(&mut self, name: &str, model: ModelId) {
        if let Some(&i) = self.index.get(name) {
            self.entries[i].1 = model;
        } else {
            self.index.insert(name.to_owned(), self.entries.len());
            self.entries.push((name.to_owned(), model));
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ModelId)> + '_ {
        self.entries.iter().map(|(name, model)| (name.as_str(), *model))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AccessorKind {
    Getter,
    Setter,
}

/// Keyed aggregate with plain properties and accessor entries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObjectModel {
    pub site: Option<SiteKey>,
    pub properties: PropertyMap,
    pub getters: PropertyMap,
    pub setters: PropertyMap,
}

/// Positional aggregate. Its names are normalised on insertion; once a
/// non-index name arrives, `degraded` is set for good and the array renders
/// through the object rule.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArrayModel {
    pub object: ObjectModel,
    pub degraded: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionModel {
    pub site: Option<SiteKey>,
    /// Used parameter positions and their external-parameter models.
    /// Position 0 is the receiver.
    pub used_params: BTreeMap<u32, ModelId>,
    /// Static and prototype properties.
    pub properties: PropertyMap,
    /// The paired [`InstanceModel`].
    pub instance: ModelId,
    /// A [`UnionModel`] of observed return values; empty if none.
    pub returns: ModelId,
    pub accessor: Option<AccessorKind>,
}

impl FunctionModel {
    /// Highest used parameter position, receiver included.
    pub fn max_param(&self) -> Option<u32> {
        self.used_params.keys().next_back().copied()
    }
}

/// Instances created with `new` from a function or constructible builtin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstanceModel {
    pub constructor: ModelId,
    /// Properties written on instances (`this.x = ...`).
    pub properties: PropertyMap,
}

/// Distinct, flattened members observed at one site.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnionModel {
    pub members: SmallVec<[ModelId; 4]>,
}

/// Platform value reachable by a dotted name, e.g. `Intl.Collator`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuiltinModel {
    pub full_name: String,
    /// Monkey-patched properties.
    pub properties: PropertyMap,
    pub constructible: bool,
}

/// The top-level execution scope. Its properties are the program's roots.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GlobalModel {
    pub properties: PropertyMap,
}

/// Whatever callers pass for parameter `index` of `function`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ExternalParameterModel {
    pub function: ModelId,
    pub index: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Model {
    Primitive(PrimitiveKind),
    Object(ObjectModel),
    Array(ArrayModel),
    Function(FunctionModel),
    Instance(InstanceModel),
    Union(UnionModel),
    Builtin(BuiltinModel),
    Global(GlobalModel),
    ExternalParameter(ExternalParameterModel),
}

impl Model {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Model::Primitive(_) => "primitive",
            Model::Object(_) => "object",
            Model::Array(_) => "array",
            Model::Function(_) => "function",
            Model::Instance(_) => "instance",
            Model::Union(_) => "union",
            Model::Builtin(_) => "builtin",
            Model::Global(_) => "global",
            Model::ExternalParameter(_) => "external parameter",
        }
    }

    /// Plain property map, for kinds that carry one.
    pub fn properties(&self) -> Option<&PropertyMap> {
        match self {
            Model::Object(obj) => Some(&obj.properties),
            Model::Array(arr) => Some(&arr.object.properties),
            Model::Function(f) => Some(&f.properties),
            Model::Instance(inst) => Some(&inst.properties),
            Model::Builtin(b) => Some(&b.properties),
            Model::Global(g) => Some(&g.properties),
            Model::Primitive(_) | Model::Union(_) | Model::ExternalParameter(_) => None,
        }
    }

    pub(crate) fn properties_mut(&mut self) -> Option<&mut PropertyMap> {
        match self {
            Model::Object(obj) => Some(&mut obj.properties),
            Model::Array(arr) => Some(&mut arr.object.properties),
            Model::Function(f) => Some(&mut f.properties),
            Model::Instance(inst) => Some(&mut inst.properties),
            Model::Builtin(b) => Some(&mut b.properties),
            Model::Global(g) => Some(&mut g.properties),
            Model::Primitive(_) | Model::Union(_) | Model::ExternalParameter(_) => None,
        }
    }

    /// Code site of site-cached kinds.
    pub fn site(&self) -> Option<SiteKey> {
        match self {
            Model::Object(obj) => obj.site,
            Model::Array(arr) => arr.object.site,
            Model::Function(f) => f.site,
            _ => None,
        }
    }
}
