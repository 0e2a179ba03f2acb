//! Value-shape models and their ASG generation rules.
//!
//! A [`ModelGraph`] records the structural signatures a traced program's
//! values exhibited: objects with their property sets, arrays, functions
//! with their used parameters and return shapes, builtins, and the global
//! scope. The graph may share substructure and contain cycles; identity is
//! the [`ModelId`], and the graph's caches guarantee that one code site or
//! one builtin name always resolves to one model.
//!
//! [`AsgBuilder`] turns models into ASG nodes that reconstruct equivalent
//! shapes when run.
//!
//! # Example
//!
//! ```
//! use shape_ir::BindingNames;
//! use shape_model::{AsgBuilder, GenerateConfig, ModelGraph, PrimitiveKind, SiteKey};
//!
//! let mut graph = ModelGraph::new();
//! let obj = graph.object(SiteKey::from_offset(10));
//! let num = graph.primitive(PrimitiveKind::Number);
//! graph.add_property(obj, "x", num);
//! graph.add_property(graph.global(), "p", obj);
//!
//! let mut builder = AsgBuilder::new(&graph, GenerateConfig::default(), BindingNames::new());
//! let first = builder.to_node(obj).unwrap();
//! assert_eq!(builder.to_node(obj).unwrap(), first);
//! ```

mod generate;
mod graph;
mod ids;
mod model;

pub use generate::{AsgBuilder, DeclSink, GenerateConfig, Generated};
pub use graph::{normalise_array_name, ModelGraph, ARRAY_WILDCARD};
pub use ids::{ModelId, SiteKey};
pub use model::{
    AccessorKind, ArrayModel, BuiltinModel, ExternalParameterModel, FunctionModel, GlobalModel,
    InstanceModel, Model, ObjectModel, PrimitiveKind, PropertyMap, UnionModel,
};
