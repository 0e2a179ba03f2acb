//! Function and instance rules.

use shape_ir::{AsgKind, LowerResult, NodeId};

use super::AsgBuilder;
use crate::model::{AccessorKind, FunctionModel, InstanceModel, Model};
use crate::ModelId;

impl AsgBuilder<'_> {
    /// `function (x1, ..., xN) { ... }`.
    ///
    /// The body copies each used parameter into its external placeholder,
    /// writes instance properties onto `this`, and returns the return model.
    /// Static properties become top-level writes onto the function value.
    pub(super) fn function(&mut self, id: ModelId, f: &FunctionModel) -> LowerResult<NodeId> {
        let label = self.graph.label(id);
        let body = self.arena.push(AsgKind::Block { body: vec![] });
        let params = match f.accessor {
            Some(AccessorKind::Getter) => vec![],
            Some(AccessorKind::Setter) => vec!["x1".to_owned()],
            None => (1..=f.max_param().unwrap_or(0))
                .map(|i| format!("x{i}"))
                .collect(),
        };
        let node = self
            .arena
            .push_hinted(AsgKind::Function { params, body }, format!("function_{label}"));
        self.cache(id, node);

        if f.accessor.is_none() {
            for (&index, &param) in &f.used_params {
                let target = self.to_node(param)?;
                let source = if index == 0 {
                    self.arena.this()
                } else {
                    self.arena.ident(format!("x{index}"))
                };
                let stmt = self.arena.assign_stmt(target, source);
                self.arena.push_stmt(body, stmt);
            }
        }

        for (name, value) in f.properties.iter() {
            if name == "prototype"
                && self.config.suppress_empty_prototype
                && self.renders_empty_object(value)
            {
                continue;
            }
            let value = self.to_node(value)?;
            let target = self.arena.member(node, name);
            let stmt = self.arena.assign_stmt(target, value);
            self.sink.push(stmt);
        }

        if let Some(props) = self.graph.model(f.instance).properties() {
            for (name, value) in props.iter() {
                let value = self.to_node(value)?;
                let receiver = self.arena.this();
                let target = self.arena.member(receiver, name);
                let stmt = self.arena.assign_stmt(target, value);
                self.arena.push_stmt(body, stmt);
            }
        }

        if !self.graph.is_absent(f.returns) {
            let value = self.to_node(f.returns)?;
            let stmt = self.arena.ret(value);
            self.arena.push_stmt(body, stmt);
        }

        Ok(node)
    }

    /// `new C()` for the instance's constructor, built once per
    /// constructor.
    ///
    /// The constructor is generated first; if its body reaches this instance
    /// again, the inner visit builds the construct and the outer one reuses it.
    pub(super) fn instance(&mut self, inst: &InstanceModel) -> LowerResult<NodeId> {
        let ctor = inst.constructor;
        if let Some(&construct) = self.constructs.get(&ctor) {
            return Ok(construct);
        }
        let callee = self.to_node(ctor)?;
        if let Some(&construct) = self.constructs.get(&ctor) {
            return Ok(construct);
        }

        let hint = match self.graph.model(ctor) {
            Model::Builtin(builtin) => format!("new_{}", builtin.full_name.replace('.', "_")),
            _ => format!("new_{}", self.graph.label(ctor)),
        };
        let construct = self.arena.push_hinted(
            AsgKind::New {
                callee,
                args: vec![],
            },
            hint,
        );
        self.constructs.insert(ctor, construct);
        Ok(construct)
    }
}
