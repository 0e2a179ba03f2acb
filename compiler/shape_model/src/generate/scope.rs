//! Name-reference rules: the global scope, builtins, and external
//! parameter placeholders. Each reference is a fresh leaf; the declaration
//! behind it is emitted once.

use shape_ir::{LowerResult, NodeId};

use super::AsgBuilder;
use crate::model::{BuiltinModel, ExternalParameterModel, Model};
use crate::ModelId;

impl AsgBuilder<'_> {
    /// `global`, declared on first use as `var global = this;`.
    pub(super) fn global(&mut self) -> LowerResult<NodeId> {
        if let Some(name) = self.global.clone() {
            return Ok(self.arena.ident(name));
        }
        let name = self.names.fresh(Some(self.config.global_name.as_str()))?;
        let scope = self.arena.this();
        let decl = self.arena.var_decl(name.clone(), Some(scope));
        self.sink.push(decl);
        self.global = Some(name.clone());
        Ok(self.arena.ident(name))
    }

    /// Member chain over the builtin's dotted name.
    ///
    /// The first visit writes out monkey-patched properties.
    pub(super) fn builtin(&mut self, id: ModelId, builtin: &BuiltinModel) -> LowerResult<NodeId> {
        if !self.builtins_done.insert(id) {
            return Ok(self.arena.path(&builtin.full_name));
        }

        for (name, value) in builtin.properties.iter() {
            let value_node = self.to_node(value)?;
            // `Intl.Collator` listed as a property of `Intl` is the builtin
            // itself, not a patch.
            if let Model::Builtin(nested) = self.graph.model(value) {
                if is_child_path(&builtin.full_name, name, &nested.full_name) {
                    continue;
                }
            }
            let owner = self.arena.path(&builtin.full_name);
            let target = self.arena.member(owner, name);
            let stmt = self.arena.assign_stmt(target, value_node);
            self.sink.push(stmt);
        }

        Ok(self.arena.path(&builtin.full_name))
    }

    /// Reference to the uninitialised `function_<k>_<i>` binding.
    pub(super) fn external_parameter(
        &mut self,
        id: ModelId,
        param: &ExternalParameterModel,
    ) -> LowerResult<NodeId> {
        if let Some(name) = self.placeholders.get(&id) {
            let name = name.clone();
            return Ok(self.arena.ident(name));
        }
        let hint = format!(
            "function_{}_{}",
            self.graph.label(param.function),
            param.index
        );
        let name = self.names.fresh(Some(hint.as_str()))?;
        self.sink.declare_placeholder(&mut self.arena, name.clone());
        self.placeholders.insert(id, name.clone());
        Ok(self.arena.ident(name))
    }
}

/// Whether `full` names `owner.name`.
fn is_child_path(owner: &str, name: &str, full: &str) -> bool {
    full.strip_prefix(owner)
        .and_then(|rest| rest.strip_prefix('.'))
        .is_some_and(|rest| rest == name)
}
