//! Unique top-level binding names.
//!
//! Every synthesized binding (the global-scope alias, external-parameter
//! placeholders, promoted shared subtrees) gets its name here, so no two
//! declarations of one program can collide.

use rustc_hash::FxHashSet;

use crate::error::{LowerError, LowerResult};

#[derive(Clone, Debug, Default)]
pub struct BindingNames {
    taken: FxHashSet<String>,
}

impl BindingNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `name` as used without handing it out, e.g. a top-level name the
    /// traced program assigns itself.
    pub fn reserve(&mut self, name: &str) {
        self.taken.insert(name.to_owned());
    }

    pub fn is_taken(&self, name: &str) -> bool {
        self.taken.contains(name)
    }

    /// Hand out `hint` if free, else the first free `hint_N` (N >= 1).
    pub fn fresh(&mut self, hint: Option<&str>) -> LowerResult<String> {
        let base = match hint {
            Some(h) if !h.is_empty() => h,
            _ => {
                return Err(LowerError::InvalidBindingName {
                    hint: hint.map(str::to_owned),
                })
            }
        };

        if self.taken.insert(base.to_owned()) {
            return Ok(base.to_owned());
        }
        let mut n = 1usize;
        loop {
            let candidate = format!("{base}_{n}");
            if self.taken.insert(candidate.clone()) {
                return Ok(candidate);
            }
            n += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn hint_is_used_verbatim_when_free() {
        let mut names = BindingNames::new();
        assert_eq!(names.fresh(Some("obj_3")), Ok("obj_3".to_owned()));
    }

    #[test]
    fn collisions_get_numeric_suffixes() {
        let mut names = BindingNames::new();
        names.reserve("global");
        assert_eq!(names.fresh(Some("global")), Ok("global_1".to_owned()));
        assert_eq!(names.fresh(Some("global")), Ok("global_2".to_owned()));
    }

    #[test]
    fn suffix_skips_reserved_candidates() {
        let mut names = BindingNames::new();
        names.reserve("tmp");
        names.reserve("tmp_1");
        assert_eq!(names.fresh(Some("tmp")), Ok("tmp_2".to_owned()));
    }

    #[test]
    fn empty_or_absent_hint_is_rejected() {
        let mut names = BindingNames::new();
        assert_eq!(
            names.fresh(None),
            Err(LowerError::InvalidBindingName { hint: None })
        );
        assert_eq!(
            names.fresh(Some("")),
            Err(LowerError::InvalidBindingName {
                hint: Some(String::new())
            })
        );
    }
}
