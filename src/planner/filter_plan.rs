use std::any::Any;

use log::debug;

use crate::{
    error::Result,
    types::expr::{Expr, Operator},
};

use super::{
    logical_plan::{LogicalPlan, PlanRef},
    util::get_fields,
};

/// Plan node evaluating one boolean condition over its single child's
/// output. Pushdown both creates these directly above sources and dissolves
/// them when everything they hold can move further down.
#[derive(Debug)]
pub struct FilterPlan {
    children: Vec<PlanRef>,
    condition: Expr,
}

impl FilterPlan {
    pub fn new(condition: Expr) -> Self {
        Self {
            children: Vec::new(),
            condition,
        }
    }

    pub fn condition(&self) -> &Expr {
        &self.condition
    }
}

impl LogicalPlan for FilterPlan {
    fn children(&self) -> &[PlanRef] {
        &self.children
    }

    fn set_children(&mut self, children: Vec<PlanRef>) {
        self.children = children;
    }

    fn push_down_predicate(
        mut self: Box<Self>,
        condition: Option<Expr>,
    ) -> (Option<Expr>, PlanRef) {
        let combined = match condition {
            Some(cond) => Expr::binary(Operator::And, cond, self.condition.clone()),
            None => self.condition.clone(),
        };
        if self.children.is_empty() {
            // nothing below to push into; swallow the whole condition
            self.condition = combined;
            return (None, self);
        }
        let mut rest = Some(combined);
        let children = std::mem::take(&mut self.children);
        let mut new_children = Vec::with_capacity(children.len());
        for child in children {
            let (r, new_child) = child.push_down_predicate(rest.take());
            rest = r;
            new_children.push(new_child);
        }
        match rest {
            Some(rest) => {
                self.condition = rest;
                self.children = new_children;
                (None, self)
            }
            None => {
                if new_children.len() == 1 {
                    // everything moved below; this filter is now redundant
                    debug!("filter fully pushed down, removing node");
                    return (None, new_children.remove(0));
                }
                self.children = new_children;
                (None, self)
            }
        }
    }

    fn prune_columns(&mut self, fields: &[Expr]) -> Result<()> {
        // the columns our own condition reads are required too
        let mut required = fields.to_vec();
        required.extend(get_fields(&self.condition));
        for child in &mut self.children {
            child.prune_columns(&required)?;
        }
        Ok(())
    }

    fn plan_type(&self) -> &'static str {
        "Filter"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
