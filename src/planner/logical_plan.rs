use std::any::Any;
use std::fmt::Debug;

use crate::{error::Result, types::expr::Expr};

pub type PlanRef = Box<dyn LogicalPlan>;

/// Contract shared by every logical plan node. Nodes live behind owning
/// `Box<dyn LogicalPlan>` handles in the tree; `push_down_predicate` takes
/// the node by that handle so a node can move itself under a newly created
/// wrapper without knowing its own concrete type.
pub trait LogicalPlan: Debug {
    fn children(&self) -> &[PlanRef];

    /// Replaces the node's child list. Arity is the concrete variant's
    /// business; no validation happens here.
    fn set_children(&mut self, children: Vec<PlanRef>);

    /// Pushes `condition` as far down the subtree as correctness allows.
    /// Returns the part of the condition that could not be absorbed at or
    /// below this node (`None` when fully absorbed) and the possibly
    /// rewritten subtree root. This operation cannot fail: anything
    /// undecomposable is simply returned as residual.
    fn push_down_predicate(self: Box<Self>, condition: Option<Expr>) -> (Option<Expr>, PlanRef);

    /// Narrows the subtree's output to the fields actually required by the
    /// consumer. `fields` is the accumulated requirement from all ancestors.
    fn prune_columns(&mut self, fields: &[Expr]) -> Result<()>;

    fn plan_type(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;
}

/// Renders the subtree topology, one node per line, two spaces per level.
pub fn explain(plan: &dyn LogicalPlan, indent: usize) -> String {
    let mut out = format!("{}{}\n", "  ".repeat(indent), plan.plan_type());
    for child in plan.children() {
        out.push_str(&explain(child.as_ref(), indent + 1));
    }
    out
}
