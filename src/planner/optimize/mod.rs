mod column_pruning;
mod filter_pushdown;

use crate::{error::Result, types::expr::Expr};

use super::logical_plan::PlanRef;

/// Applies the logical rewrite rules to a finished plan tree, in order:
/// predicate pushdown first, then column pruning over the rewritten tree.
/// `required_fields` is the ordered list of columns the query output needs.
#[derive(Debug, Default)]
pub struct LogicalOptimizer;

impl LogicalOptimizer {
    pub fn optimize(&self, plan: PlanRef, required_fields: &[Expr]) -> Result<PlanRef> {
        let mut plan = self.filter_pushdown(plan);
        self.column_pruning(&mut plan, required_fields)?;
        Ok(plan)
    }
}
