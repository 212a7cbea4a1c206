use super::LogicalOptimizer;
use crate::{
    error::Result,
    planner::logical_plan::PlanRef,
    types::expr::Expr,
};

impl LogicalOptimizer {
    /// Seeds the pruning walk with the columns the query output itself
    /// requires; interior nodes add the columns their own expressions
    /// consume on the way down, and each source finalizes its minimal
    /// output schema.
    pub fn column_pruning(&self, plan: &mut PlanRef, fields: &[Expr]) -> Result<()> {
        plan.prune_columns(fields)
    }
}
