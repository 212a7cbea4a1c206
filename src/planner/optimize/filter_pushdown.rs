use super::LogicalOptimizer;
use crate::planner::{
    filter_plan::FilterPlan,
    logical_plan::{LogicalPlan, PlanRef},
};

impl LogicalOptimizer {
    /// Seeds the pushdown walk with no condition; filters along the way
    /// contribute their own conditions and re-place them as low as possible.
    /// A residual that bubbles all the way up has no parent left to evaluate
    /// it, so it is re-wrapped around the root.
    pub fn filter_pushdown(&self, plan: PlanRef) -> PlanRef {
        let (rest, plan) = plan.push_down_predicate(None);
        match rest {
            Some(condition) => {
                let mut filter = Box::new(FilterPlan::new(condition));
                filter.set_children(vec![plan]);
                filter
            }
            None => plan,
        }
    }
}
