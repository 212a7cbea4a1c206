pub mod data_source_plan;
pub mod filter_plan;
pub mod logical_plan;
mod optimize;
mod util;

use std::sync::Arc;

use crate::{
    catalog::Catalog,
    error::{Error::Plan, Result},
    fmt_err,
    types::expr::StreamName,
};

pub use optimize::LogicalOptimizer;

use self::data_source_plan::DataSourcePlan;

#[derive(Debug)]
pub struct Planner {
    pub catalog: Arc<Catalog>,
}

impl Planner {
    pub fn new(catalog: &Arc<Catalog>) -> Self {
        Self {
            catalog: Arc::clone(catalog),
        }
    }

    /// Resolves a FROM-clause stream into a source plan node. Event-time
    /// mode is decided per query by the caller.
    pub fn source_plan(&self, stream: &str, event_time: bool) -> Result<DataSourcePlan> {
        let stmt = self
            .catalog
            .get_stream(stream)
            .ok_or_else(|| Plan(fmt_err!("stream {stream} is not defined")))?;
        let mut plan = DataSourcePlan::new(StreamName::named(stream), stmt);
        plan.set_event_time(event_time);
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::{
        filter_plan::FilterPlan,
        logical_plan::{explain, LogicalPlan, PlanRef},
        *,
    };
    use crate::{
        catalog::stream::{StreamField, StreamOptions, StreamStmt},
        types::{
            expr::{Expr, Operator},
            value::Value,
            LogicalType,
        },
    };

    static LOG_INIT: std::sync::Once = std::sync::Once::new();

    pub fn init() {
        LOG_INIT.call_once(|| {
            env_logger::Builder::new()
                .format(|buf, record| {
                    writeln!(
                        buf,
                        "{} {} {}:{} {}",
                        chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                        record.level(),
                        record.file().unwrap(),
                        record.line().unwrap(),
                        record.args()
                    )
                })
                .filter(None, log::LevelFilter::Debug)
                .init();
        });
    }

    fn demo_catalog() -> Arc<Catalog> {
        let mut catalog = Catalog::default();
        catalog
            .create_stream(StreamStmt::new(
                "demo",
                Some(vec![
                    StreamField::new("ts", LogicalType::Datetime),
                    StreamField::new("temp", LogicalType::Float64),
                    StreamField::new("humidity", LogicalType::Int64),
                ]),
                StreamOptions {
                    timestamp: Some("ts".to_owned()),
                    ..Default::default()
                },
            ))
            .unwrap();
        Arc::new(catalog)
    }

    #[test]
    fn test_source_plan_unknown_stream() {
        init();
        let planner = Planner::new(&demo_catalog());
        assert!(planner.source_plan("nope", false).is_err());
    }

    #[test]
    fn test_optimize_select_where() {
        init();
        // SELECT temp FROM demo WHERE temp > 20
        let planner = Planner::new(&demo_catalog());
        let source: PlanRef = Box::new(planner.source_plan("demo", false).unwrap());
        let condition = Expr::binary(
            Operator::Gt,
            Expr::field_ref(StreamName::Default, "temp"),
            Expr::Literal(Value::Int(20)),
        );
        let mut filter = Box::new(FilterPlan::new(condition.clone()));
        filter.set_children(vec![source]);

        let optimizer = LogicalOptimizer;
        let plan = optimizer
            .optimize(filter, &[Expr::field_ref(StreamName::Default, "temp")])
            .unwrap();

        assert_eq!(explain(plan.as_ref(), 0), "Filter\n  DataSource\n");
        let filter = plan.as_any().downcast_ref::<FilterPlan>().unwrap();
        assert_eq!(filter.condition(), &condition);

        let source = plan.children()[0]
            .as_any()
            .downcast_ref::<DataSourcePlan>()
            .unwrap();
        let names: Vec<&str> = source
            .stream_fields()
            .unwrap()
            .iter()
            .map(|f| f.name())
            .collect();
        // temp is required by projection and filter alike; dedup keeps one
        assert_eq!(names, vec!["temp"]);
    }

    #[test]
    fn test_optimize_event_time_query() {
        init();
        // SELECT temp FROM demo with event-time processing: ts survives
        let planner = Planner::new(&demo_catalog());
        let mut plan: PlanRef = Box::new(planner.source_plan("demo", true).unwrap());

        let optimizer = LogicalOptimizer;
        optimizer
            .column_pruning(&mut plan, &[Expr::field_ref(StreamName::Default, "temp")])
            .unwrap();

        let source = plan.as_any().downcast_ref::<DataSourcePlan>().unwrap();
        let names: Vec<&str> = source
            .stream_fields()
            .unwrap()
            .iter()
            .map(|f| f.name())
            .collect();
        assert_eq!(names, vec!["ts", "temp"]);
    }
}
