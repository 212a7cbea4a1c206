use std::io::Write;
use std::sync::Arc;

use rill::{
    catalog::{
        stream::{StreamField, StreamOptions, StreamStmt},
        Catalog,
    },
    planner::{
        filter_plan::FilterPlan,
        logical_plan::{explain, LogicalPlan, PlanRef},
        LogicalOptimizer, Planner,
    },
    types::{
        expr::{Expr, Operator, StreamName},
        value::Value,
        LogicalType,
    },
};

fn main() {
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
        .expect("register demo stream");
    let catalog = Arc::new(catalog);

    // SELECT temp FROM demo WHERE temp > 20 AND meta(topic) = "t/1"
    let planner = Planner::new(&catalog);
    let source: PlanRef = Box::new(planner.source_plan("demo", true).expect("plan demo source"));
    let condition = Expr::binary(
        Operator::And,
        Expr::binary(
            Operator::Gt,
            Expr::field_ref(StreamName::Default, "temp"),
            Expr::Literal(Value::Int(20)),
        ),
        Expr::binary(
            Operator::Eq,
            Expr::meta_ref(StreamName::Default, "topic"),
            Expr::Literal(Value::String("t/1".to_owned())),
        ),
    );
    let mut filter = Box::new(FilterPlan::new(condition));
    filter.set_children(vec![source]);

    let optimizer = LogicalOptimizer;
    let plan = optimizer
        .optimize(filter, &[Expr::field_ref(StreamName::Default, "temp")])
        .expect("optimize plan");

    println!("optimized plan:\n{}", explain(plan.as_ref(), 0));
}
