use std::any::Any;
use std::collections::HashMap;

use log::debug;

use crate::{
    catalog::stream::{StreamField, StreamStmtRef},
    error::{
        Error::{Conf, Plan},
        Result,
    },
    fmt_err,
    types::expr::{Expr, Operator, StreamName},
};

use super::{
    filter_plan::FilterPlan,
    logical_plan::{LogicalPlan, PlanRef},
    util::{combine, get_ref_sources},
};

/// A column the source must materialize: the declared field descriptor when
/// the stream has a schema, or the bare name for schemaless streams (and for
/// the pre-seeded event-time field).
#[derive(Debug, Clone, PartialEq)]
pub enum PrunedField {
    Field(StreamField),
    Name(String),
}

impl PrunedField {
    pub fn name(&self) -> &str {
        match self {
            Self::Field(field) => &field.name,
            Self::Name(name) => name,
        }
    }
}

/// Leaf plan node reading one stream. Holds the pass-through configuration
/// set at plan-build time, and after `prune_columns` the minimal output
/// schema the physical source reader must produce.
#[derive(Debug)]
pub struct DataSourcePlan {
    children: Vec<PlanRef>,
    name: StreamName,
    stream_stmt: StreamStmtRef,
    // pass-through configuration
    all_meta: bool,
    iet: bool,
    deterministic_ordering: bool,
    // resolved from the stream statement by get_props
    is_binary: bool,
    timestamp_field: Option<String>,
    timestamp_format: Option<String>,
    // intermediate state, live only while prune_columns runs
    is_wild_card: bool,
    fields: Vec<PrunedField>,
    meta_map: HashMap<String, String>,
    // final output; `stream_fields == None` means "all fields, open schema"
    stream_fields: Option<Vec<PrunedField>>,
    meta_fields: Vec<String>,
}

impl DataSourcePlan {
    pub fn new(name: StreamName, stream_stmt: StreamStmtRef) -> Self {
        Self {
            children: Vec::new(),
            name,
            stream_stmt,
            all_meta: false,
            iet: false,
            deterministic_ordering: false,
            is_binary: false,
            timestamp_field: None,
            timestamp_format: None,
            is_wild_card: false,
            fields: Vec::new(),
            meta_map: HashMap::new(),
            stream_fields: None,
            meta_fields: Vec::new(),
        }
    }

    /// Enables event-time processing: pruning will then require the stream's
    /// TIMESTAMP option and always materialize that field.
    pub fn set_event_time(&mut self, iet: bool) {
        self.iet = iet;
    }

    pub fn set_all_meta(&mut self, all_meta: bool) {
        self.all_meta = all_meta;
    }

    /// When set, the final field list is sorted by name instead of keeping
    /// first-seen order. Meant for reproducible fixtures; metadata output is
    /// sorted in every mode.
    pub fn set_deterministic_ordering(&mut self, on: bool) {
        self.deterministic_ordering = on;
    }

    pub fn name(&self) -> &StreamName {
        &self.name
    }

    pub fn stream_fields(&self) -> Option<&[PrunedField]> {
        self.stream_fields.as_deref()
    }

    pub fn meta_fields(&self) -> &[String] {
        &self.meta_fields
    }

    pub fn is_wild_card(&self) -> bool {
        self.is_wild_card
    }

    pub fn all_meta(&self) -> bool {
        self.all_meta
    }

    pub fn is_binary(&self) -> bool {
        self.is_binary
    }

    pub fn timestamp_field(&self) -> Option<&str> {
        self.timestamp_field.as_deref()
    }

    pub fn timestamp_format(&self) -> Option<&str> {
        self.timestamp_format.as_deref()
    }

    /// Splits `expr` into `(owned, other)`: the part this source can
    /// evaluate locally and the part that must stay above it. Only a
    /// top-level conjunction may be split across streams; any other
    /// multi-stream expression is inseparable and fully residual.
    fn extract(&self, expr: &Expr) -> (Option<Expr>, Option<Expr>) {
        let sources = get_ref_sources(expr);
        match sources.len() {
            0 => (Some(expr.clone()), None),
            1 => {
                let source = sources.iter().next().unwrap();
                if *source == self.name || *source == StreamName::Default {
                    (Some(expr.clone()), None)
                } else {
                    (None, Some(expr.clone()))
                }
            }
            _ => {
                if let Expr::Binary {
                    op: Operator::And,
                    lhs,
                    rhs,
                } = expr
                {
                    let (owned_l, other_l) = self.extract(lhs);
                    let (owned_r, other_r) = self.extract(rhs);
                    (combine(owned_l, owned_r), combine(other_l, other_r))
                } else {
                    (None, Some(expr.clone()))
                }
            }
        }
    }

    fn add_field(&mut self, name: &str) {
        // first writer wins
        if self.fields.iter().any(|f| f.name() == name) {
            return;
        }
        if let Some(resolved) = self.get_field(name) {
            self.fields.push(resolved);
        }
    }

    fn get_field(&self, name: &str) -> Option<PrunedField> {
        match &self.stream_stmt.stream_fields {
            Some(schema) => schema
                .iter()
                .find(|field| field.name == name)
                .map(|field| PrunedField::Field(field.clone())),
            // schemaless source: the name itself stands in for a descriptor
            None => Some(PrunedField::Name(name.to_owned())),
        }
    }

    fn get_all_fields(&mut self) {
        if self.is_wild_card {
            self.stream_fields = self
                .stream_stmt
                .stream_fields
                .as_ref()
                .map(|schema| schema.iter().cloned().map(PrunedField::Field).collect());
        } else {
            let mut fields = std::mem::take(&mut self.fields);
            if self.deterministic_ordering {
                fields.sort_by(|a, b| a.name().cmp(b.name()));
            }
            self.stream_fields = Some(fields);
        }
        let mut meta_fields: Vec<String> = self.meta_map.drain().map(|(_, name)| name).collect();
        meta_fields.sort();
        self.meta_fields = meta_fields;
        self.fields.clear();
    }

    fn get_props(&mut self) -> Result<()> {
        if self.iet {
            match &self.stream_stmt.options.timestamp {
                Some(ts) if !ts.is_empty() => {
                    self.timestamp_field = Some(ts.clone());
                    self.timestamp_format = self.stream_stmt.options.timestamp_format.clone();
                }
                _ => {
                    return Err(Conf(fmt_err!(
                        "preprocessor is set to be event time but stream {} has no TIMESTAMP option",
                        self.name
                    )))
                }
            }
        }
        if self.stream_stmt.options.is_binary() {
            self.is_binary = true;
        }
        Ok(())
    }
}

impl LogicalPlan for DataSourcePlan {
    fn children(&self) -> &[PlanRef] {
        &self.children
    }

    fn set_children(&mut self, children: Vec<PlanRef>) {
        self.children = children;
    }

    fn push_down_predicate(self: Box<Self>, condition: Option<Expr>) -> (Option<Expr>, PlanRef) {
        let Some(condition) = condition else {
            return (None, self);
        };
        let (owned, other) = self.extract(&condition);
        match owned {
            Some(owned) => {
                debug!("push down condition {:?} to source {}", owned, self.name);
                // wrap this source in a new filter holding the owned part
                let mut filter = Box::new(FilterPlan::new(owned));
                filter.set_children(vec![self as PlanRef]);
                (other, filter)
            }
            None => (other, self),
        }
    }

    fn prune_columns(&mut self, fields: &[Expr]) -> Result<()> {
        self.get_props()?;
        self.fields = Vec::new();
        if !self.all_meta {
            self.meta_map = HashMap::new();
        }
        // the event-time field must survive pruning even when never projected
        if let Some(ts) = self.timestamp_field.clone() {
            self.fields.push(PrunedField::Name(ts));
        }
        for field in fields {
            match field {
                Expr::Wildcard => {
                    self.is_wild_card = true;
                }
                Expr::FieldRef { stream, name } => {
                    if !self.is_wild_card
                        && (*stream == StreamName::Default || *stream == self.name)
                    {
                        self.add_field(name);
                    }
                }
                Expr::MetaRef { stream, name } => {
                    if self.all_meta {
                        continue;
                    }
                    if *stream == StreamName::Default || *stream == self.name {
                        if name == "*" {
                            self.all_meta = true;
                            self.meta_map.clear();
                        } else {
                            self.meta_map.insert(name.to_lowercase(), name.clone());
                        }
                    }
                }
                Expr::SortField { name } => {
                    if !self.is_wild_card {
                        self.add_field(name);
                    }
                }
                other => return Err(Plan(fmt_err!("unsupported field {:?}", other))),
            }
        }
        self.get_all_fields();
        Ok(())
    }

    fn plan_type(&self) -> &'static str {
        "DataSource"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
