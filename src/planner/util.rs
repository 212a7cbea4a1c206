use std::collections::BTreeSet;

use crate::types::expr::{Expr, Operator, StreamName};

/// Collects the distinct stream qualifiers referenced by the field and
/// metadata leaves of `expr`. The unqualified marker `StreamName::Default`
/// appears in the set like any named stream.
pub(crate) fn get_ref_sources(expr: &Expr) -> BTreeSet<StreamName> {
    let mut sources = BTreeSet::new();
    collect_sources(expr, &mut sources);
    sources
}

fn collect_sources(expr: &Expr, sources: &mut BTreeSet<StreamName>) {
    match expr {
        Expr::Binary { lhs, rhs, .. } => {
            collect_sources(lhs, sources);
            collect_sources(rhs, sources);
        }
        Expr::FieldRef { stream, .. } | Expr::MetaRef { stream, .. } => {
            sources.insert(stream.clone());
        }
        Expr::Wildcard | Expr::SortField { .. } | Expr::Literal(_) => {}
    }
}

/// Conjunction with `None` as the identity element: combining `None` with x
/// yields x, combining two conditions ANDs them.
pub(crate) fn combine(lhs: Option<Expr>, rhs: Option<Expr>) -> Option<Expr> {
    match (lhs, rhs) {
        (Some(l), Some(r)) => Some(Expr::binary(Operator::And, l, r)),
        (Some(l), None) => Some(l),
        (None, r) => r,
    }
}

/// Collects the field, metadata and sort-key references occurring in `expr`,
/// in left-to-right order. Used by interior nodes to add the columns their
/// own expressions consume to the pruning requirement.
pub(crate) fn get_fields(expr: &Expr) -> Vec<Expr> {
    let mut fields = Vec::new();
    collect_fields(expr, &mut fields);
    fields
}

fn collect_fields(expr: &Expr, fields: &mut Vec<Expr>) {
    match expr {
        Expr::Binary { lhs, rhs, .. } => {
            collect_fields(lhs, fields);
            collect_fields(rhs, fields);
        }
        Expr::FieldRef { .. } | Expr::MetaRef { .. } | Expr::SortField { .. } => {
            fields.push(expr.clone());
        }
        Expr::Wildcard | Expr::Literal(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::value::Value;

    fn cond(stream: StreamName, field: &str) -> Expr {
        Expr::binary(
            Operator::Gt,
            Expr::field_ref(stream, field),
            Expr::Literal(Value::Int(10)),
        )
    }

    #[test]
    fn test_ref_sources() {
        let expr = Expr::binary(
            Operator::And,
            cond(StreamName::named("src1"), "temp"),
            Expr::binary(
                Operator::Eq,
                Expr::meta_ref(StreamName::Default, "topic"),
                Expr::Literal(Value::String("t/1".to_owned())),
            ),
        );
        let sources = get_ref_sources(&expr);
        assert_eq!(sources.len(), 2);
        assert!(sources.contains(&StreamName::Default));
        assert!(sources.contains(&StreamName::named("src1")));

        assert!(get_ref_sources(&Expr::Literal(Value::Bool(true))).is_empty());
    }

    #[test]
    fn test_combine_identity() {
        let a = cond(StreamName::Default, "temp");
        assert_eq!(combine(None, None), None);
        assert_eq!(combine(Some(a.clone()), None), Some(a.clone()));
        assert_eq!(combine(None, Some(a.clone())), Some(a.clone()));
        assert_eq!(
            combine(Some(a.clone()), Some(a.clone())),
            Some(Expr::binary(Operator::And, a.clone(), a))
        );
    }

    #[test]
    fn test_get_fields_order() {
        let expr = Expr::binary(
            Operator::And,
            cond(StreamName::Default, "temp"),
            cond(StreamName::Default, "humidity"),
        );
        let fields = get_fields(&expr);
        assert_eq!(
            fields,
            vec![
                Expr::field_ref(StreamName::Default, "temp"),
                Expr::field_ref(StreamName::Default, "humidity"),
            ]
        );
    }
}
