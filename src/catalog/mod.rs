pub mod stream;

use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    error::{Error::Internal, Result},
    fmt_err,
};

use self::stream::{StreamStmt, StreamStmtRef};

/// Registry of the streams known to the planner, keyed by stream name.
#[derive(Debug, Default)]
pub struct Catalog {
    streams: HashMap<String, StreamStmtRef>,
}

impl Catalog {
    pub fn create_stream(&mut self, stmt: StreamStmt) -> Result<()> {
        let key = stmt.name.to_string();
        if self.streams.contains_key(&key) {
            return Err(Internal(fmt_err!("stream {key} already exists")));
        }
        self.streams.insert(key, Arc::new(stmt));
        Ok(())
    }

    pub fn get_stream(&self, name: &str) -> Option<StreamStmtRef> {
        self.streams.get(name).map(Arc::clone)
    }

    pub fn drop_stream(&mut self, name: &str) -> bool {
        self.streams.remove(name).is_some()
    }

    pub fn is_stream_exist(&self, name: &str) -> bool {
        self.streams.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::stream::{StreamField, StreamOptions};
    use super::*;
    use crate::types::LogicalType;

    #[test]
    fn test_catalog_registry() {
        let mut catalog = Catalog::default();
        catalog
            .create_stream(StreamStmt::new(
                "demo",
                Some(vec![StreamField::new("temp", LogicalType::Float64)]),
                StreamOptions::default(),
            ))
            .unwrap();

        assert!(catalog.is_stream_exist("demo"));
        assert!(catalog.get_stream("demo").is_some());
        assert!(catalog.get_stream("missing").is_none());

        let dup = catalog.create_stream(StreamStmt::new(
            "demo",
            None,
            StreamOptions::default(),
        ));
        assert!(matches!(dup, Err(Internal(_))));

        assert!(catalog.drop_stream("demo"));
        assert!(!catalog.is_stream_exist("demo"));
    }

    #[test]
    fn test_binary_format_option() {
        let opts = StreamOptions {
            format: Some("BINARY".to_owned()),
            ..Default::default()
        };
        assert!(opts.is_binary());
        assert!(!StreamOptions::default().is_binary());
    }
}
