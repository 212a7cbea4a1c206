pub mod expr;
pub mod value;

use serde_derive::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LogicalType {
    Null,
    Bool,
    Int64,
    Float64,
    String,
    Bytea,
    Datetime,
}
