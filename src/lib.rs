pub mod catalog;
pub mod error;
pub mod planner;
pub mod types;

#[macro_export]
macro_rules! fmt_err {
    ($($arg:tt)*) => {
        format!($($arg)*)
    };
}
