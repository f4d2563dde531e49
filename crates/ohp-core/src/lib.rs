pub mod error;
pub mod join;
pub mod numeric;
pub mod regression;
pub mod sort;
pub mod table;

pub use error::{OhpError, OhpResult};
pub use join::{
    greedy_match, left_outer_join, left_outer_join_with, ColumnPolicy, GreedyMatcher,
    JoinOperator, JoinOptions, RowMatcher,
};
pub use numeric::sqrt;
pub use regression::{linear_regression, Regression};
pub use sort::mergesort;
pub use table::{Row, Table};
