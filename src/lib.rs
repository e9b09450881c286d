pub mod cli;
pub mod error;
pub mod loan;
pub mod period;
pub mod report;

pub use error::LoanError;
pub use loan::{calculate, solve, validate, Calculation, LoanInputs, LoanResult, Scheme};
