//! # Command Module
//!
//! The `generate` command dispatcher.
//!
//! ## Flow
//!
//! ```text
//! app + runtime + raw options
//!   → app has a models module?          (Usage)
//!   → Python >= 3.4?                    (Environment)
//!   → Django family recognized?         (Environment)
//!   → normalize options for the family  (Argument)
//!   → build the generator for `format`
//!   → serializers | views | urls | all three
//! ```
//!
//! Every check runs before any generator accessor, so a failed invocation
//! produces no output.

mod dispatch;
mod error;
mod options;
#[cfg(test)]
mod tests;

pub use dispatch::*;
pub use error::CommandError;
pub use options::*;
