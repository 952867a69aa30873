pub mod expression;
pub mod formatter;
pub mod state;

pub use expression::*;
pub use formatter::*;
pub use state::*;
