pub mod artifact;
pub mod conversion;
pub mod definition;
pub mod dialogue;
pub mod task;

pub use artifact::*;
pub use conversion::*;
pub use definition::*;
pub use dialogue::*;
pub use task::*;
