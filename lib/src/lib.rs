#![warn(missing_docs)]

//! Route inspection ("Chinese postman") solving for continuous-drawing
//! figures on the fixed 5x5 labeled grid: decide whether a set of drawn
//! segments forms one connected figure, and if so, the minimum length of
//! a walk that traverses every segment at least once.

pub use cases::{run_batch, BatchError, DISCONNECTED_MARKER};
pub use figure::Figure;
pub use location::{Location, GRID_DIM};
pub use postman::{solve, Outcome};

pub(crate) mod cases;
pub(crate) mod figure;
pub(crate) mod location;
pub(crate) mod postman;
pub(crate) mod step;
pub mod builder;
