//! Progress reporting.
//!
//! Progress is an observable side effect of a run, not part of its result:
//! a row bar advances after every row whatever its outcome, and a byte bar
//! follows the file being transferred.
//!
//! - `style` - progress bar styling options and templates
//! - `display` - coordination of the row bar and the byte bar

pub(crate) mod display;
pub(crate) mod style;

pub use display::ProgressDisplay;
pub use style::{ProgressBarOpts, StyleOptions};
