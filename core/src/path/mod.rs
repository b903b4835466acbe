//! Names and modes of tree entries, and the order git requires them in.

mod file_mode;
pub use file_mode::FileMode;

mod path_mode;
pub use path_mode::PathMode;

mod segment;
pub use segment::{check_segment, PathSegmentError};
