use thiserror::Error;

/// Reasons why a byte sequence can not be used as the name of a tree entry.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum PathSegmentError {
    #[error("name is empty")]
    Empty,

    #[error("name contains `/`")]
    ContainsSlash,

    #[error("name contains a NUL byte")]
    ContainsNull,

    #[error("name is `.` or `..`")]
    DotOrDotDot,

    #[error("name is a variation on `.git`")]
    DotGit,
}

/// Check that `segment` is acceptable as a single path component, which is
/// what a tree entry's name must be.
pub fn check_segment(segment: &[u8]) -> Result<(), PathSegmentError> {
    if segment.is_empty() {
        Err(PathSegmentError::Empty)
    } else if segment.contains(&b'/') {
        Err(PathSegmentError::ContainsSlash)
    } else if segment.contains(&0) {
        Err(PathSegmentError::ContainsNull)
    } else if segment == b"." || segment == b".." {
        Err(PathSegmentError::DotOrDotDot)
    } else if segment.eq_ignore_ascii_case(b".git") || segment.eq_ignore_ascii_case(b"git~1") {
        // "git~1" is the Windows short name for ".git".
        Err(PathSegmentError::DotGit)
    } else {
        Ok(())
    }
}
