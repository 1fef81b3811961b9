pub type Result<T> = std::result::Result<T, Error>;

/// Errors from segment decoding and key scoping.
///
/// Decode failures are non-fatal during tree building: the builder skips the
/// offending key and continues, so one corrupt entry never blanks a listing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid percent escape at byte {position} in segment {segment:?}")]
    BadEscape { segment: String, position: usize },

    #[error("segment {segment:?} contains a raw '/'")]
    RawSlash { segment: String },

    #[error("segment {segment:?} does not decode to valid UTF-8")]
    NotUtf8 { segment: String },

    #[error("segment is empty after decoding")]
    EmptySegment,

    #[error("key {key:?} is outside scope {scope:?}")]
    OutOfScope { key: String, scope: String },
}

impl Error {
    pub fn bad_escape<S: AsRef<str>>(segment: S, position: usize) -> Self {
        Error::BadEscape {
            segment: segment.as_ref().to_string(),
            position,
        }
    }

    pub fn raw_slash<S: AsRef<str>>(segment: S) -> Self {
        Error::RawSlash {
            segment: segment.as_ref().to_string(),
        }
    }

    pub fn not_utf8<S: AsRef<str>>(segment: S) -> Self {
        Error::NotUtf8 {
            segment: segment.as_ref().to_string(),
        }
    }

    pub fn empty_segment() -> Self {
        Error::EmptySegment
    }

    pub fn out_of_scope<K: AsRef<str>, S: AsRef<str>>(key: K, scope: S) -> Self {
        Error::OutOfScope {
            key: key.as_ref().to_string(),
            scope: scope.as_ref().to_string(),
        }
    }
}
