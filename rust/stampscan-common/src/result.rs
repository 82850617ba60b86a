use crate::error::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Returns early with `ErrorKind::InvalidArgument` unless the condition holds.
/// The argument name and the failed condition become the error text.
#[macro_export]
macro_rules! verify_arg {
    ($name:ident, $cond:expr) => {
        if !$cond {
            return Err($crate::error::Error::invalid_arg(
                stringify!($name),
                stringify!($cond),
            ));
        }
    };
}

/// Turns an absent per-document stamp into `ErrorKind::MissingStamp`.
pub trait StampOptionExt<T> {
    fn or_missing_stamp(self, segment: u32, doc: u32) -> Result<T>;
}

impl<T> StampOptionExt<T> for Option<T> {
    #[inline]
    fn or_missing_stamp(self, segment: u32, doc: u32) -> Result<T> {
        self.ok_or_else(|| Error::missing_stamp(segment, Some(doc)))
    }
}
