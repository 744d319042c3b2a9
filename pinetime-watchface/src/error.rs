//! Watch face errors

/// Errors raised while rendering the watch face
///
/// `E` is the error type of the display surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Writing to the display surface failed
    Surface(E),
    /// The clock reported a month outside the name tables
    InvalidMonth(u32),
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Error::Surface(err)
    }
}
