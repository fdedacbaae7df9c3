//! Tools that we could imagine being in the Rust standard library, but aren't.

#[doc(no_inline)]
pub use manyfmt::{Fmt, Refmt};

// -------------------------------------------------------------------------------------------------

mod custom_format;
pub use custom_format::*;

pub mod log;

// -------------------------------------------------------------------------------------------------

#[doc(hidden)]
pub use error_chain::ErrorChain;
mod error_chain {
    use core::error::Error;
    use core::fmt;

    /// Formatting wrapper which prints an [`Error`] together with its
    /// `source()` chain, with at least one newline between each.
    ///
    /// The text begins with the [`fmt::Display`] format of the error.
    #[doc(hidden)] // not something we wish to be stable public API
    #[derive(Clone, Copy, Debug)]
    #[expect(clippy::exhaustive_structs)]
    pub struct ErrorChain<'a>(pub &'a (dyn Error + 'a));

    impl fmt::Display for ErrorChain<'_> {
        #[allow(clippy::missing_inline_in_public_items)]
        fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
            format_error_chain(fmt, self.0)
        }
    }
    fn format_error_chain(
        fmt: &mut fmt::Formatter<'_>,
        mut error: &(dyn Error + '_),
    ) -> fmt::Result {
        // Write the error's own message. This is expected NOT to contain the sources itself.
        write!(fmt, "{error}")?;

        while let Some(source) = error.source() {
            error = source;
            write!(fmt, "\n\nCaused by:\n    {error}")?;
        }

        Ok(())
    }
}
