//! Helpers for programs which install a [`log`] logger.

/// Provides the recommended log filter for programs which want to exclude particularly noisy
/// details of Orrery's dependencies.
///
/// The guiding principle for this filtering is that at [`log::Level::Debug`] or lower level,
/// there should be no messages produced every tick unless something is wrong.
/// Per-tick and per-contact details from Orrery itself are logged at
/// [`log::Level::Trace`] under the target [`STEP_TARGET`].
#[allow(clippy::missing_inline_in_public_items)]
pub fn standard_filter(metadata: &log::Metadata<'_>) -> bool {
    let target = metadata.target();

    !(target.starts_with("tracing::span")  // logs every single tracing span
        || target.starts_with("rayon")) // noisy
}

/// [`log`] target used by the step engine for per-tick details.
pub const STEP_TARGET: &str = "orrery::step";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter() {
        assert!(!standard_filter(
            &log::Metadata::builder().target("tracing::span::active").build()
        ));
        assert!(standard_filter(
            &log::Metadata::builder()
                .target("orrery::scene")
                .level(log::Level::Debug)
                .build()
        ));
        assert!(standard_filter(
            &log::Metadata::builder().target("some_random_crate").build()
        ));
    }
}
