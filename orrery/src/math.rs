//! Mathematical utilities and decisions.

#[doc(inline)]
pub use orrery_base::math::*;

// Macros are exported at the crate root; pull them into this module.
#[doc(inline)]
pub use orrery_base::notnan;
