//! The error type for this crate lives in `raintable-commons` (it is shared
//! with the context builder there); this module just re-exports it under
//! the name the rest of this crate uses.
pub use raintable_commons::{RainbowError, RainbowResult};
