//! Primitives shared by the builder, finder and codec: the alphabet, the
//! digest adapter, the reduction function and the pure chain walk. Nothing
//! in this crate touches a lock, a thread or a file -- that all lives in
//! `raintable-cpu`, which depends on this crate.

mod alphabet;
mod chain;
mod ctx;
mod error;
mod hash;
mod password;
mod reduction;

pub use alphabet::{Charset, DEFAULT_CHARSET, MAX_CHARSET_LENGTH};
pub use chain::build_chain;
pub use ctx::{RainbowTableCtx, DEFAULT_CHAIN_LENGTH, DEFAULT_PASSWORD_LENGTH};
pub use error::{RainbowError, RainbowResult};
pub use hash::{DigestBytes, HashKind, MAX_DIGEST_LENGTH};
pub use password::{Password, MAX_PASSWORD_LENGTH};
pub use reduction::{cantor, ReductionKind};
