//! The stateful half of the engine: building tables, persisting them and
//! searching them for a preimage. The pure, lock-free primitives (alphabet,
//! digest, reduction, chain walk) live in `raintable-commons`; everything
//! here coordinates threads, files and progress reporting around them.

mod builder;
mod codec;
mod ctx_builder;
mod error;
mod event;
mod finder;
mod table;

pub use builder::{build, build_from_seeds};
pub use codec::{load, save_binary, save_text};
pub use ctx_builder::RainbowTableCtxBuilder;
pub use error::{RainbowError, RainbowResult};
pub use event::Event;
pub use finder::find;
pub use table::{RowMap, Table};
