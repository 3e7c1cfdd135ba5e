//! Interpreter core for the Universal Machine.
//!
//! A [`loader`] turns a byte stream into a program image, an [`Engine`]
//! executes it against an [`heap::ArrayHeap`] and [`register::RegisterFile`]
//! through some [`io::IoPort`], and [`error::Error`] carries every way a run
//! can fail short of a normal halt.

pub mod constants;
pub mod decode;
pub mod engine;
pub mod error;
pub mod heap;
pub mod io;
pub mod loader;
pub mod register;

pub use engine::Engine;
pub use error::{Error, InvalidOperationKind};
pub use io::{stdio, BufferedIo, IoPort};
pub use loader::load_image;

/// A single 32-bit platter: an instruction, a register value, or an array
/// element. The machine makes no distinction between these at the type
/// level, following the specification's own terminology.
pub type Word = u32;
