/// I/O operations for reading and writing dump text

/// Hex-dump text codec
pub mod hexdump;
/// Reader for dump files and streams
pub mod reader;
/// Writer for dump files and streams
pub mod writer;

pub use hexdump::{decode, decode_with, encode};
pub use reader::{read_dump, read_dump_from};
pub use writer::{write_dump, write_dump_to};
