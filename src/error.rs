//! Error types for building, reading and applying huffman tables.

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = core::result::Result<T, HuffError>;

#[derive(Debug, Error)]
pub enum HuffError {
    /// The frequency table has no nonzero entries.
    #[error("no symbols to build a huffman tree from")]
    EmptyInput,

    /// A nonzero count sits beyond the 8 bit symbol space.
    #[error("frequency table has {symbols} entries, only 256 symbols can be coded")]
    InputTooLarge { symbols: usize },

    /// A serialized table breaks the record layout.
    #[error("malformed huffman table at word {word}: {reason}")]
    MalformedTable { word: usize, reason: &'static str },

    /// A payload byte has no code in the table.
    #[error("symbol {0} has no code in this table")]
    UnknownSymbol(u8),

    /// The encoded stream ran out in the middle of a symbol.
    #[error("unexpected end of stream after {decoded} symbols")]
    UnexpectedEof { decoded: usize },

    /// A symbol was seen more often than a u32 count can hold.
    #[error("symbol {symbol} occurs {count} times, counts are limited to u32")]
    CountOverflow { symbol: u8, count: u64 },

    /// Decoding the packed payload did not give back the input.
    #[error("decoded data differs from the input at byte {offset}")]
    RoundTripMismatch { offset: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
