//! Decoder for two-byte memory bus command words.

#![warn(missing_docs)]

pub mod lex;
pub mod word;

pub use word::{BusCommand, CommandWord, decode, describe, write_decoded};
