//! Facilities for decoding two-byte memory bus command words.
//!
//! A command word is made of two parts: `a`, which holds the high-order bits
//! of the address (conceptually bits 15 through 5), and the command byte `b`,
//! whose low three bits select the command and whose upper five bits supply
//! address bits 4 through 0.

use byteorder::ByteOrder;
use log::{debug, trace};
use std::fmt;
use std::io::{self, Write};

//===========================================================================//

/// A bus operation, as selected by the low three bits of a command byte.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BusCommand {
    /// Read from the address (command code 2).
    Read,
    /// Write to the address (command code 3).
    Write,
    /// Any other command code.  The value is the command byte masked with
    /// [`BusCommand::UNKNOWN_MASK`], which is what gets reported, rather than
    /// the full three-bit command field.
    Unknown(u8),
}

impl BusCommand {
    /// The mask selecting the command field of a command byte.
    pub const FIELD_MASK: u32 = 0b111;

    /// The mask applied to the command byte when reporting an unrecognized
    /// command.  Note that this is narrower than [`BusCommand::FIELD_MASK`].
    pub const UNKNOWN_MASK: u32 = 0b101;

    /// Decodes the command selected by the given command byte.  Bits above
    /// the command field are ignored.
    pub fn from_byte(b: u32) -> BusCommand {
        match b & BusCommand::FIELD_MASK {
            2 => BusCommand::Read,
            3 => BusCommand::Write,
            _ => BusCommand::Unknown((b & BusCommand::UNKNOWN_MASK) as u8),
        }
    }

    /// Returns the mnemonic for this command, or `None` if the command is
    /// unrecognized.
    pub fn mnemonic(self) -> Option<&'static str> {
        match self {
            BusCommand::Read => Some("RD"),
            BusCommand::Write => Some("WR"),
            BusCommand::Unknown(_) => None,
        }
    }
}

impl fmt::Display for BusCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusCommand::Unknown(mask) => write!(f, "?? (0x{mask:x})"),
            _ => f.write_str(self.mnemonic().unwrap_or_default()),
        }
    }
}

//===========================================================================//

/// A complete command word: the high address bits plus the command byte.
///
/// Neither field is range-checked.  Values wider than the conceptual field
/// widths flow through the address arithmetic unmasked, so they widen the
/// reconstructed address rather than wrapping it.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct CommandWord {
    /// The high-order address bits (conceptually address bits 15-5).
    pub a: u32,
    /// The command byte.
    pub b: u32,
}

impl CommandWord {
    /// The number of address bits supplied by the command byte.
    pub const LOW_ADDR_BITS: u32 = 5;

    /// Constructs a command word from its two parts.
    pub fn new(a: u32, b: u32) -> CommandWord {
        CommandWord { a, b }
    }

    /// Splits a raw 16-bit command word into its two bytes, as laid out in
    /// memory with byte order `E`.  The first byte becomes `a` and the second
    /// becomes the command byte.
    pub fn from_word<E: ByteOrder>(word: u16) -> CommandWord {
        let mut bytes = [0u8; 2];
        E::write_u16(&mut bytes, word);
        trace!("split word {word:#06x} into bytes {bytes:02x?}");
        CommandWord::new(u32::from(bytes[0]), u32::from(bytes[1]))
    }

    /// Returns the command selected by this word.
    pub fn command(self) -> BusCommand {
        BusCommand::from_byte(self.b)
    }

    /// Returns the address reconstructed from this word, i.e. `a` shifted
    /// left five bits, ORed with the top five bits of the command byte.
    pub fn addr(self) -> u64 {
        (u64::from(self.a) << CommandWord::LOW_ADDR_BITS)
            | u64::from(self.b >> (8 - CommandWord::LOW_ADDR_BITS))
    }
}

impl fmt::Display for CommandWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of address 0x{:04x}", self.command(), self.addr())
    }
}

//===========================================================================//

/// Returns the human-readable description of the given command word, without
/// a trailing newline.
pub fn describe(a: u32, b: u32) -> String {
    CommandWord::new(a, b).to_string()
}

/// Writes the description of the given command word to `writer` as a single
/// line.
pub fn write_decoded<W: Write>(
    writer: &mut W,
    a: u32,
    b: u32,
) -> io::Result<()> {
    writeln!(writer, "{}", decoded(a, b))
}

/// Decodes the given command word and prints its description to stdout.
pub fn decode(a: u32, b: u32) {
    println!("{}", decoded(a, b));
}

fn decoded(a: u32, b: u32) -> CommandWord {
    let word = CommandWord::new(a, b);
    debug!(
        "decoded a={a:#x} b={b:#x} as {:?} at {:#x}",
        word.command(),
        word.addr()
    );
    word
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::{BusCommand, CommandWord, describe, write_decoded};
    use byteorder::{BigEndian, LittleEndian};

    #[test]
    fn command_from_byte() {
        assert_eq!(BusCommand::from_byte(0b010), BusCommand::Read);
        assert_eq!(BusCommand::from_byte(0b011), BusCommand::Write);
        assert_eq!(BusCommand::from_byte(0b000), BusCommand::Unknown(0));
        assert_eq!(BusCommand::from_byte(0b111), BusCommand::Unknown(0b101));
        assert_eq!(BusCommand::from_byte(0b110), BusCommand::Unknown(0b100));
        assert_eq!(BusCommand::from_byte(0b1111_1010), BusCommand::Read);
    }

    #[test]
    fn command_display() {
        assert_eq!(BusCommand::Read.to_string(), "RD");
        assert_eq!(BusCommand::Write.to_string(), "WR");
        assert_eq!(BusCommand::Unknown(0).to_string(), "?? (0x0)");
        assert_eq!(BusCommand::Unknown(5).to_string(), "?? (0x5)");
    }

    #[test]
    fn display_matches_mnemonic() {
        for command in [BusCommand::Read, BusCommand::Write] {
            assert_eq!(Some(command.to_string().as_str()), command.mnemonic());
        }
        assert_eq!(BusCommand::Unknown(4).mnemonic(), None);
    }

    #[test]
    fn reconstructed_address() {
        assert_eq!(CommandWord::new(0, 0b010).addr(), 0x0000);
        assert_eq!(CommandWord::new(1, 0).addr(), 0x0020);
        assert_eq!(CommandWord::new(0, 0b1111_1000).addr(), 0x001f);
        assert_eq!(CommandWord::new(0x7ff, 0b1111_1010).addr(), 0xffff);
    }

    #[test]
    fn wide_inputs_are_not_masked() {
        assert_eq!(CommandWord::new(0x800, 0).addr(), 0x10000);
        assert_eq!(CommandWord::new(u32::MAX, 0).addr(), 0x1f_ffff_ffe0);
        assert_eq!(CommandWord::new(0, 0x100).addr(), 0x20);
        assert_eq!(describe(0x800, 0x102), "RD of address 0x10020");
    }

    #[test]
    fn describe_command_word() {
        assert_eq!(describe(0, 0b010), "RD of address 0x0000");
        assert_eq!(describe(0, 0b011), "WR of address 0x0000");
        assert_eq!(describe(1, 0b000), "?? (0x0) of address 0x0020");
        assert_eq!(describe(0x7ff, 0b1111_1010), "RD of address 0xffff");
    }

    #[test]
    fn write_decoded_line() {
        let mut output = Vec::<u8>::new();
        write_decoded(&mut output, 0x12, 0x4b).unwrap();
        write_decoded(&mut output, 0, 0x07).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "WR of address 0x0249\n?? (0x5) of address 0x0000\n"
        );
    }

    #[test]
    fn split_raw_word() {
        assert_eq!(
            CommandWord::from_word::<BigEndian>(0x1f3a),
            CommandWord::new(0x1f, 0x3a)
        );
        assert_eq!(
            CommandWord::from_word::<LittleEndian>(0x1f3a),
            CommandWord::new(0x3a, 0x1f)
        );
    }
}

//===========================================================================//
