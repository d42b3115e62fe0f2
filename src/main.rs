use busword::lex::parse_literal;
use busword::{CommandWord, decode, write_decoded};
use byteorder::{BigEndian, LittleEndian};
use clap::{Parser, Subcommand};
use num_bigint::BigUint;
use std::io;

//===========================================================================//

#[derive(Parser)]
#[clap(author, about, long_about = None, version)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decodes a command from its high address bits and its command byte.
    Decode {
        /// The high-order address bits (address bits 15 through 5).
        #[clap(allow_negative_numbers = true)]
        a: String,
        /// The command byte: bits 2-0 select the command, and bits 7-3 hold
        /// address bits 4 through 0.
        #[clap(allow_negative_numbers = true)]
        b: String,
    },
    /// Decodes a raw 16-bit command word.
    Word {
        /// The command word.  By default its first byte in memory (the high
        /// byte) holds the address bits, and the second holds the command.
        #[clap(allow_negative_numbers = true)]
        word: String,
        /// Lay the word out in memory as little-endian instead.
        #[clap(long)]
        little_endian: bool,
    },
}

//===========================================================================//

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn"),
    )
    .init();
    let cli = Cli::parse();
    match cli.command {
        Command::Decode { a, b } => {
            decode(parse_arg("A", &a)?, parse_arg("B", &b)?);
            Ok(())
        }
        Command::Word { word, little_endian } => {
            let word: u16 = parse_arg("WORD", &word)?;
            let word = if little_endian {
                CommandWord::from_word::<LittleEndian>(word)
            } else {
                CommandWord::from_word::<BigEndian>(word)
            };
            write_decoded(&mut io::stdout().lock(), word.a, word.b)
        }
    }
}

fn parse_arg<T: TryFrom<BigUint>>(name: &str, arg: &str) -> io::Result<T> {
    parse_literal(arg).map_err(|error| {
        io::Error::new(io::ErrorKind::InvalidInput, format!("{name}: {error}"))
    })
}

//===========================================================================//
