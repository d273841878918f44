use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use float16_array::Float16Array;
use float16_codec::{decode, encode, is_nan_bits, EXPONENT_MASK, MANTISSA_MASK, SIGN_MASK};

/// Inspect how values are stored as IEEE 754 half-precision numbers
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the binary16 encoding of each value
    Encode {
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,
    },
    /// Decode raw binary16 words given in hex (`3c00`, `0x7e00`)
    Decode {
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Build an array from the values and print it
    Array {
        #[arg(allow_negative_numbers = true)]
        values: Vec<f64>,

        /// Sort before printing
        #[arg(long, default_value_t = false)]
        sort: bool,

        /// Print en-US formatted values
        #[arg(long, default_value_t = false)]
        locale: bool,

        /// Print as JSON instead of a joined list
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let args = Args::parse();
    tracing::debug!(?args, "starting");

    match args.command {
        Command::Encode { values } => {
            for value in values {
                let bits = encode(value);
                println!("{:<24} {:#06x}  {}  -> {}", value, bits, fields(bits), decode(bits));
            }
        }
        Command::Decode { words } => {
            for word in &words {
                let bits = parse_word(word)?;
                println!("{:#06x}  {}  -> {}", bits, fields(bits), decode(bits));
            }
        }
        Command::Array {
            values,
            sort,
            locale,
            json,
        } => {
            let array = Float16Array::of(&values);
            if sort {
                array.sort()?;
            }

            if json {
                println!("{}", serde_json::to_string(&array)?);
            } else if locale {
                println!("{}", array.to_locale_string()?);
            } else {
                println!("[{}]", array.join(Some(", "))?);
            }
            println!("{} elements, {} bytes", array.len(), array.byte_length());
        }
    }

    Ok(())
}

fn parse_word(text: &str) -> Result<u16> {
    let digits = text.trim_start_matches("0x").trim_start_matches("0X");
    u16::from_str_radix(digits, 16).with_context(|| format!("invalid binary16 word: {}", text))
}

/// `sign exponent mantissa` as bit strings, with a NaN marker.
fn fields(bits: u16) -> String {
    let sign = u16::from(bits & SIGN_MASK != 0);
    let exponent = (bits & EXPONENT_MASK) >> 10;
    let mantissa = bits & MANTISSA_MASK;
    let marker = if is_nan_bits(bits) { " (NaN)" } else { "" };
    format!("{} {:05b} {:010b}{}", sign, exponent, mantissa, marker)
}
