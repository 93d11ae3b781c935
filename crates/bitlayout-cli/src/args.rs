//! Command-line parsing for the demo binary.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use bitlayout::{abi::Abi, width::Width};

pub const USAGE: &str = "\
usage: bitlayout <command> [args]

commands:
  bits <value> [--width 8|16|32|64] [--group N]   inspect the bits of a value
  layout <file.json> [--abi NAME] [--json]         lay out a record described in JSON
  demo-layout [--abi NAME]                         lay out char/int/char/double/char
  pack <alpha> <red> <green> <blue>                pack channels into an ARGB word
  unpack <word>                                    split an ARGB word into channels
  set-channel <word> <channel> <value>             replace one channel of a word

numbers accept decimal, 0x hex and 0b binary; ABI names are lp64, llp64, ilp32";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Bits {
        value: u64,
        width: Option<Width>,
        group: usize,
    },
    Layout {
        path: PathBuf,
        abi: Option<Abi>,
        json: bool,
    },
    DemoLayout {
        abi: Option<Abi>,
    },
    Pack {
        alpha: i32,
        red: i32,
        green: i32,
        blue: i32,
    },
    Unpack {
        word: u32,
    },
    SetChannel {
        word: u32,
        channel: String,
        value: i32,
    },
    Help,
}

/// Parses an unsigned number written in decimal, `0x` hex or `0b` binary.
pub fn parse_number(text: &str) -> Result<u64> {
    let cleaned = text.replace('_', "");
    let parsed = if let Some(hex) = cleaned.strip_prefix("0x").or(cleaned.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16)
    } else if let Some(bin) = cleaned.strip_prefix("0b").or(cleaned.strip_prefix("0B")) {
        u64::from_str_radix(bin, 2)
    } else {
        cleaned.parse::<u64>()
    };

    parsed.with_context(|| format!("invalid number `{text}`"))
}

fn parse_signed(text: &str) -> Result<i32> {
    match text.strip_prefix('-') {
        Some(rest) => {
            let magnitude = i64::try_from(parse_number(rest)?)?;
            i32::try_from(-magnitude).with_context(|| format!("`{text}` does not fit in an int"))
        }
        None => i32::try_from(parse_number(text)?)
            .with_context(|| format!("`{text}` does not fit in an int")),
    }
}

fn parse_word(text: &str) -> Result<u32> {
    u32::try_from(parse_number(text)?).with_context(|| format!("`{text}` does not fit in 32 bits"))
}

fn parse_abi(text: &str) -> Result<Abi> {
    text.parse::<Abi>().map_err(|e| anyhow!(e))
}

/// Splits `--flag value` options from positional arguments.
struct Options {
    positional: Vec<String>,
    width: Option<String>,
    group: Option<String>,
    abi: Option<String>,
    json: bool,
}

impl Options {
    fn collect(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut options = Options {
            positional: Vec::new(),
            width: None,
            group: None,
            abi: None,
            json: false,
        };

        while let Some(arg) = args.next() {
            let slot = match arg.as_str() {
                "--width" => &mut options.width,
                "--group" => &mut options.group,
                "--abi" => &mut options.abi,
                "--json" => {
                    options.json = true;
                    continue;
                }
                flag if flag.starts_with("--") => bail!("unknown option `{flag}`"),
                _ => {
                    options.positional.push(arg.clone());
                    continue;
                }
            };

            let value = args
                .next()
                .with_context(|| format!("`{arg}` expects a value"))?;
            *slot = Some(value);
        }

        Ok(options)
    }

    fn expect_positional(&self, count: usize, command: &str) -> Result<()> {
        if self.positional.len() != count {
            bail!(
                "`{command}` takes {count} argument(s), got {}",
                self.positional.len()
            );
        }

        Ok(())
    }

    fn abi(&self) -> Result<Option<Abi>> {
        self.abi.as_deref().map(parse_abi).transpose()
    }
}

pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Command> {
    let mut args = args.into_iter();
    let Some(command) = args.next() else {
        return Ok(Command::Help);
    };

    let options = Options::collect(args)?;
    let p = &options.positional;

    match command.as_str() {
        "bits" => {
            options.expect_positional(1, "bits")?;
            let width = options
                .width
                .as_deref()
                .map(|w| {
                    let bits = usize::try_from(parse_number(w)?)?;
                    Width::try_from(bits).map_err(|e| anyhow!(e))
                })
                .transpose()?;
            let group = match options.group.as_deref() {
                Some(g) => usize::try_from(parse_number(g)?)?,
                None => 4,
            };

            Ok(Command::Bits {
                value: parse_number(&p[0])?,
                width,
                group,
            })
        }
        "layout" => {
            options.expect_positional(1, "layout")?;
            Ok(Command::Layout {
                path: PathBuf::from(&p[0]),
                abi: options.abi()?,
                json: options.json,
            })
        }
        "demo-layout" => {
            options.expect_positional(0, "demo-layout")?;
            Ok(Command::DemoLayout {
                abi: options.abi()?,
            })
        }
        "pack" => {
            options.expect_positional(4, "pack")?;
            Ok(Command::Pack {
                alpha: parse_signed(&p[0])?,
                red: parse_signed(&p[1])?,
                green: parse_signed(&p[2])?,
                blue: parse_signed(&p[3])?,
            })
        }
        "unpack" => {
            options.expect_positional(1, "unpack")?;
            Ok(Command::Unpack {
                word: parse_word(&p[0])?,
            })
        }
        "set-channel" => {
            options.expect_positional(3, "set-channel")?;
            Ok(Command::SetChannel {
                word: parse_word(&p[0])?,
                channel: p[1].clone(),
                value: parse_signed(&p[2])?,
            })
        }
        "help" | "-h" | "--help" => Ok(Command::Help),
        other => bail!("unknown command `{other}`"),
    }
}
