//! Console demos for the `bitlayout` toolkit.
//!
//! Each subcommand is a thin wrapper: parse arguments, call the library, print.
//! Diagnostics go to stderr through `tracing` (`RUST_LOG=debug` to see them);
//! results go to stdout.

mod args;
mod config;

use std::{fs, process::ExitCode};

use anyhow::{Context, Result};
use bitlayout::{
    abi::{Abi, Primitive},
    bits::BitValue,
    color::{self, Channel},
    field::FieldDescriptor,
    layout::{LayoutReport, compute_layout, reorder_for_size},
    serde::LayoutDef,
    width::Width,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::{
    args::{Command, USAGE},
    config::Config,
};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_bits(value: u64, width: Option<Width>, group: usize) {
    let width = width.unwrap_or_else(|| Width::fitting(value));
    let bits = BitValue::new(value, width);
    if bits.raw() != value {
        info!(value, width = width.bits(), "value truncated to width");
    }

    println!("value    {} (0x{:X})", bits.raw(), bits.raw());
    println!("width    {} bits", width.bits());
    println!("binary   {}", bits.to_binary_string(group));
    println!("signed   {}", bits.sign_extend());
    println!("ones     {}", bits.count_ones());
    println!("pow2     {}", bits.is_power_of_two());
    println!("reversed {}", bits.reverse_bits().to_binary_string(group));

    let set: Vec<String> = (0..width.bits())
        .filter(|&i| bits.get_bit(i).unwrap_or(false))
        .map(|i| i.to_string())
        .collect();
    println!("set bits [{}]", set.join(", "));
}

fn print_layout(report: &LayoutReport, abi: Abi, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("ABI {abi}");
        println!("{report}");
    }

    Ok(())
}

fn demo_fields(abi: Abi) -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::primitive("c1", Primitive::Char, abi),
        FieldDescriptor::primitive("i", Primitive::Int, abi),
        FieldDescriptor::primitive("c2", Primitive::Char, abi),
        FieldDescriptor::primitive("d", Primitive::Double, abi),
        FieldDescriptor::primitive("c3", Primitive::Char, abi),
    ]
}

/// Runs one command. `load_config` is only called by commands that need an ABI.
fn run(command: Command, load_config: impl FnOnce() -> Result<Config>) -> Result<()> {
    match command {
        Command::Help => println!("{USAGE}"),
        Command::Bits {
            value,
            width,
            group,
        } => print_bits(value, width, group),
        Command::Layout { path, abi, json } => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            let def: LayoutDef = serde_json::from_str(&text)
                .with_context(|| format!("parsing {}", path.display()))?;

            let config = load_config()?;
            let resolved = def.resolve_abi(abi, config.default_abi);
            debug!(abi = %resolved, fields = def.fields.len(), "computing layout");

            let report = def
                .compute_with(abi, config.default_abi)
                .with_context(|| format!("laying out {}", path.display()))?;
            print_layout(&report, resolved, json)?;
        }
        Command::DemoLayout { abi } => {
            let abi = load_config()?.resolve_abi(abi);
            debug!(%abi, "demo layout");

            let fields = demo_fields(abi);
            let report = compute_layout(&fields)?;
            print_layout(&report, abi, false)?;

            let reordered = compute_layout(&reorder_for_size(&fields))?;
            println!();
            println!("reordered by alignment:");
            println!("{reordered}");
        }
        Command::Pack {
            alpha,
            red,
            green,
            blue,
        } => {
            let word = color::pack(alpha, red, green, blue)?;
            println!("0x{word:08X}");
            println!("{}", BitValue::from(word).to_binary_string(8));
        }
        Command::Unpack { word } => {
            let quad = color::unpack(word);
            for channel in Channel::ALL {
                println!("{:<5} {:>3}", channel.name(), quad.get(channel));
            }
            println!("{quad}");
        }
        Command::SetChannel {
            word,
            channel,
            value,
        } => {
            let updated = color::set_channel(word, &channel, value)?;
            println!("0x{word:08X} -> 0x{updated:08X}");
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    init_tracing();

    let result = args::parse(std::env::args().skip(1)).and_then(|command| {
        debug!(?command, "parsed arguments");
        run(command, Config::from_env)
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
