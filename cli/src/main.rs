use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    thread,
};

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{bail, Context, Result};
use crossterm::style::{style, Color, Stylize};
use raintable_commons::{DigestBytes, HashKind, Password};
use raintable_cpu::RainbowTableCtxBuilder;

/// Build or search a rainbow table for short passwords over a fixed alphabet.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Build a new table instead of searching an existing one.
    #[clap(short = 'g', long)]
    generate: bool,

    /// Path to the table file, read in crack mode, written in generate mode.
    #[clap(short = 't', long, default_value = "table.txt")]
    table: PathBuf,

    /// A file of newline-separated passwords; switches generation to dictionary mode.
    #[clap(short = 'p', long)]
    passwords: Option<PathBuf>,

    /// Write the text format instead of the binary one (generate mode only).
    #[clap(long)]
    text: bool,

    /// Worker thread count. Defaults to the available hardware parallelism.
    #[clap(long)]
    threads: Option<usize>,

    /// Target row count (generate mode, random seed generation only).
    #[clap(long, default_value_t = 10_000)]
    vertical: u64,

    /// Chain length.
    #[clap(long, default_value_t = raintable_commons::DEFAULT_CHAIN_LENGTH)]
    horizontal: u32,

    /// Password length.
    #[clap(long, default_value_t = raintable_commons::DEFAULT_PASSWORD_LENGTH)]
    length: usize,

    /// Hash function the table is built around.
    #[clap(long, value_enum, default_value_t = HashArg::Sha256)]
    hash: HashArg,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum HashArg {
    Sha1,
    Sha256,
    Blake512,
}

impl From<HashArg> for HashKind {
    fn from(arg: HashArg) -> Self {
        match arg {
            HashArg::Sha1 => HashKind::Sha1,
            HashArg::Sha256 => HashKind::Sha256,
            HashArg::Blake512 => HashKind::Blake2b512,
        }
    }
}

impl std::fmt::Display for HashArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            HashArg::Sha1 => "sha1",
            HashArg::Sha256 => "sha256",
            HashArg::Blake512 => "blake512",
        };
        f.write_str(name)
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let threads = cli
        .threads
        .unwrap_or_else(|| thread::available_parallelism().map(|n| n.get()).unwrap_or(1));

    if cli.generate {
        generate(&cli, threads)
    } else {
        crack(&cli, threads)
    }
}

fn generate(cli: &Cli, threads: usize) -> Result<()> {
    let ctx = RainbowTableCtxBuilder::new()
        .hash(cli.hash.into())
        .chain_length(cli.horizontal)
        .password_length(cli.length)
        .vertical(cli.vertical)
        .build()
        .wrap_err("Invalid table parameters")?;

    let table = if let Some(passwords_path) = &cli.passwords {
        let seeds = read_seed_list(passwords_path, cli.length)?;
        raintable_cpu::build_from_seeds(ctx, threads, seeds, None)
            .wrap_err("Failed to build the table from the given password list")?
    } else {
        raintable_cpu::build(ctx, threads, None).wrap_err("Failed to build the table")?
    };

    if cli.text {
        raintable_cpu::save_text(&cli.table, &table).wrap_err("Failed to save the table")?;
    } else {
        raintable_cpu::save_binary(&cli.table, &table).wrap_err("Failed to save the table")?;
    }

    println!(
        "{}",
        style(format!(
            "Wrote {} rows to {}",
            table.len(),
            cli.table.display()
        ))
        .with(Color::Green)
    );

    Ok(())
}

fn crack(cli: &Cli, threads: usize) -> Result<()> {
    let table = raintable_cpu::load(&cli.table).wrap_err("Failed to load the table")?;
    let width = table.ctx().hash.output_width();

    let stdin = io::stdin();
    print!("> ");
    io::stdout().flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();

        if line == "exit" {
            break;
        }

        match parse_target(line, width) {
            Ok(target) => match raintable_cpu::find(&table, &target, threads) {
                Some(password) => println!("{}", style(password.to_string()).with(Color::Green)),
                None => eprintln!("{}", "No password found for the given hash".red()),
            },
            Err(e) => eprintln!("{}", format!("{e:#}").red()),
        }

        print!("> ");
        io::stdout().flush()?;
    }

    Ok(())
}

fn parse_target(hex_line: &str, width: usize) -> Result<DigestBytes> {
    let bytes = hex::decode(hex_line).wrap_err("The provided hexadecimal string is not valid")?;
    if bytes.len() != width {
        bail!("Expected a {width}-byte digest, got {} bytes", bytes.len());
    }
    Ok(bytes.as_slice().try_into().expect("length checked above"))
}

fn read_seed_list(path: &PathBuf, password_length: usize) -> Result<Vec<Password>> {
    let contents = std::fs::read_to_string(path).wrap_err("Failed to read the password list")?;
    let mut seeds = Vec::new();

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.len() != password_length {
            bail!(
                "Password {line:?} has length {}, expected {password_length}",
                line.len()
            );
        }
        seeds.push(Password::new(line.as_bytes()));
    }

    if seeds.is_empty() {
        bail!("The password list is empty");
    }

    Ok(seeds)
}
