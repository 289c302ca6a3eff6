//! `bankgiro` — seal, inspect and normalize Bankgiro files.
//!
//! Thin shell over `bankgiro-core`: binds arguments and `BG_SEAL_*`
//! environment variables, reads and writes files, and installs the log
//! subscriber. Logs go to stderr (`RUST_LOG`, default `info`); report
//! output goes to stdout.

use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use bankgiro_core::{encoding, AutogiroFile, HashAlgorithm, OutgoingFile, PartialParse};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bankgiro", version)]
#[command(about = "Seal and validate Bankgiro files with HMAC")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Seal a file with a given key
    #[command(visible_alias = "s")]
    Seal(SealArgs),
    /// Parse an Autogiro file and report its sections
    Inspect {
        /// File to inspect
        file: PathBuf,
    },
    /// Write the exact bytes the seal is computed over to stdout
    Normalize(NormalizeArgs),
}

#[derive(Args, Debug)]
struct SealArgs {
    /// File to seal
    file: PathBuf,
    /// Key to seal the file with (32 hex chars)
    #[arg(short, long, env = "BG_SEAL_KEY", hide_env_values = true)]
    key: String,
    /// KVV to check the key against (optional)
    #[arg(short = 'v', long, env = "BG_SEAL_KVV")]
    kvv: Option<String>,
    /// Output file, default is <FILE>-signed
    #[arg(short, long, env = "BG_SEAL_OUTPUT")]
    output: Option<PathBuf>,
    /// Overwrite the output file if it exists
    #[arg(short = 'f', long, env = "BG_SEAL_OVERWRITE")]
    overwrite: bool,
    /// Seal date as YYMMDD, default is today
    #[arg(long, env = "BG_SEAL_DATE")]
    seal_date: Option<String>,
    /// Hash under the HMAC: sha256, sha1 or sha512
    #[arg(long, env = "BG_SEAL_ALGORITHM", default_value_t = HashAlgorithm::Sha256)]
    algorithm: HashAlgorithm,
}

#[derive(Args, Debug)]
struct NormalizeArgs {
    /// File to normalize
    file: PathBuf,
    /// Seal date used in the synthetic header, default is today
    #[arg(long, env = "BG_SEAL_DATE")]
    seal_date: Option<String>,
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Seal(args) => {
            let output = seal(&args)?;
            println!("File saved to {}", output.display());
            Ok(ExitCode::SUCCESS)
        }
        Command::Inspect { file } => {
            let clean = inspect(&file, &mut io::stdout().lock())?;
            Ok(if clean {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Normalize(args) => {
            let normalized = normalize(&args)?;
            io::stdout().lock().write_all(&normalized)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// `<file>-signed` next to the input.
fn default_output(file: &Path) -> PathBuf {
    let mut name = OsString::from(file.as_os_str());
    name.push("-signed");
    PathBuf::from(name)
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        bail!("{} does not exist", path.display());
    }
    fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

fn seal(args: &SealArgs) -> Result<PathBuf> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output(&args.file));
    if output.exists() && !args.overwrite {
        bail!("{} already exists, use -f to overwrite", output.display());
    }
    info!(output = %output.display(), "output set");

    let raw = read_input(&args.file)?;
    let mut file = OutgoingFile::from_bytes(&raw)
        .with_context(|| format!("failed to decode {}", args.file.display()))?;
    file.set_hash_algorithm(args.algorithm);
    file.set_seal_key(&args.key)?;
    match &args.kvv {
        Some(kvv) => file.check_kvv(kvv)?,
        None => warn!("no KVV provided, no validation will be done on key"),
    }
    if let Some(date) = &args.seal_date {
        file.set_seal_date(date)?;
    }

    let sealed = file.sign()?;
    info!(
        kvv = %sealed.kvv_bg_format(),
        mac = %sealed.mac_bg_format(),
        "file signed successfully"
    );

    fs::write(&output, sealed.signed_content())
        .with_context(|| format!("failed to write {}", output.display()))?;
    Ok(output)
}

/// Report every section. Returns `false` after a fatal parse error.
fn inspect(path: &Path, out: &mut impl Write) -> Result<bool> {
    let raw = read_input(path)?;
    let text = encoding::decode(&raw)
        .with_context(|| format!("failed to decode {}", path.display()))?;

    let (file, failure) = match AutogiroFile::parse(&text) {
        Ok(file) => (file, None),
        Err(PartialParse { error, file }) => (*file, Some(error)),
    };
    report(&file, out)?;

    match failure {
        Some(error) => {
            writeln!(out, "error: {error}")?;
            Ok(false)
        }
        None => Ok(true),
    }
}

fn report(file: &AutogiroFile, out: &mut impl Write) -> io::Result<()> {
    let envelope = if file.has_hmac_envelope() {
        "sealed"
    } else if file.hmac_start_found() {
        "header only"
    } else {
        "none"
    };
    writeln!(out, "rows: {}", file.content().len())?;
    writeln!(out, "hmac envelope: {envelope}")?;
    if let Some(footer) = file.hmac_footer() {
        writeln!(out, "hmac footer: {}", footer.trim_end())?;
    }

    for (index, section) in file.sections().iter().enumerate() {
        let (code, name) = section
            .section_type()
            .map_or(("?", "?"), |t| (t.code, t.name));
        writeln!(out, "section {}: {code} ({name})", index + 1)?;
        writeln!(out, "  customer number: {}", section.customer_number().unwrap_or("-"))?;
        writeln!(out, "  account number:  {}", section.account_number().unwrap_or("-"))?;
        writeln!(out, "  rows: {}", section.rows().len())?;
        writeln!(out, "  complete: {}", section.is_complete())?;
        writeln!(out, "  section seal: {}", section.section_seal().is_some())?;
        for issue in section.issues() {
            writeln!(out, "  issue: {issue}")?;
        }
    }
    Ok(())
}

fn normalize(args: &NormalizeArgs) -> Result<Vec<u8>> {
    let raw = read_input(&args.file)?;
    let mut file = OutgoingFile::from_bytes(&raw)
        .with_context(|| format!("failed to decode {}", args.file.display()))?;
    if let Some(date) = &args.seal_date {
        file.set_seal_date(date)?;
    }
    Ok(file.sealer().normalized_content().to_vec())
}
