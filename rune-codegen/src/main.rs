//! binary codegen tool.
//!
//! Compiles a glyph definition file and writes the C header or the C data
//! tables for it, or runs a whole generation plan.

use std::path::PathBuf;

use clap::Parser;
use rune_codegen::{Artifact, CodegenPlan, Config, Options, Source};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Prefix for every generated name
    #[arg(long, global = true, default_value = "RUNE")]
    prefix: String,

    /// Fail if the input has any problems, instead of warning
    #[arg(long, global = true)]
    deny_diagnostics: bool,

    /// Log more; may be repeated
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            options: Options {
                prefix: self.prefix.clone(),
            },
            deny_diagnostics: self.deny_diagnostics,
        }
    }
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Write the header declaring each glyph's index, metrics, offset and size
    Header(IoArgs),
    /// Write the offset, size and encoded data tables
    Data(IoArgs),
    /// Compile the input and report problems, without writing anything
    Check {
        /// The glyph definitions; reads stdin if omitted or '-'
        input: Option<PathBuf>,
    },
    /// Generate every file described by a TOML plan
    Plan {
        /// The plan file
        plan: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
struct IoArgs {
    /// The glyph definitions; reads stdin if omitted or '-'
    input: Option<PathBuf>,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> miette::Result<()> {
    let args = Args::parse();

    let default_level = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = args.config();

    match args.command {
        Command::Header(io) => emit(Artifact::Header, io, &config),
        Command::Data(io) => emit(Artifact::Data, io, &config),
        Command::Check { input } => {
            println!("{}", check(input, &config)?);
            Ok(())
        }
        Command::Plan { plan } => CodegenPlan::load(&plan)?.run(&config),
    }
}

fn emit(artifact: Artifact, io: IoArgs, config: &Config) -> miette::Result<()> {
    let source = Source::read(io.input.as_deref())?;
    let generated = source.generate(artifact, config)?;
    match io.output {
        Some(path) => {
            log::info!("writing {} bytes to {}", generated.len(), path.display());
            rune_codegen::write_contents(&path, &generated)
        }
        None => {
            print!("{generated}");
            Ok(())
        }
    }
}

fn check(input: Option<PathBuf>, config: &Config) -> miette::Result<String> {
    let source = Source::read(input.as_deref())?;
    let compilation = source.compile(config)?;
    Ok(format!(
        "{}: {} glyphs, {} bytes of data, {} problem(s)",
        source.name(),
        compilation.layout().len(),
        compilation.total_size(),
        compilation.diagnostics().len()
    ))
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn output_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("digits.txt");
        std::fs::write(&input, rune_test_data::DIGITS).unwrap();
        let output = dir.path().join("generated/runes.h");

        let args = Args::try_parse_from([
            OsStr::new("codegen"),
            OsStr::new("header"),
            input.as_os_str(),
            OsStr::new("-o"),
            output.as_os_str(),
        ])
        .unwrap();
        let config = args.config();
        let Command::Header(io) = args.command else {
            panic!("expected the header subcommand");
        };
        emit(Artifact::Header, io, &config).unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(written, rune_test_data::digits::HEADER);
    }

    #[test]
    fn check_summary() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.txt");
        std::fs::write(&input, rune_test_data::BROKEN).unwrap();

        let args =
            Args::try_parse_from([OsStr::new("codegen"), OsStr::new("check"), input.as_os_str()])
                .unwrap();
        let config = args.config();
        let Command::Check { input } = args.command else {
            panic!("expected the check subcommand");
        };
        let name = input.as_ref().unwrap().display().to_string();
        let summary = check(input, &config).unwrap();
        assert_eq!(
            summary,
            format!("{name}: 4 glyphs, 8 bytes of data, 7 problem(s)")
        );
    }

    #[test]
    fn check_with_denied_diagnostics_fails() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.txt");
        std::fs::write(&input, rune_test_data::BROKEN).unwrap();

        let args = Args::try_parse_from([
            OsStr::new("codegen"),
            OsStr::new("--deny-diagnostics"),
            OsStr::new("check"),
            input.as_os_str(),
        ])
        .unwrap();
        let config = args.config();
        let Command::Check { input } = args.command else {
            panic!("expected the check subcommand");
        };
        assert!(check(input, &config).is_err());
    }

    #[test]
    fn global_options() {
        let args =
            Args::try_parse_from(["codegen", "data", "-", "--prefix", "GLYPH", "-vv"]).unwrap();
        assert_eq!(args.prefix, "GLYPH");
        assert_eq!(args.verbose, 2);
        assert!(!args.deny_diagnostics);
    }
}
