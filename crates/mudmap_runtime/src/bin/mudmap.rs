//! mudmap CLI entry point.

use mudmap_codegen::GeneratorConfig;
use mudmap_history::HistoryConfig;
use mudmap_runtime::{FileStore, Persistence, Repl, Session, SessionConfig};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    files: Vec<PathBuf>,
    data_dir: Option<PathBuf>,
    archive_name: Option<String>,
    history_cap: Option<usize>,
    raw_strings: bool,
    batch_mode: bool,
    show_help: bool,
    show_version: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn value_of<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, Box<dyn std::error::Error>> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires a value").into())
}

fn parse_args(args: &[String]) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-b" | "--batch" => config.batch_mode = true,
            "--raw-strings" => config.raw_strings = true,
            "-d" | "--data-dir" => {
                i += 1;
                config.data_dir = Some(PathBuf::from(value_of(args, i, "--data-dir")?));
            }
            "-o" | "--archive" => {
                i += 1;
                config.archive_name = Some(value_of(args, i, "--archive")?.to_string());
            }
            "--history-cap" => {
                i += 1;
                let value = value_of(args, i, "--history-cap")?;
                config.history_cap = Some(
                    value
                        .parse()
                        .map_err(|_| format!("invalid --history-cap value: {value}"))?,
                );
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}").into());
            }
            path => config.files.push(PathBuf::from(path)),
        }
        i += 1;
    }

    Ok(config)
}

fn session_config(cli: &CliConfig) -> SessionConfig {
    let mut config = SessionConfig::new()
        .with_data_dir(cli.data_dir.clone().unwrap_or_else(SessionConfig::data_dir_from_env))
        .with_generator(GeneratorConfig::default().with_escaping(!cli.raw_strings));
    if let Some(cap) = cli.history_cap {
        config = config.with_history(HistoryConfig::new().with_capacity(cap));
    }
    if let Some(name) = &cli.archive_name {
        config = config.with_archive_name(name.clone());
    }
    config
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let cli = parse_args(&args)?;

    if cli.show_help {
        print_help();
        return Ok(());
    }

    if cli.show_version {
        println!("mudmap {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = session_config(&cli);
    let persistence = Persistence::new(FileStore::new(config.data_dir.clone()));
    let session = Session::open(config, persistence)?;

    let mut repl = Repl::new(session)?;

    for file in &cli.files {
        repl.eval_file(file)?;
    }

    if cli.batch_mode {
        return Ok(());
    }

    // A script already set the scene.
    if !cli.files.is_empty() {
        repl = repl.without_banner();
    }

    repl.run()?;
    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1mmudmap\x1b[0m - Room map editor for LPC MUDs

\x1b[1mUSAGE:\x1b[0m
    mudmap [OPTIONS] [FILES...]

\x1b[1mARGUMENTS:\x1b[0m
    [FILES...]    Command files to run before starting the shell

\x1b[1mOPTIONS:\x1b[0m
    -h, --help             Print help information
    -V, --version          Print version information
    -b, --batch            Run files and exit (no shell)
    -d, --data-dir DIR     Where rooms, templates, and prefixes are kept
                           (default: $MUDMAP_DATA_DIR or .mudmap)
    -o, --archive NAME     Default file name for `export` (mud_rooms.zip)
    --history-cap N        Keep at most N undo states
    --raw-strings          Emit text into scripts without escaping

\x1b[1mENVIRONMENT:\x1b[0m
    MUDMAP_DATA_DIR        Default data directory
    RUST_LOG               Log filter (default: warn)

\x1b[1mEXAMPLES:\x1b[0m
    mudmap                         Start the shell
    mudmap city.mud                Run city.mud, then start the shell
    mudmap -b city.mud             Run city.mud and exit
    mudmap -d maps/forest          Edit the map stored in maps/forest

Type `help` in the shell for the command list. Ctrl+D exits."
    );
}
