//! CLI entrypoint for `hostfile`.
//!
//! Reads host files and inline host strings, applies the default user, port
//! and password, prints rejected lines to stderr, and shows the resulting
//! targets as a terminal summary or CSV.
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use hostfile::{
    entry::parse_host_string,
    export::{save_targets_csv, write_targets_csv},
    hostfile::{HostList, read_host_files_with_threshold},
    io::DEFAULT_MMAP_THRESHOLD_BYTES,
    report::render_summary,
    target::Defaults,
};
use log::{LevelFilter, error, info};

#[derive(Parser, Debug)]
#[command(
    name = "hostfile",
    version,
    about = "Parse host files and host strings into connection targets",
    disable_help_flag = true
)]
struct Args {
    /// Host file(s), one `[user[:password]@]host[:port]` entry per line
    #[arg(short = 'h', long = "hosts")]
    hosts: Vec<PathBuf>,

    /// Inline host string(s), whitespace-separated entries
    #[arg(short = 'H', long = "host")]
    host_strings: Vec<String>,

    /// Default user for entries that name none
    #[arg(short = 'l', long = "user")]
    user: Option<String>,

    /// Default port for entries that name none
    #[arg(long = "port")]
    port: Option<String>,

    /// Default password for entries that name none
    #[arg(long = "password")]
    password: Option<String>,

    /// Output format for stdout
    #[arg(long = "format", value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Also write the targets as CSV to this file
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Exit with status 1 if any line was rejected
    #[arg(long = "strict")]
    strict: bool,

    /// Override mmap threshold in bytes. If zero, disable mmap.
    #[arg(long = "mmap-threshold", default_value_t = DEFAULT_MMAP_THRESHOLD_BYTES)]
    mmap_threshold: u64,

    /// Increase verbosity (-v, -vv)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// Control color output (auto, always, never)
    #[arg(long = "color", value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// Suppress stdout output (still writes -o)
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,

    /// Print help
    #[arg(long = "help", action = clap::ArgAction::Help)]
    help: Option<bool>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Csv,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

fn init_logger(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let _ = env_logger::Builder::from_default_env()
        .filter_level(level)
        .try_init();
}

fn defaults_from(args: &Args) -> Defaults {
    Defaults {
        user: args.user.clone(),
        port: args.port.clone(),
        password: args.password.clone(),
    }
}

fn main() {
    let args = Args::parse();
    init_logger(args.verbose);
    match args.color {
        ColorChoice::Always => colored::control::set_override(true),
        ColorChoice::Never => colored::control::set_override(false),
        ColorChoice::Auto => {}
    }

    if args.hosts.is_empty() && args.host_strings.is_empty() {
        error!("no hosts given (-h/--hosts or -H/--host)");
        std::process::exit(2);
    }

    let defaults = defaults_from(&args);
    let threshold = if args.mmap_threshold == 0 {
        u64::MAX
    } else {
        args.mmap_threshold
    };
    let mut list = match read_host_files_with_threshold(&args.hosts, &defaults, threshold) {
        Ok(list) => list,
        Err(e) => {
            error!("failed to read host files: {:#}", e);
            std::process::exit(3);
        }
    };
    for s in &args.host_strings {
        list.push_targets(parse_host_string(s, &defaults));
    }

    for r in &list.rejected {
        eprintln!("{}", r.error);
    }

    if !args.quiet {
        match args.format {
            Format::Text => println!("{}", render_summary(&list)),
            Format::Csv => {
                if let Err(e) = write_targets_csv(&list.targets, std::io::stdout().lock()) {
                    error!("failed to write CSV to stdout: {:#}", e);
                    std::process::exit(4);
                }
            }
        }
    }

    if let Some(path) = &args.output {
        if let Err(e) = save_targets_csv(&list.targets, path) {
            error!("failed to write {}: {:#}", path.display(), e);
            std::process::exit(4);
        }
        info!("wrote {} targets to {}", list.len(), path.display());
    }

    log_stats(&list);

    if args.strict && !list.rejected.is_empty() {
        std::process::exit(1);
    }
}

fn log_stats(list: &HostList) {
    let s = list.stats;
    info!(
        "parse stats: lines={}, comments={}, blank={}, parsed={}, rejected={}",
        s.lines, s.comments, s.blank, s.parsed, s.rejected
    );
}
