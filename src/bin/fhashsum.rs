// fhashsum — streaming file hash calculator
//
// Computes a SHA-1, SHA-256, SHA-512, MD5 or CRC32 digest of a single
// file, reading in fixed-size chunks so memory stays bounded no matter
// how large the file is. CRC32 uses the IEEE polynomial (the zlib/gzip
// checksum, not POSIX cksum).

use std::io::{self, Write};
use std::path::Path;
use std::process;

use hashsum_rs::common::{io_error_msg, reset_sigpipe};
use hashsum_rs::hash::{self, HashMode, SumError};

const TOOL_NAME: &str = "fhashsum";
const VERSION: &str = env!("CARGO_PKG_VERSION");

struct Cli {
    mode: HashMode,
    path: String,
    verbose: bool,
}

fn mode_list() -> String {
    HashMode::ALL.map(|m| m.name()).join(" | ")
}

fn print_usage(out: &mut impl Write, exe: &str) {
    let _ = writeln!(out, "Usage: {} MODE PATH [-v]", exe);
    let _ = writeln!(out, "Calculate the MODE hash sum of the file at PATH.");
    let _ = writeln!(out, "Available modes: {} (case-insensitive).", mode_list());
    let _ = writeln!(
        out,
        "Specifying -v makes output verbose (reports calculation time)."
    );
    let _ = writeln!(out, "      --help     display this help and exit");
    let _ = writeln!(out, "      --version  output version information and exit");
}

fn executable_name() -> String {
    std::env::args_os()
        .next()
        .and_then(|a| {
            Path::new(&a)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| TOOL_NAME.to_string())
}

/// Parse MODE, PATH and options. Everything that can be rejected
/// without touching the filesystem is rejected here.
fn parse_args(exe: &str) -> Cli {
    let mut positional: Vec<String> = Vec::new();
    let mut verbose = false;
    let mut past_options = false;

    for arg in std::env::args_os().skip(1) {
        let s = arg.to_string_lossy();
        if past_options || !s.starts_with('-') || s == "-" {
            positional.push(s.into_owned());
            continue;
        }
        match s.as_ref() {
            "--" => past_options = true,
            "-v" | "--verbose" => verbose = true,
            "--help" => {
                print_usage(&mut io::stdout(), exe);
                process::exit(0);
            }
            "--version" => {
                println!("{} {}", TOOL_NAME, VERSION);
                process::exit(0);
            }
            _ => {
                eprintln!("{}: unrecognized option '{}'", TOOL_NAME, s);
                eprintln!("Try '{} --help' for more information.", TOOL_NAME);
                process::exit(1);
            }
        }
    }

    if positional.len() < 2 {
        print_usage(&mut io::stderr(), exe);
        process::exit(1);
    }
    if positional.len() > 2 {
        eprintln!("{}: extra operand '{}'", TOOL_NAME, positional[2]);
        eprintln!("Try '{} --help' for more information.", TOOL_NAME);
        process::exit(1);
    }

    let mode = match HashMode::from_name(&positional[0]) {
        Some(m) => m,
        None => {
            eprintln!("{}: '{}' is not a supported mode", TOOL_NAME, positional[0]);
            eprintln!("Specify MODE as one of: {}.", mode_list());
            process::exit(1);
        }
    };

    Cli {
        mode,
        path: positional.swap_remove(1),
        verbose,
    }
}

fn report(e: &SumError) -> String {
    match e {
        SumError::Open { path, source } => {
            format!("cannot open '{}': {}", path, io_error_msg(source))
        }
        SumError::Stat { path, source } => {
            format!("cannot stat '{}': {}", path, io_error_msg(source))
        }
        SumError::Read { path, source } => {
            format!("error reading '{}': {}", path, io_error_msg(source))
        }
        SumError::IsDirectory { path } => format!("'{}' is a directory", path),
    }
}

/// Exit status of the whole run. Directory input is reported but is a
/// documented outcome, not a failure.
fn run(cli: &Cli) -> i32 {
    let file = match hash::open_input(Path::new(&cli.path)) {
        Ok(f) => f,
        Err(SumError::IsDirectory { .. }) => {
            println!("hashing a directory is not supported");
            return 0;
        }
        Err(e) => {
            eprintln!("{}: {}", TOOL_NAME, report(&e));
            return 1;
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = if cli.verbose {
        let _ = writeln!(
            out,
            "Calculating {} sum for file '{}'",
            cli.mode.name(),
            cli.path
        );
        hash::timed_sum(cli.mode, file, &mut out)
    } else {
        hash::sum_reader(cli.mode, file)
    };

    match result {
        Ok(digest) => {
            // No trailing newline on the digest itself.
            let _ = write!(out, "{}", hash::hex_encode(&digest));
            let _ = out.flush();
            0
        }
        Err(e) => {
            eprintln!(
                "{}: error reading '{}': {}",
                TOOL_NAME,
                cli.path,
                io_error_msg(&e)
            );
            1
        }
    }
}

fn main() {
    reset_sigpipe();
    let exe = executable_name();
    let cli = parse_args(&exe);
    process::exit(run(&cli));
}
