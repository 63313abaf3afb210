//! Hot Cocoa Lisp compiler CLI.

use hclc::config::CompilerConfig;
use hclc::reporting::report;
use hclc::tracing_setup::init_tracing;

fn print_usage() {
    eprintln!("Usage: hclc <file.hcl>");
    eprintln!();
    eprintln!("Compiles <file.hcl> and every file it imports to sibling .js files.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -h, --help       Print this help");
    eprintln!("  -V, --version    Print the version");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  {}  source extension (default: hcl)", CompilerConfig::SOURCE_EXT_VAR);
    eprintln!("  {}  output extension (default: js)", CompilerConfig::TARGET_EXT_VAR);
    eprintln!("  RUST_LOG         enable tracing, e.g. RUST_LOG=hclc=debug");
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let path = match args.as_slice() {
        [flag] if flag == "-h" || flag == "--help" => {
            print_usage();
            return;
        }
        [flag] if flag == "-V" || flag == "--version" => {
            println!("hclc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        [flag] if flag.starts_with('-') => {
            eprintln!("error: unknown option `{flag}`");
            print_usage();
            std::process::exit(1);
        }
        [path] => path,
        _ => {
            print_usage();
            std::process::exit(1);
        }
    };

    init_tracing();

    let config = CompilerConfig::from_env();
    if let Err(err) = hclc::compile_file_with(path, config) {
        report(&err);
        std::process::exit(1);
    }
}
