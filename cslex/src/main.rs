use cslex::config::runtime::{LogLevel, LoggingPreferences};
use cslex::lexical;
use cslex::logging;
use cslex::tokens::TokenStream;
use std::env;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    let options = match parse_options(&args[1..]) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!("Usage: {} [OPTIONS] <file.cs>", args[0]);
            eprintln!("       {} --help", args[0]);
            process::exit(2);
        }
    };

    if options.show_help {
        print_help(&args[0]);
        return;
    }

    if options.show_version {
        println!("cslex {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    if let Err(message) = init_logging(&options) {
        eprintln!("Error: Failed to initialize logging: {}", message);
        process::exit(1);
    }

    let input = match &options.input {
        Some(input) => input.clone(),
        None => {
            eprintln!("Error: No input file specified");
            eprintln!("Usage: {} [OPTIONS] <file.cs>", args[0]);
            process::exit(2);
        }
    };

    match cslex::tokenize_file(&input) {
        Ok(stream) => {
            print_tokens(&stream, &options);
            if options.cargo_style_report {
                logging::print_cargo_style_summary();
            }
        }
        Err(error) => {
            eprintln!("FAILED: {}", error);
            eprintln!(
                "  code: {} ({})",
                error.error_code(),
                logging::codes::get_description(error.error_code().as_str())
            );
            eprintln!(
                "  help: {}",
                logging::codes::get_action(error.error_code().as_str())
            );
            if options.cargo_style_report {
                logging::print_cargo_style_summary();
            }
            process::exit(1);
        }
    }
}

#[derive(Debug, Default)]
struct CliOptions {
    input: Option<String>,
    json_output: bool,
    show_summary: bool,
    verbose: bool,
    quiet: bool,
    cargo_style_report: bool,
    show_help: bool,
    show_version: bool,
}

fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();

    for arg in args {
        match arg.as_str() {
            "--help" | "-h" => options.show_help = true,
            "--version" | "-V" => options.show_version = true,
            "--json" => options.json_output = true,
            "--summary" => options.show_summary = true,
            "--verbose" | "-v" => options.verbose = true,
            "--quiet" | "-q" => options.quiet = true,
            "--report" => options.cargo_style_report = true,
            other if other.starts_with('-') => {
                return Err(format!("Unknown option '{}'", other));
            }
            path => {
                if options.input.is_some() {
                    return Err("Multiple input files specified; expected exactly one".to_string());
                }
                options.input = Some(path.to_string());
            }
        }
    }

    if options.verbose && options.quiet {
        return Err("--verbose and --quiet are mutually exclusive".to_string());
    }

    Ok(options)
}

fn init_logging(options: &CliOptions) -> Result<(), String> {
    let preferences = LoggingPreferences {
        enable_console_logging: options.verbose,
        min_log_level: if options.verbose {
            LogLevel::Debug
        } else if options.quiet {
            LogLevel::Error
        } else {
            LogLevel::Info
        },
        log_security_metrics: !options.quiet,
        ..LoggingPreferences::default()
    };

    logging::config::init_runtime_preferences(preferences)?;
    logging::init_global_logging()?;
    Ok(())
}

fn print_tokens(stream: &TokenStream, options: &CliOptions) {
    if options.json_output {
        let tokens: Vec<_> = stream.all_tokens().iter().map(|t| &t.value).collect();
        match serde_json::to_string_pretty(&tokens) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error: Failed to serialize tokens: {}", e),
        }
    } else {
        for token in stream.all_tokens() {
            println!("{}", token.value);
        }
    }

    if options.show_summary {
        print_summary(stream);
    }
}

fn print_summary(stream: &TokenStream) {
    let counts = lexical::get_token_counts(stream);

    println!();
    println!("Token Summary:");
    println!("  Total: {}", counts.total);
    println!("  Keywords: {}", counts.keywords);
    println!("  Identifiers: {}", counts.identifiers);
    println!("  Numeric constants: {}", counts.numeric_constants);
    println!("  Hexadecimal numbers: {}", counts.hexadecimal_numbers);
    println!("  Decimal numbers: {}", counts.decimal_numbers);
    println!("  String constants: {}", counts.string_constants);
    println!("  Operators: {}", counts.operators);
    println!("  Delimiters: {}", counts.delimiters);
    println!("  Preprocessor directives: {}", counts.preprocessor_directives);
    println!("  Comments: {}", counts.comments);
    println!("  Unknown: {}", counts.unknown);
}

fn print_help(program_name: &str) {
    println!("cslex {}", env!("CARGO_PKG_VERSION"));
    println!("Lexical scanner for C# source text");
    println!();
    println!("USAGE:");
    println!("    {} [OPTIONS] <file.cs>", program_name);
    println!();
    println!("ARGUMENTS:");
    println!("    <file.cs>    Path to the source file to scan");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show this help message");
    println!("    -V, --version    Show version information");
    println!("        --json       Emit tokens as a JSON array");
    println!("        --summary    Print per-category token counts after the tokens");
    println!("        --report     Print a cargo-style diagnostic report");
    println!("    -v, --verbose    Enable debug logging to the console");
    println!("    -q, --quiet      Only log errors");
    println!();
    println!("OUTPUT:");
    println!("    One line per token in the form `< value | Category Name >`, in");
    println!("    source order. Comments and preprocessor directives are included.");
    println!();
    println!("EXAMPLES:");
    println!("    {} Program.cs", program_name);
    println!("    {} --summary Program.cs", program_name);
    println!("    {} --json Program.cs > tokens.json", program_name);
    println!();
    println!("EXIT CODES:");
    println!("    0    Scanning completed successfully");
    println!("    1    File processing or lexical analysis failed");
    println!("    2    Invalid command-line usage");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_basic_invocation() {
        let options = parse_options(&args(&["Program.cs"])).unwrap();
        assert_eq!(options.input.as_deref(), Some("Program.cs"));
        assert!(!options.json_output);
        assert!(!options.show_summary);
    }

    #[test]
    fn test_parse_all_flags() {
        let options =
            parse_options(&args(&["--json", "--summary", "--report", "Program.cs"])).unwrap();
        assert!(options.json_output);
        assert!(options.show_summary);
        assert!(options.cargo_style_report);
        assert_eq!(options.input.as_deref(), Some("Program.cs"));
    }

    #[test]
    fn test_parse_help_and_version() {
        assert!(parse_options(&args(&["--help"])).unwrap().show_help);
        assert!(parse_options(&args(&["-V"])).unwrap().show_version);
    }

    #[test]
    fn test_unknown_option_rejected() {
        assert!(parse_options(&args(&["--bogus"])).is_err());
    }

    #[test]
    fn test_multiple_inputs_rejected() {
        assert!(parse_options(&args(&["A.cs", "B.cs"])).is_err());
    }

    #[test]
    fn test_verbose_quiet_conflict() {
        assert!(parse_options(&args(&["-v", "-q", "Program.cs"])).is_err());
    }
}
