use clap::{Parser as ClapParser, Subcommand};
use rowfilter::cli::{self, CheckOptions, CliError};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "rowfilter")]
#[command(about = "Rowfilter - match JSON records against compact filter expressions")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a filter and run it against JSON input
    Check {
        /// The filter, e.g. 'status==active&age>=18'
        filter: String,

        /// JSON input (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output (streamed records stay one per line)
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't evaluate
        #[arg(long)]
        syntax_only: bool,

        /// Separator between field path segments
        #[arg(long, default_value_t = rowfilter::DEFAULT_SEPARATOR)]
        separator: char,
    },

    /// Print the parsed tree of a filter
    Explain {
        /// The filter to parse
        filter: String,
    },

    /// List comparison operators and connectives
    Operators,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Check {
            filter,
            input,
            pretty,
            syntax_only,
            separator,
        } => run_check(filter, input, pretty, syntax_only, separator),
        Commands::Explain { filter } => cli::explain(&filter).map(|tree| print!("{}", tree)),
        Commands::Operators => {
            print!("{}", cli::get_operators_reference());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_check(
    filter: String,
    input: Option<String>,
    pretty: bool,
    syntax_only: bool,
    separator: char,
) -> Result<(), CliError> {
    let input = match input {
        Some(s) => Some(s),
        None if !syntax_only && !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
        None => None,
    };

    let options = CheckOptions {
        filter,
        input,
        pretty,
        syntax_only,
        separator,
    };

    let result = cli::execute_check(&options)?;
    println!("{}", result.render(pretty)?);
    Ok(())
}
