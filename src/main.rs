use ci_expr::cli::{self, CheckOptions, CheckResult, CliError};
use clap::{Parser as ClapParser, Subcommand};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "ci-expr")]
#[command(about = "ci-expr - Check CI rule expressions against variables and pipeline inputs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and evaluate a rule expression
    Check {
        /// The rule expression, e.g. '$CI_COMMIT_BRANCH == "main"'
        expression: String,

        /// Variables as a JSON object (reads from stdin if not provided)
        #[arg(short, long)]
        variables: Option<String>,

        /// Pipeline inputs as a JSON object
        #[arg(short, long)]
        inputs: Option<String>,

        /// Only validate syntax, don't evaluate
        #[arg(long)]
        syntax_only: bool,

        /// Print whether the rule holds instead of the raw value
        #[arg(long)]
        truthy: bool,
    },

    /// List the lexemes of an expression
    Tokens {
        /// The rule expression
        expression: String,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'ci-expr docs' to list categories)
        category: String,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            expression,
            variables,
            inputs,
            syntax_only,
            truthy,
        } => run_check(expression, variables, inputs, syntax_only, truthy),
        Commands::Tokens { expression } => cli::execute_tokens(&expression).map(|lexemes| {
            for lexeme in lexemes {
                println!("{}", lexeme);
            }
        }),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => cli::get_doc_category(&category).map(|content| {
            print!("{}", content);
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_check(
    expression: String,
    variables: Option<String>,
    inputs: Option<String>,
    syntax_only: bool,
    truthy: bool,
) -> Result<(), CliError> {
    let variables = match variables {
        Some(s) => Some(s),
        None if !syntax_only && !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer).filter(|b| !b.trim().is_empty())
        }
        None => None,
    };

    let options = CheckOptions {
        expression,
        variables,
        inputs,
        syntax_only,
        truthy,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Success(output) => println!("{}", output),
    }
    Ok(())
}
