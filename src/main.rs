// Chourse: scanner, parser and back ends with a terminal explorer

use std::fs;
use std::io;
use std::path::Path;
use std::process;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use chourse::parser::lexer::scan;
use chourse::parser::parse::Parser;
use chourse::transpiler::{escape_control, render_c, render_source, render_tree};
use chourse::ui::App;

/// What `--emit` prints instead of opening the explorer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Emit {
    Tokens,
    Source,
    C,
    Ast,
}

impl Emit {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "tokens" => Some(Emit::Tokens),
            "source" => Some(Emit::Source),
            "c" => Some(Emit::C),
            "ast" => Some(Emit::Ast),
            _ => None,
        }
    }
}

fn print_usage(program_name: &str) {
    eprintln!("Usage: {} <file.chourse> [--emit tokens|source|c|ast]", program_name);
    eprintln!();
    eprintln!("Without --emit the file opens in the terminal explorer.");
    eprintln!();
    eprintln!("Examples:");
    eprintln!(
        "  {} demos/animals.chourse              # Explore a sample program",
        program_name
    );
    eprintln!(
        "  {} demos/animals.chourse --emit c     # Print the C translation",
        program_name
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("chourse");

    let mut file = None;
    let mut emit = None;
    let mut rest = args.iter().skip(1);
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--emit" => {
                let Some(kind) = rest.next().and_then(|name| Emit::parse(name)) else {
                    eprintln!("Error: --emit expects one of tokens, source, c, ast");
                    print_usage(program_name);
                    process::exit(1);
                };
                emit = Some(kind);
            }
            "-h" | "--help" => {
                print_usage(program_name);
                return Ok(());
            }
            _ if file.is_none() => file = Some(arg.clone()),
            _ => {
                eprintln!("Error: Unexpected argument '{}'", arg);
                print_usage(program_name);
                process::exit(1);
            }
        }
    }

    let Some(file) = file else {
        eprintln!("Error: No input file provided");
        eprintln!();
        print_usage(program_name);
        process::exit(1);
    };

    if !Path::new(&file).exists() {
        eprintln!("Error: File '{}' not found", file);
        print_usage(program_name);
        process::exit(1);
    }

    // Read source code
    let source = fs::read_to_string(&file)?;

    match emit {
        Some(kind) => emit_output(&file, &source, kind),
        None => run_explorer(&file, source),
    }
}

/// Print one stage of the pipeline to stdout. Diagnostics go to stderr.
fn emit_output(file: &str, source: &str, emit: Emit) -> Result<(), Box<dyn std::error::Error>> {
    let (tokens, lex_errors) = scan(source);
    for error in &lex_errors {
        eprintln!("{}", error);
    }

    if emit == Emit::Tokens {
        for token in &tokens {
            println!(
                "{:4} {:<12} {}",
                token.line,
                token.kind,
                escape_control(&token.lexeme)
            );
        }
        if !lex_errors.is_empty() {
            process::exit(1);
        }
        return Ok(());
    }

    eprintln!("Parsing {}...", file);
    let program = match Parser::new(tokens).parse_program() {
        Ok(program) => program,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    eprintln!(
        "Parsed successfully. Found {} top-level statements.",
        program.statements.len()
    );

    let output = match emit {
        Emit::Source => render_source(&program),
        Emit::C => render_c(&program),
        Emit::Ast => render_tree(&program),
        Emit::Tokens => unreachable!("handled above"),
    };
    print!("{}", output);

    Ok(())
}

/// Open the terminal explorer. Parse failures are shown inside it.
fn run_explorer(file: &str, source: String) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("Parsing {}...", file);
    let mut app = App::new(file, source);

    for error in &app.lex_errors {
        eprintln!("{}", error);
    }
    if let Err(e) = &app.program {
        eprintln!("{}", e);
        eprintln!("Opening explorer with the diagnostic...");
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
