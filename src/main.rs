// csstty: CSS stylesheet parser with a terminal tree browser

mod args;

use std::fs;
use std::io;

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use simple_logger::SimpleLogger;

use args::{Args, LogLevel};
use csstty::parser::parse_stylesheet_with;
use csstty::printer::print_stylesheet;
use csstty::ui::App;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = argh::from_env();

    if args.log != LogLevel::Off {
        SimpleLogger::new()
            .with_level(args.log.to_level_filter())
            .init()?;
    }

    if !args.path.exists() {
        eprintln!("Error: File '{}' not found", args.path.display());
        std::process::exit(1);
    }

    // Read source code
    let source = fs::read_to_string(&args.path)?;

    eprintln!("Parsing {}...", args.path.display());
    let stylesheet = match parse_stylesheet_with(&source, args.parser_options()) {
        Ok(stylesheet) => stylesheet,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    eprintln!(
        "Parsed successfully. Found {} top-level rules.",
        stylesheet.rules.len()
    );

    if args.print {
        print!("{}", print_stylesheet(&stylesheet));
        return Ok(());
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(stylesheet, source);
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
