mod input;
mod ui;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use input::{map_key, InputResult};
use numcrunch::core::constants::INPUT_POLL_MS;
use numcrunch::core::snapshot::format_score;
use numcrunch::utils::{build_info, logging};
use numcrunch::{GameConfig, Session};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};
use ui::draw_ui;

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

fn print_help() {
    println!("numcrunch - hit the target number before time runs out\n");
    println!("Usage: numcrunch [options]\n");
    println!("Options:");
    println!("  --seed <N>     Deal reproducible rounds from seed N");
    println!("  --version      Show version information");
    println!("  --help         Show this help message");
    println!();
    println!("Config: ~/.numcrunch/config.json   Log: ~/.numcrunch/numcrunch.log");
}

/// Parse CLI arguments. Exits the process for `--help`, `--version` and errors.
fn parse_args(args: &[String], config: &mut GameConfig) {
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--seed" => match iter.next().map(|s| s.parse::<u64>()) {
                Some(Ok(seed)) => config.seed = Some(seed),
                _ => {
                    eprintln!("--seed needs a non-negative integer");
                    std::process::exit(1);
                }
            },
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run 'numcrunch --help' for usage.");
                std::process::exit(1);
            }
        }
    }
}

fn main() -> io::Result<()> {
    let mut config = GameConfig::load();
    let args: Vec<String> = std::env::args().collect();
    parse_args(&args, &mut config);

    if let Err(e) = logging::init(&config) {
        eprintln!("Warning: logging disabled: {}", e);
    }
    log::info!("starting {}", build_info::version_line());

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = Session::new(config, rng);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut session);

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        log::error!("terminal loop failed: {}", e);
    }

    let state = session.state();
    println!(
        "Final score: {}  (level {}, {} of {} rounds solved, best streak {})",
        format_score(state.score),
        state.level,
        state.rounds_solved,
        state.rounds_played,
        state.best_streak
    );
    result
}

fn run(terminal: &mut Tui, session: &mut Session<StdRng>) -> io::Result<()> {
    let mut show_help = false;
    let mut last_tick = Instant::now();

    loop {
        let snapshot = session.snapshot();
        terminal.draw(|f| draw_ui(f, &snapshot, show_help))?;

        if event::poll(Duration::from_millis(INPUT_POLL_MS))? {
            if let Event::Key(key) = event::read()? {
                if show_help {
                    if key.kind != KeyEventKind::Release {
                        show_help = false;
                    }
                } else {
                    match map_key(key) {
                        InputResult::Game(input) => {
                            // Rejections are already shown as feedback.
                            let _ = session.handle_input(input);
                        }
                        InputResult::ToggleHelp => show_help = true,
                        InputResult::Quit => return Ok(()),
                        InputResult::Ignored => {}
                    }
                }
            }
        }

        let now = Instant::now();
        session.tick(now.duration_since(last_tick));
        last_tick = now;

        for event in session.take_events() {
            log::trace!("{:?}", event);
        }
    }
}
