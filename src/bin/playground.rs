// File: ./src/bin/playground.rs
use anyhow::{Context, Result, anyhow};
use chronopick::calendar::{CalendarEngine, CalendarEvent};
use chronopick::cli;
use chronopick::clock::SystemClock;
use chronopick::config::Config;
use chronopick::context::{AppContext, StandardContext};
use chronopick::model::display::TextDisplay;
use chronopick::model::{HeaderAction, Segment, ViewMode};
use chronopick::time_picker::{TimePicker, TimePickerEvent};
use chrono::NaiveDate;
use simplelog::{ColorChoice, CombinedLogger, SharedLogger, TermLogger, TerminalMode, WriteLogger};
use std::env;
use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

struct Args {
    root: Option<PathBuf>,
    config: Option<PathBuf>,
    verbose: bool,
}

fn parse_args(args: &[String]) -> Result<Option<Args>> {
    let mut parsed = Args {
        root: None,
        config: None,
        verbose: false,
    };
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" | "help" => return Ok(None),
            "-r" | "--root" => {
                let value = iter.next().ok_or_else(|| anyhow!("--root needs a path"))?;
                parsed.root = Some(PathBuf::from(value));
            }
            "-c" | "--config" => {
                let value = iter.next().ok_or_else(|| anyhow!("--config needs a file"))?;
                parsed.config = Some(PathBuf::from(value));
            }
            "-v" | "--verbose" => parsed.verbose = true,
            other => return Err(anyhow!("Unknown argument '{}'", other)),
        }
    }
    Ok(Some(parsed))
}

fn load_config(args: &Args, ctx: &dyn AppContext) -> Result<Config> {
    if let Some(path) = &args.config {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        return Config::from_toml_str(&contents);
    }
    match Config::load(ctx) {
        Ok(config) => Ok(config),
        Err(e) if Config::is_missing_config_error(&e) => Ok(Config::default()),
        Err(e) => Err(e),
    }
}

fn init_logging(config: &Config, verbose: bool, ctx: &dyn AppContext) -> Result<()> {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        config.log_level_filter()?
    };
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];
    if let Some(path) = ctx.get_log_path() {
        match File::create(&path) {
            Ok(file) => loggers.push(WriteLogger::new(level, simplelog::Config::default(), file)),
            Err(e) => eprintln!("Cannot write log file {}: {}", path.display(), e),
        }
    }
    CombinedLogger::init(loggers).map_err(|e| anyhow!("Failed to initialise logging: {}", e))
}

fn show(calendar: &CalendarEngine, picker: &TimePicker) {
    println!("{}", calendar.header().to_text());
    print!("{}", calendar.build_grid().to_text());
    let popup = match picker.dial() {
        Some(dial) => format!("  dial [{}]", dial.label()),
        None => String::new(),
    };
    println!("time: [{}]{}", picker.text(), popup);
}

fn parse_segment(s: &str) -> Result<Segment> {
    match s {
        "h" | "hours" => Ok(Segment::Hours),
        "m" | "minutes" => Ok(Segment::Minutes),
        "s" | "seconds" => Ok(Segment::Seconds),
        other => Err(anyhow!("Unknown segment '{}'", other)),
    }
}

fn parse_delta(s: &str) -> Result<i32> {
    s.trim_start_matches('+')
        .parse()
        .with_context(|| format!("Invalid number '{}'", s))
}

/// Returns `Ok(false)` when the session should end.
fn run_command(line: &str, calendar: &mut CalendarEngine, picker: &mut TimePicker) -> Result<bool> {
    let (command, rest) = match line.split_once(' ') {
        Some((c, r)) => (c, r.trim()),
        None => (line, ""),
    };

    let applied = match command {
        "" => return Ok(true),
        "quit" | "exit" | "q" => return Ok(false),
        "help" => {
            cli::print_commands();
            return Ok(true);
        }
        "show" => {
            show(calendar, picker);
            return Ok(true);
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&calendar.build_grid())?);
            return Ok(true);
        }
        "next" => calendar.navigate(1, 0),
        "prev" => calendar.navigate(-1, 0),
        "next-year" => calendar.navigate(0, 1),
        "prev-year" => calendar.navigate(0, -1),
        "days" => calendar.enter_view_mode(ViewMode::Days),
        "months" => calendar.enter_view_mode(ViewMode::Months),
        "years" => calendar.enter_view_mode(ViewMode::Years),
        "month" => calendar.pick_month(rest.parse().context("month needs 1-12")?),
        "year" => calendar.pick_year(rest.parse().context("year needs a number")?),
        "day" => {
            let date = NaiveDate::parse_from_str(rest, "%Y-%m-%d")
                .with_context(|| format!("Invalid date '{}'", rest))?;
            calendar.pick_day(date);
            true
        }
        "page" => calendar.page_years(parse_delta(rest)?),
        "header" => calendar.handle_header(rest.parse::<HeaderAction>()?),
        "type" => {
            let edit = picker.input(rest, rest.len());
            println!("[{}] cursor {}", edit.text, edit.cursor);
            return Ok(true);
        }
        "key" => {
            for ch in rest.chars() {
                let proposed = format!("{}{}", picker.text(), ch);
                picker.input(&proposed, proposed.len());
            }
            println!("[{}]", picker.text());
            return Ok(true);
        }
        "commit" => {
            println!("{:?}", picker.commit());
            return Ok(true);
        }
        "popup" => {
            picker.toggle_popup();
            return Ok(true);
        }
        "dial" => {
            let (segment, delta) = rest
                .split_once(' ')
                .ok_or_else(|| anyhow!("usage: dial <h|m|s> <+N|-N>"))?;
            picker.dial_step(parse_segment(segment)?, parse_delta(delta.trim())?)
        }
        "ok" => picker.dial_confirm(),
        "cancel" => picker.dial_dismiss(),
        other => return Err(anyhow!("Unknown command '{}', try 'help'", other)),
    };

    if !applied {
        println!("(no change)");
    }
    Ok(true)
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let Some(args) = parse_args(&args)? else {
        cli::print_help("chronopick");
        return Ok(());
    };

    let ctx = StandardContext::new(args.root.clone());
    let config = load_config(&args, &ctx)?;
    init_logging(&config, args.verbose, &ctx)?;
    log::info!("Config path: {}", Config::get_path_string(&ctx)?);

    let clock = SystemClock;
    let mut calendar =
        CalendarEngine::new(&config.calendar, config.locale_provider(), Box::new(clock))?;
    let mut picker = TimePicker::new(&config.time_picker, &clock);

    calendar.subscribe(|event| match event {
        CalendarEvent::DaySelected(date) => println!("-> day selected {}", date),
        CalendarEvent::RangeSelected(start, end) => {
            println!("-> range selected {} .. {}", start, end)
        }
        CalendarEvent::ModelChanged(mode) => log::trace!("Model changed ({})", mode),
    });
    picker.subscribe(|event| match event {
        TimePickerEvent::TimeSelected(time) => println!("-> time selected {}", time),
        TimePickerEvent::TimeCommitFailed => println!("-> commit failed, reverted"),
        TimePickerEvent::TextChanged(text) => log::trace!("Text changed to '{}'", text),
        TimePickerEvent::FormatChanged(pattern) => println!("-> format {}", pattern),
        TimePickerEvent::PopupOpened => println!("-> popup opened"),
        TimePickerEvent::PopupClosed => println!("-> popup closed"),
    });

    show(&calendar, &picker);
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        match run_command(line.trim(), &mut calendar, &mut picker) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => eprintln!("Error: {:#}", e),
        }
    }

    calendar.dispose();
    picker.dispose();
    Ok(())
}
