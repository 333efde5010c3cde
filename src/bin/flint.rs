/// Flintstone Disk console application

use flintdisk::*;
use log::{Level, LevelFilter, Metadata, Record};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use std::process::ExitCode;

/// Logger writing colored level tags to stderr
struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let level_str = match record.level() {
                Level::Error => "\x1b[31mERROR\x1b[0m",
                Level::Warn => "\x1b[33mWARN\x1b[0m",
                Level::Info => "\x1b[32mINFO\x1b[0m",
                Level::Debug => "\x1b[90mDEBUG\x1b[0m",
                Level::Trace => "\x1b[90mTRACE\x1b[0m",
            };
            eprintln!("[{}] {}", level_str, record.args());
        }
    }

    fn flush(&self) {}
}

/// Install the logger, taking the level from `FLINT_LOG` (default: warn)
fn init_logger() {
    let level = std::env::var("FLINT_LOG")
        .ok()
        .and_then(|value| value.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Warn);

    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

/// Command completer for the console
struct CommandCompleter {
    commands: Vec<&'static str>,
}

impl CommandCompleter {
    fn new() -> Self {
        Self {
            commands: vec![
                "cat", "cluster", "dir", "dump", "exit", "help", "info", "ls", "ls-chain", "map",
                "open", "quit", "save",
            ],
        }
    }
}

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        // Only complete the command name
        let line_to_cursor = &line[..pos];
        if line_to_cursor.contains(' ') {
            return Ok((pos, vec![]));
        }

        let prefix = line_to_cursor.to_lowercase();
        let matches: Vec<Pair> = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(&prefix))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();

        Ok((0, matches))
    }
}

impl Hinter for CommandCompleter {
    type Hint = String;
}

impl Highlighter for CommandCompleter {}
impl Validator for CommandCompleter {}
impl Helper for CommandCompleter {}

/// Get the path to the history file
fn history_path() -> Option<std::path::PathBuf> {
    dirs::home_dir().map(|mut p| {
        p.push(".flint_history");
        p
    })
}

/// What a one-shot run prints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    /// Canonical re-encoded dump
    Dump,
    /// File names from a scan of all clusters
    List,
}

/// Parse the optional mode argument (default: dump)
fn parse_mode(arg: Option<&str>) -> Option<OutputMode> {
    match arg {
        None | Some("dump") => Some(OutputMode::Dump),
        Some("ls") => Some(OutputMode::List),
        Some(_) => None,
    }
}

fn main() -> ExitCode {
    init_logger();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        return run_console();
    }

    let Some(mode) = parse_mode(args.get(1).map(String::as_str)) else {
        eprintln!("Unknown mode '{}'. Usage: flint <path|-> [dump|ls]", args[1]);
        return ExitCode::FAILURE;
    };

    match run_once(&args[0], mode) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Decode one image and print it as a dump or a file listing
fn run_once(source: &str, mode: OutputMode) -> Result<()> {
    let options = DumpOptions::default();
    let image = match source {
        "-" => io::read_dump_from(std::io::stdin().lock(), &options)?,
        path => io::read_dump(path, &options)?,
    };

    match mode {
        OutputMode::Dump => println!("{}", image.to_text()),
        OutputMode::List => {
            let clusters: Vec<Cluster> = image
                .interpret_all()
                .into_iter()
                .filter_map(|result| match result {
                    Ok(cluster) => Some(cluster),
                    Err(e) => {
                        log::warn!("{}", e);
                        None
                    }
                })
                .collect();
            for name in list_file_names(&clusters) {
                println!("{}", name);
            }
        }
    }

    Ok(())
}

fn run_console() -> ExitCode {
    println!("=== Flint ===");
    println!("Interactive console for exploring Flintstone Disk dumps.");
    println!("Type 'help' for available commands\n");

    let mut rl = match Editor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Failed to create editor: {}", e);
            return ExitCode::FAILURE;
        }
    };
    rl.set_helper(Some(CommandCompleter::new()));

    if let Some(history_path) = history_path() {
        let _ = rl.load_history(&history_path);
    }

    let mut image: Option<DiskImage> = None;

    loop {
        let input = match rl.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        };

        let input = input.trim();
        if input.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(input);

        let parts = parse_command_line(input);
        if parts.is_empty() {
            continue;
        }
        let command = parts[0].to_lowercase();

        match command.as_str() {
            "help" => print_help(),
            "quit" | "exit" => break,
            "open" => {
                if parts.len() < 2 {
                    println!("Usage: open <path>");
                    continue;
                }
                match DiskImage::open(&parts[1]) {
                    Ok(img) => {
                        println!("Opened: {} ({} clusters)", parts[1], img.len());
                        image = Some(img);
                    }
                    Err(e) => println!("Error: {}", e),
                }
            }
            "save" => {
                if parts.len() < 2 {
                    println!("Usage: save <path>");
                    continue;
                }
                with_image(&image, |img| match img.save(&parts[1]) {
                    Ok(()) => println!("Saved: {}", parts[1]),
                    Err(e) => println!("Error: {}", e),
                });
            }
            "dump" => with_image(&image, |img| println!("{}", img.to_text())),
            "info" => with_image(&image, print_info),
            "map" => with_image(&image, map::draw_cluster_map),
            "ls" | "dir" => with_image(&image, |img| list_files(img, false)),
            "ls-chain" => with_image(&image, |img| list_files(img, true)),
            "cat" => {
                if parts.len() < 2 {
                    println!("Usage: cat <name>");
                    continue;
                }
                with_image(&image, |img| {
                    match FlintFileSystem::from_image(img).and_then(|fs| fs.read_file(&parts[1])) {
                        Ok(contents) => println!("{}", contents),
                        Err(e) => println!("Error: {}", e),
                    }
                });
            }
            "cluster" => {
                let index = match parts.get(1).and_then(|s| parse_number(s)) {
                    Some(index) => index,
                    None => {
                        println!("Usage: cluster <n> (decimal or 0x hex)");
                        continue;
                    }
                };
                with_image(&image, |img| match img.cluster(index) {
                    Ok(cluster) => println!("{:02X}: {}", index, cluster),
                    Err(e) => println!("Error: {}", e),
                });
            }
            _ => println!("Unknown command '{}'. Type 'help' for commands.", command),
        }
    }

    if let Some(history_path) = history_path() {
        let _ = rl.save_history(&history_path);
    }
    println!("Goodbye!");
    ExitCode::SUCCESS
}

/// Run `f` on the open image, or complain that none is open
fn with_image<F: FnOnce(&DiskImage)>(image: &Option<DiskImage>, f: F) {
    match image {
        Some(img) => f(img),
        None => println!("No image open. Use 'open <path>' first."),
    }
}

fn parse_number(s: &str) -> Option<usize> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}

fn parse_command_line(input: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in input.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ' ' | '\t' if !in_quotes => {
                if !current.is_empty() {
                    parts.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        parts.push(current);
    }

    parts
}

fn print_help() {
    println!("Available commands:");
    println!("  open <path>     - Open a dump file (use quotes for paths with spaces)");
    println!("  dump            - Print the image in canonical dump form");
    println!("  info            - Show image and filesystem information");
    println!("  ls, dir         - List files in cluster order");
    println!("  ls-chain        - List files following the root's header chain");
    println!("  cat <name>      - Print a file's contents");
    println!("  cluster <n>     - Decode and show one cluster");
    println!("  map             - Visual cluster map");
    println!("  save <path>     - Save the canonical dump to a file");
    println!("  help            - Show this help");
    println!("  quit, exit      - Exit");
}

fn print_info(image: &DiskImage) {
    if let Some(filename) = image.filename() {
        println!("Filename: {}", filename);
    }
    println!("Clusters: {}", image.len());
    println!("Size: {} bytes", image.total_size());

    match FlintFileSystem::from_image(image) {
        Ok(fs) => {
            let info = fs.info();
            println!("Volume: {}", info.volume_name);
            println!("Files: {}", info.file_count);
            println!("Free clusters: {}", info.free_clusters);
            println!("Damaged clusters: {}", info.damaged_clusters);
        }
        Err(e) => println!("Filesystem: {}", e),
    }
}

fn list_files(image: &DiskImage, chained: bool) {
    let fs = match FlintFileSystem::from_image(image) {
        Ok(fs) => fs,
        Err(e) => {
            println!("Error: {}", e);
            return;
        }
    };

    let entries = if chained {
        fs.read_dir_chained()
    } else {
        fs.read_dir()
    };

    match entries {
        Ok(entries) if entries.is_empty() => println!("No files."),
        Ok(entries) => {
            println!("{:<4} {:<30} {:>5}", "Clu", "Name", "Size");
            println!("{}", "-".repeat(41));
            for entry in entries {
                println!("{:02X}   {:<30} {:>5}", entry.cluster, entry.name, entry.size);
            }
        }
        Err(e) => println!("Error: {}", e),
    }
}
