use clap::{CommandFactory, Parser};
use pomo_cli::cli::{Cli, Command};
use pomo_core::alert::alert_from_env;
use pomo_core::config::{Config, load_config_with_fallback};
use pomo_core::error::AppError;
use pomo_core::session::{SessionController, SessionState, Shell};
use pomo_core::storage::json_store::TaskStore;
use std::io::{self, BufRead, Write};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Task")]
    name: String,
    #[tabled(rename = "Sessions")]
    sessions: u64,
}

/// Stdin/stdout presentation shell. Break prompts read a line from stdin;
/// EOF counts as a decline so piped runs never hang.
struct StdShell;

impl StdShell {
    fn read_line(&self, prompt: &str) -> Option<String> {
        print!("{prompt}");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }
}

impl Shell for StdShell {
    fn timer_update(&mut self, display: &str) {
        println!("{display}");
    }

    fn confirm_break(&mut self) -> bool {
        match self.read_line("Take a break? [y/N] ") {
            Some(answer) => answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"),
            None => false,
        }
    }

    fn break_minutes(&mut self, max: u64) -> Option<u64> {
        let answer = self.read_line(&format!("Break length in minutes (1-{max}): "))?;
        answer.parse().ok()
    }

    fn warn(&mut self, message: &str) {
        eprintln!("WARNING: {message}");
    }
}

fn print_tasks_plain(controller: &SessionController) {
    if controller.tasks().is_empty() {
        println!("No tasks yet.");
        return;
    }

    let rows: Vec<TaskRow> = controller
        .tasks()
        .iter()
        .enumerate()
        .map(|(index, task)| TaskRow {
            index,
            name: task.name.clone(),
            sessions: task.sessions,
        })
        .collect();
    println!("{}", Table::new(rows));
}

fn print_tasks_json(controller: &SessionController) {
    let payload: Vec<serde_json::Value> = controller
        .tasks()
        .iter()
        .enumerate()
        .map(|(index, task)| {
            serde_json::json!({
                "index": index,
                "name": task.name,
                "sessions": task.sessions,
            })
        })
        .collect();
    println!("{}", serde_json::Value::Array(payload));
}

/// Reduces clap's multi-line rendering to its first line so REPL errors fit
/// the one-line `ERROR: code - message` convention.
fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let message = rendered
        .lines()
        .next()
        .map(|line| line.trim().trim_start_matches("error: "))
        .filter(|line| !line.is_empty())
        .unwrap_or("invalid command");
    AppError::validation(message)
}

/// Splits a REPL line into argv tokens. Double quotes group whitespace into
/// one token and are stripped; there is no escape syntax beyond that.
fn split_command_line(line: &str) -> Result<Vec<String>, AppError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ch if ch.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            ch => current.push(ch),
        }
    }

    if in_quotes {
        return Err(AppError::validation("unterminated quote in command"));
    }

    if !current.is_empty() {
        args.push(current);
    }

    Ok(args)
}

fn print_help() {
    let mut cmd = Cli::command();
    let help = cmd.render_help();
    println!("{help}");
}

fn run_command(
    cli: Cli,
    controller: &mut SessionController,
    shell: &mut StdShell,
    config: &Config,
    blocking: bool,
) -> Result<(), AppError> {
    match cli.command {
        Command::Add { name } => {
            let name = match name {
                Some(value) if !value.trim().is_empty() => value,
                _ => return Err(AppError::validation("task name is required")),
            };

            controller.add_task(&name)?;
            if cli.json {
                let index = controller.tasks().len() - 1;
                println!(
                    "{}",
                    serde_json::json!({
                        "index": index,
                        "name": name.trim(),
                        "sessions": 0,
                    })
                );
            } else {
                println!("Added task: {}", name.trim());
            }
        }
        Command::Remove { index } => {
            let name = controller.tasks().get(index).map(|task| task.name.clone());
            controller.remove_task(index)?;
            match name {
                Some(name) => {
                    if cli.json {
                        println!("{}", serde_json::json!({ "index": index, "name": name }));
                    } else {
                        println!("Removed task: {name}");
                    }
                }
                None => println!("No task at index {index}."),
            }
        }
        Command::Reset { index } => {
            let name = controller.tasks().get(index).map(|task| task.name.clone());
            controller.reset_sessions(index)?;
            match name {
                Some(name) => {
                    if cli.json {
                        println!(
                            "{}",
                            serde_json::json!({ "index": index, "name": name, "sessions": 0 })
                        );
                    } else {
                        println!("Reset session counter for: {name}");
                    }
                }
                None => println!("No task at index {index}."),
            }
        }
        Command::List => {
            if cli.json {
                print_tasks_json(controller);
            } else {
                print_tasks_plain(controller);
            }
        }
        Command::Start {
            index,
            minutes,
            seconds,
        } => {
            let duration_secs = seconds.unwrap_or_else(|| {
                minutes.unwrap_or_else(|| config.work_minutes()) * 60
            });
            if duration_secs == 0 {
                return Err(AppError::validation("session length must be positive"));
            }

            let already_running = controller.state() != SessionState::Idle;
            controller.start(index, duration_secs)?;
            if already_running {
                println!("A session is already running.");
            } else if blocking {
                controller.run_blocking(shell);
                if let Some(task) = controller.tasks().get(index) {
                    println!("Sessions for {}: {}", task.name, task.sessions);
                }
            } else {
                let name = &controller.tasks()[index].name;
                println!("Started session for: {name}");
            }
        }
        Command::Stop => {
            if controller.state() == SessionState::Idle {
                println!("Nothing is running.");
            } else {
                controller.stop();
                println!("Timer stopped.");
            }
        }
        Command::Status => {
            println!("{}", controller.display());
        }
    }

    Ok(())
}

fn open_controller(config: &Config) -> Result<SessionController, AppError> {
    let store = TaskStore::open_default()?;
    let mut controller = SessionController::new(store, alert_from_env());
    controller.set_break_cap(config.break_cap_minutes());
    Ok(controller)
}

fn load_config() -> Config {
    let load = load_config_with_fallback();
    if let Some(err) = load.error {
        eprintln!("WARNING: {err}");
    }
    load.config
}

fn run_interactive() -> Result<(), AppError> {
    let config = load_config();
    let mut controller = open_controller(&config)?;
    let mut shell = StdShell;

    let mut input = String::new();
    let stdin = io::stdin();

    loop {
        controller.pump(&mut shell);

        input.clear();
        // No long-lived stdin lock here: the shell's break prompts take
        // their own lock when a pumped completion asks for one.
        let bytes = stdin
            .read_line(&mut input)
            .map_err(|err| AppError::io(err.to_string()))?;

        if bytes == 0 {
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if line == "help" || line == "?" {
            print_help();
            continue;
        }

        let args = match split_command_line(line) {
            Ok(args) => args,
            Err(err) => {
                eprintln!("ERROR: {}", err);
                continue;
            }
        };

        if args.is_empty() {
            continue;
        }

        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push("pomo".to_string());
        argv.extend(args);

        let cli = match Cli::try_parse_from(argv) {
            Ok(cli) => cli,
            Err(err) => {
                eprintln!("ERROR: {}", normalize_parse_error(err));
                continue;
            }
        };

        controller.pump(&mut shell);
        if let Err(err) = run_command(cli, &mut controller, &mut shell, &config, false) {
            eprintln!("ERROR: {}", err);
        }
    }

    // Leaving the REPL abandons any running countdown.
    controller.stop();

    Ok(())
}

fn run_once(cli: Cli) -> Result<(), AppError> {
    let config = load_config();
    let mut controller = open_controller(&config)?;
    let mut shell = StdShell;
    run_command(cli, &mut controller, &mut shell, &config, true)
}

fn main() {
    let mut args = std::env::args_os();
    args.next();
    if args.next().is_none() {
        if let Err(err) = run_interactive() {
            eprintln!("ERROR: {}", err);
            std::process::exit(1);
        }
        return;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    if let Err(err) = run_once(cli) {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_parse_error, split_command_line};
    use clap::CommandFactory;
    use pomo_cli::cli::Cli;

    #[test]
    fn split_breaks_on_whitespace() {
        let args = split_command_line("start 0 --minutes 25").unwrap();
        assert_eq!(args, vec!["start", "0", "--minutes", "25"]);
    }

    #[test]
    fn split_groups_quoted_words_into_one_token() {
        let args = split_command_line("add \"write the report\"").unwrap();
        assert_eq!(args, vec!["add", "write the report"]);
    }

    #[test]
    fn split_has_no_escape_syntax() {
        // A backslash is an ordinary character, inside quotes or out.
        let args = split_command_line("add \"a\\b\" c\\d").unwrap();
        assert_eq!(args, vec!["add", "a\\b", "c\\d"]);
    }

    #[test]
    fn split_rejects_unterminated_quote() {
        let err = split_command_line("add \"dangling").unwrap_err();
        assert_eq!(err.code(), "validation");
        assert_eq!(err.message(), "unterminated quote in command");
    }

    #[test]
    fn split_ignores_leading_and_trailing_whitespace() {
        let args = split_command_line("  list   ").unwrap();
        assert_eq!(args, vec!["list"]);
    }

    #[test]
    fn parse_errors_collapse_to_one_line() {
        let err = Cli::command()
            .try_get_matches_from(["pomo", "bogus"])
            .unwrap_err();
        let normalized = normalize_parse_error(err);
        assert_eq!(normalized.code(), "validation");
        assert!(!normalized.message().contains('\n'));
        assert!(!normalized.message().starts_with("error:"));
    }
}
