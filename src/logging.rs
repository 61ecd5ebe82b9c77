use std::fmt::Display;

use colored::Colorize;
use log::{Level, SetLoggerError};

/// Initializes logging to stdout. With `verbose`, oasis crates also log debug messages,
/// such as generator requests.
pub fn init_logger(verbose: bool) -> Result<(), SetLoggerError> {
    fern::Dispatch::new()
        .format(move |out, message, record| {
            let target = Target::from_str(record.target());
            let now = chrono::Local::now();

            out.finish(format_args!(
                "{:^5} {} {:^8} {}",
                level_to_string(&record.level()),
                now.format("%H:%M:%S").to_string().bright_black(),
                target,
                message
            ))
        })
        .filter(move |meta| is_allowed(&Target::from_str(meta.target()), meta.level(), verbose))
        .chain(std::io::stdout())
        .apply()
}

/// External crates only log warnings and errors
fn is_allowed(target: &Target, level: Level, verbose: bool) -> bool {
    let most_verbose = match (target.is_local(), verbose) {
        (true, true) => Level::Debug,
        (true, false) => Level::Info,
        (false, _) => Level::Warn,
    };

    level <= most_verbose
}

#[derive(Debug, PartialEq, Eq)]
enum Target {
    External(String),
    Main,
    Server,
    Studio,
    Core,
}

impl Target {
    fn from_str(str: &str) -> Self {
        let module = str.split("::").next().unwrap_or_default();

        match module {
            "oasis" => Self::Main,
            "oasis_core" => Self::Core,
            "oasis_server" => Self::Server,
            "oasis_studio" => Self::Studio,
            other => Target::External(other.to_string()),
        }
    }

    fn is_local(&self) -> bool {
        !matches!(self, Self::External(_))
    }
}

impl Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let result = match self {
            Target::External(x) => x.as_str().clear(),
            Target::Main => "OASIS".bright_cyan(),
            Target::Server => "SERVER".bright_green(),
            Target::Studio => "STUDIO".bright_purple(),
            Target::Core => "CORE".blue(),
        };

        Display::fmt(&result, f)
    }
}

fn level_to_string(level: &Level) -> String {
    match level {
        Level::Error => " ERR ".black().on_red().bold().to_string(),
        Level::Warn => " WRN ".black().on_yellow().bold().to_string(),
        Level::Info => " INF ".black().on_blue().bold().to_string(),
        Level::Debug => " DBG ".white().on_black().to_string(),
        Level::Trace => " TRC ".to_string(),
    }
}
