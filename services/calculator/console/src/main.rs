use std::io::{self, BufRead, Write};
use std::str::FromStr;

use derive_more::Display;
use log::{error, trace, LevelFilter};

use calculator_engine::Calculator;

const QUIT: &str = "Q";

const BANNER: &str = "\
********************************************************************************
* Fractional Calculator                                                        *
* Query format is \"Operand1 Operation Operand2\"                                *
* Valid operations are { +, -, *, / }                                          *
* Operands are of the form { A, -B, C/D, -E/F, G_H/I, -J_K/L }                 *
* Every component and intermediate value is limited to a signed 32-bit integer *
********************************************************************************
";

#[derive(Debug, Display)]
enum ConsoleError {
    #[display(fmt = "Unrecognized log level: {}", _0)]
    UnknownLogLevel(String),

    #[display(fmt = "Expected at most 1 argument (log level) but found {}", _0)]
    TooManyArguments(usize),

    #[display(fmt = "IO Error: {}", _0)]
    IOError(String),
}

impl std::error::Error for ConsoleError {}

impl From<io::Error> for ConsoleError {
    fn from(e: io::Error) -> Self {
        Self::IOError(e.to_string())
    }
}

/// Log level from the optional single command line argument, `debug` if absent.
///
/// Also accepts the five-letter names `INFO_`, `WARN_` and `FATAL`, the last
/// of which maps onto `error`.
fn log_level(args: &[String]) -> Result<LevelFilter, ConsoleError> {
    match args {
        [] => Ok(LevelFilter::Debug),
        [level] => parse_level(level).ok_or_else(|| ConsoleError::UnknownLogLevel(level.clone())),
        _ => Err(ConsoleError::TooManyArguments(args.len())),
    }
}

fn parse_level(level: &str) -> Option<LevelFilter> {
    let name = level.strip_suffix('_').unwrap_or(level);
    if name.eq_ignore_ascii_case("fatal") {
        return Some(LevelFilter::Error);
    }
    LevelFilter::from_str(name).ok()
}

/// Answers queries read from `input` until `Q` or end of input.
///
/// Rejected queries are logged and the loop carries on with the next line.
fn run<R: BufRead, W: Write>(
    calculator: &Calculator,
    input: R,
    output: &mut W,
) -> Result<(), ConsoleError> {
    writeln!(output, "{}", BANNER)?;

    let mut lines = input.lines();
    loop {
        writeln!(output, "Enter Arithmetic Query or \"{}\" to Quit: ", QUIT)?;
        write!(output, "? ")?;
        output.flush()?;

        let line = match lines.next() {
            None => return Ok(()),
            Some(Ok(line)) => line,
            Some(Err(e)) if e.kind() == io::ErrorKind::InvalidData => {
                error!("Unreadable query: {}", e);
                continue;
            }
            Some(Err(e)) => return Err(e.into()),
        };

        if line.trim_end() == QUIT {
            return Ok(());
        }

        match calculator.execute(&line) {
            Ok(result) => writeln!(output, "= {}", result)?,
            Err(e) => error!("{}", e),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let level = log_level(&args)?;
    env_logger::Builder::new().filter_level(level).init();
    trace!("Logger initiated at {}", level);

    let calculator = Calculator::default().with_log_target("calculator::console");

    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&calculator, stdin.lock(), &mut stdout.lock())?;

    trace!("Exiting calculator");
    Ok(())
}
