//! boundlru shell - drive an LRU cache from text commands

mod command;
mod handler;
mod reply;

use anyhow::{Context, Result};
use boundlru::SharedLruCache;
use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::command::parse_command;
use crate::handler::CommandHandler;
use crate::reply::Reply;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cache capacity (number of entries)
    #[arg(short, long, default_value_t = 3)]
    capacity: usize,

    /// Read commands from a file instead of stdin
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Print STATS replies as JSON
    #[arg(long)]
    json: bool,

    /// Suppress the prompt
    #[arg(short, long)]
    quiet: bool,
}

/// Outcome of a shell session
#[derive(Debug, Default, PartialEq, Eq)]
struct SessionSummary {
    commands: usize,
    errors: usize,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only replies
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(log_filter(None))
        .init();

    let args = Args::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let summary = run(&args, &mut out)?;
    info!(
        commands = summary.commands,
        errors = summary.errors,
        "Session finished"
    );
    Ok(())
}

/// Build the log filter
///
/// `RUST_LOG` (or `spec`, when given) wins; `info` applies only when it
/// sets no level of its own.
fn log_filter(spec: Option<&str>) -> EnvFilter {
    let builder = EnvFilter::builder().with_default_directive(LevelFilter::INFO.into());
    match spec {
        Some(spec) => builder.parse_lossy(spec),
        None => builder.from_env_lossy(),
    }
}

/// Create the cache from `args` and run one session, replies going to `out`
fn run<W: Write>(args: &Args, out: &mut W) -> Result<SessionSummary> {
    info!("Starting blsh v{}", env!("CARGO_PKG_VERSION"));
    info!("Cache capacity: {}", args.capacity);

    let cache = SharedLruCache::new(args.capacity).context("cannot create cache")?;
    let handler = CommandHandler::new(cache, args.json);

    match &args.script {
        Some(path) => {
            info!("Reading commands from {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("cannot open script {}", path.display()))?;
            run_session(BufReader::new(file), out, &handler, false)
        }
        None => {
            let stdin = io::stdin();
            run_session(stdin.lock(), out, &handler, !args.quiet)
        }
    }
}

/// Read commands line by line until EOF or QUIT, writing one reply per command
fn run_session<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    handler: &CommandHandler,
    prompt: bool,
) -> Result<SessionSummary> {
    let mut summary = SessionSummary::default();

    if prompt {
        write!(out, "blsh> ")?;
        out.flush()?;
    }

    for (lineno, line) in input.lines().enumerate() {
        let line = line.context("failed to read command")?;

        let reply = match parse_command(&line) {
            Ok(None) => None,
            Ok(Some(cmd)) => match handler.handle(cmd) {
                Some(reply) => Some(reply),
                None => {
                    debug!(line = lineno + 1, "quit requested");
                    break;
                }
            },
            Err(e) => {
                warn!(line = lineno + 1, "Parse error: {}", e);
                Some(Reply::Error(e))
            }
        };

        if let Some(reply) = reply {
            summary.commands += 1;
            if reply.is_error() {
                summary.errors += 1;
            }
            writeln!(out, "{}", reply.render())?;
        }

        if prompt {
            write!(out, "blsh> ")?;
            out.flush()?;
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Seek, SeekFrom};
    use tempfile::{tempfile, NamedTempFile};
    use tracing::Level;

    fn session(input: &str) -> (String, SessionSummary) {
        let handler = CommandHandler::new(SharedLruCache::new(2).unwrap(), false);
        let mut out = Vec::new();
        let summary = run_session(Cursor::new(input), &mut out, &handler, false).unwrap();
        (String::from_utf8(out).unwrap(), summary)
    }

    #[test]
    fn test_session_replies() {
        let (out, summary) = session("PUT a 1\nPUT b 2\nGET a\nPUT c 3\nGET b\n");

        assert_eq!(out, "OK\nOK\n\"1\"\nOK (evicted b)\n(nil)\n");
        assert_eq!(summary, SessionSummary { commands: 5, errors: 0 });
    }

    #[test]
    fn test_session_skips_comments_and_blanks() {
        let (out, summary) = session("# setup\n\nPING\n");

        assert_eq!(out, "PONG\n");
        assert_eq!(summary.commands, 1);
    }

    #[test]
    fn test_session_continues_after_error() {
        let (out, summary) = session("BOGUS\nPUT a\nPING\n");

        assert_eq!(
            out,
            "(error) ERR unknown command 'BOGUS'\n\
             (error) ERR wrong number of arguments for 'put' command\n\
             PONG\n"
        );
        assert_eq!(summary, SessionSummary { commands: 3, errors: 2 });
    }

    #[test]
    fn test_session_stops_at_quit() {
        let (out, summary) = session("PING\nQUIT\nPING\n");

        assert_eq!(out, "PONG\n");
        assert_eq!(summary.commands, 1);
    }

    #[test]
    fn test_session_prompt() {
        let handler = CommandHandler::new(SharedLruCache::new(2).unwrap(), false);
        let mut out = Vec::new();
        run_session(Cursor::new("PING\n"), &mut out, &handler, true).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "blsh> PONG\nblsh> ");
    }

    #[test]
    fn test_session_from_script_file() {
        let mut file = tempfile().unwrap();
        writeln!(file, "PUT a 1").unwrap();
        writeln!(file, "PUT b 2").unwrap();
        writeln!(file, "PUT c 3").unwrap();
        writeln!(file, "KEYS").unwrap();
        file.seek(SeekFrom::Start(0)).unwrap();

        let handler = CommandHandler::new(SharedLruCache::new(2).unwrap(), false);
        let mut out = Vec::new();
        let summary = run_session(BufReader::new(file), &mut out, &handler, false).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "OK\nOK\nOK (evicted a)\n1) \"c\"\n2) \"b\"\n"
        );
        assert_eq!(summary.commands, 4);
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from(["blsh", "--capacity", "5", "--json", "-q"]);
        assert_eq!(args.capacity, 5);
        assert!(args.json);
        assert!(args.quiet);
        assert!(args.script.is_none());
    }

    #[test]
    fn test_run_rejects_zero_capacity() {
        let args = Args::parse_from(["blsh", "-c", "0"]);
        let mut out = Vec::new();

        let err = run(&args, &mut out).unwrap_err();
        assert!(err.to_string().contains("cannot create cache"));
        assert!(format!("{:#}", err).contains("Invalid capacity: 0"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_run_script() {
        let mut script = NamedTempFile::new().unwrap();
        writeln!(script, "PUT a 1").unwrap();
        writeln!(script, "GET a").unwrap();
        writeln!(script, "QUIT").unwrap();
        writeln!(script, "PING").unwrap();

        let path = script.path().to_string_lossy().into_owned();
        let args = Args::parse_from(["blsh", "--capacity", "1", "--script", path.as_str()]);
        let mut out = Vec::new();
        let summary = run(&args, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "OK\n\"1\"\n");
        assert_eq!(summary, SessionSummary { commands: 2, errors: 0 });
    }

    #[test]
    fn test_run_missing_script() {
        let args = Args::parse_from(["blsh", "--script", "/nonexistent/blsh-script.txt"]);
        let mut out = Vec::new();

        let err = run(&args, &mut out).unwrap_err();
        assert!(err.to_string().contains("cannot open script"));
    }

    #[test]
    fn test_log_filter_global_debug_reaches_library() {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(log_filter(Some("debug")))
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(target: "boundlru::shared", Level::DEBUG));
        });
    }

    #[test]
    fn test_log_filter_defaults_to_info() {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(log_filter(Some("")))
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(target: "boundlru::shared", Level::INFO));
            assert!(!tracing::enabled!(target: "boundlru::shared", Level::DEBUG));
        });
    }
}
