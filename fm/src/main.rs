use clap::Parser;
use fm::path::{check_access, AccessMode};
use fm::{prompt, EngineOptions, Interpreter, Session};
use fm_config::{FmConfig, LogFormat};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

mod completer;

/// fm - Interactive file manager shell
#[derive(Parser, Debug)]
#[command(name = "fm", version, about)]
struct Args {
    /// Name shown in the greeting and farewell
    #[arg(short, long, env = "FM_USERNAME")]
    username: Option<String>,

    /// Configuration file
    #[arg(long)]
    config: Option<String>,

    /// Starting directory
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Execute command and exit
    #[arg(short = 'c')]
    command: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => fm_config::load_from_file(path)?,
        None => fm_config::load().unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load config: {e}, using defaults");
            FmConfig::default()
        }),
    };

    init_tracing(&config, args.debug);

    let username = args
        .username
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| config.shell.username.clone());
    let start_dir = start_dir(args.dir, &config).await;
    info!(user = %username, dir = %start_dir.display(), "starting session");

    let session = Session::new(start_dir, username);
    let mut interpreter = Interpreter::new(session, EngineOptions::from(&config.engine));

    if let Some(command) = args.command {
        let outcome = interpreter.handle_line(command.trim()).await;
        if !outcome.message.is_empty() {
            println!("{}", outcome.message);
        }
        return Ok(());
    }

    run_repl(&mut interpreter, &config).await
}

fn init_tracing(config: &FmConfig, debug: bool) {
    let level = if debug {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let filter = if config.logging.filter.is_empty() {
        level.to_string()
    } else {
        config.logging.filter.clone()
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);
    match config.logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Compact => builder.compact().init(),
    }
}

/// Starting directory priority: CLI arg > config/env > home > process cwd.
/// A candidate that is not an accessible directory is skipped.
async fn start_dir(arg: Option<PathBuf>, config: &FmConfig) -> PathBuf {
    let fallback = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
    let candidates = [
        arg,
        config.shell.expanded_start_dir().map(PathBuf::from),
        dirs::home_dir(),
    ];

    for candidate in candidates.into_iter().flatten() {
        let candidate = fm::path::resolve(&fallback, &candidate.to_string_lossy());
        if check_access(&candidate, AccessMode::Directory).await.is_ok() {
            return candidate;
        }
        warn!(dir = %candidate.display(), "start directory is not accessible, skipping");
    }
    fallback
}

async fn run_repl(
    interpreter: &mut Interpreter,
    config: &FmConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    use completer::FmHelper;
    use rustyline::error::ReadlineError;
    use rustyline::{CompletionType, Config, Editor};

    let shell_config = &config.shell;
    let rl_config = Config::builder()
        .completion_type(CompletionType::List)
        .max_history_size(shell_config.history.max_entries)?
        .history_ignore_dups(true)?
        .history_ignore_space(true)
        .build();

    let cwd = Arc::new(RwLock::new(interpreter.session().current_dir().to_path_buf()));
    let mut rl = Editor::with_config(rl_config)?;
    rl.set_helper(Some(FmHelper::new(cwd.clone())));

    let history_path = PathBuf::from(shell_config.history.expanded_file());
    if shell_config.history.enabled {
        if let Err(e) = rl.load_history(&history_path) {
            debug!(path = %history_path.display(), error = %e, "no history loaded");
        }
    }

    let username = interpreter.session().username().to_string();
    print!(
        "{}",
        prompt::render(&prompt::greeting(&username), &status(interpreter, config))
    );

    loop {
        if let Ok(mut guard) = cwd.write() {
            *guard = interpreter.session().current_dir().to_path_buf();
        }

        let prompt_text = prompt::expand(
            &shell_config.prompt,
            interpreter.session().current_dir(),
            &username,
        );

        let outcome = match rl.readline(&prompt_text) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if shell_config.history.enabled {
                    let _ = rl.add_history_entry(line);
                }
                interpreter.handle_line(line).await
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            // End of input leaves the same way `.exit` does.
            Err(ReadlineError::Eof) => interpreter.terminate(),
            Err(err) => {
                eprintln!("Error: {err:?}");
                interpreter.terminate()
            }
        };

        if outcome.exit {
            println!("{}", outcome.message);
            break;
        }
        print!("{}", prompt::render(&outcome.message, &status(interpreter, config)));
    }

    if shell_config.history.enabled {
        if let Err(e) = rl.save_history(&history_path) {
            warn!(path = %history_path.display(), error = %e, "failed to save history");
        }
    }

    Ok(())
}

fn status(interpreter: &Interpreter, config: &FmConfig) -> String {
    let session = interpreter.session();
    prompt::expand(&config.shell.status, session.current_dir(), session.username())
}
