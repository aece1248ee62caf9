use std::sync::Arc;
use std::time::Duration;

use clap::{error::ErrorKind, Parser};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::fs::OpenOptions;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::client::{self, ClientOptions, FactsClient};
use crate::config::{self, ConfigFile};
use crate::controller::{self, Action, PageController, Request, Response};
use crate::output::{self, OutputFormat};
use crate::view::terminal::TerminalView;
use crate::view::{PageView, RecordingView};

const LOG_ENV: &str = "FACTPAGER_LOG";

const INTERACTIVE_HELP: &str = "\
Commands:
  n, next            next page
  p, prev            previous page
  first, last        first / last page
  <N>, page <N>      go to page N
  search [TEXT]      search for TEXT (or submit the search field)
  type <TEXT>        set the search field and show suggestions
  pick <N>           copy suggestion N into the search field
  dismiss            hide suggestions
  per-page <N>       change records per page (resets search)
  r, reload          fetch the current page again
  help               show this help
  q, quit            exit
";

#[derive(Clone, Debug)]
struct RunConfig {
    facts_url: String,
    autocomplete_url: String,
    page: u64,
    per_page: u32,
    query: Option<String>,
    suggest: Option<String>,
    interactive: bool,
    client_options: ClientOptions,
    output: Option<String>,
    output_format: Option<OutputFormat>,
    no_color: bool,
}

fn format_kv_line(label: &str, value: &str) {
    println!(":: {:<10}: {}", label, value);
}

fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn init_tracing(verbose: u8) -> Result<(), String> {
    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| format!("failed to initialize logging: {e}"))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = if args.color {
        false
    } else {
        args.no_color || cfg.no_color.unwrap_or(false)
    };

    let facts_url = non_blank(args.url.or(cfg.url))
        .unwrap_or_else(|| client::DEFAULT_FACTS_URL.to_string());
    let autocomplete_url = non_blank(args.autocomplete_url.or(cfg.autocomplete_url))
        .unwrap_or_else(|| client::DEFAULT_AUTOCOMPLETE_URL.to_string());
    client::parse_url(&facts_url).map_err(|e| e.to_string())?;
    client::parse_url(&autocomplete_url).map_err(|e| e.to_string())?;

    let per_page = args
        .per_page
        .or(cfg.per_page)
        .unwrap_or(client::DEFAULT_PER_PAGE);
    if per_page == 0 {
        return Err("invalid per_page, expected positive integer".to_string());
    }
    let timeout_seconds = args
        .timeout
        .or(cfg.timeout)
        .unwrap_or(client::DEFAULT_TIMEOUT_SECONDS);

    let header = non_blank(args.header.or(cfg.header));
    if let Some(raw) = header.as_deref() {
        client::parse_header(raw).map_err(|e| e.to_string())?;
    }
    let client_options = ClientOptions {
        timeout_seconds,
        proxy: non_blank(args.proxy.or(cfg.proxy)),
        header,
        ..ClientOptions::default()
    };

    let output = non_blank(args.output.or(cfg.output)).map(|p| config::expand_tilde_string(&p));
    let output_format = match args.output_format.or(cfg.output_format) {
        Some(raw) => Some(
            OutputFormat::parse(&raw)
                .ok_or_else(|| format!("invalid output format '{raw}', expected text, json or html"))?,
        ),
        None => output.as_deref().and_then(output::infer_format_from_path),
    };

    Ok(RunConfig {
        facts_url,
        autocomplete_url,
        page: args.page.unwrap_or(1),
        per_page,
        query: non_blank(args.query),
        suggest: non_blank(args.suggest),
        interactive: args.interactive,
        client_options,
        output,
        output_format,
        no_color,
    })
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Action(Action),
    Help,
    Quit,
}

fn parse_number<T: std::str::FromStr>(raw: &str, what: &str) -> Result<T, String> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| format!("invalid {what} '{}'", raw.trim()))
}

fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let trimmed = line.trim_start();
    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (trimmed.trim_end(), ""),
    };
    let command = match word {
        "" => return Ok(None),
        "q" | "quit" | "exit" => Command::Quit,
        "help" | "?" => Command::Help,
        "n" | "next" => Command::Action(Action::Next),
        "p" | "prev" => Command::Action(Action::Prev),
        "first" => Command::Action(Action::First),
        "last" => Command::Action(Action::Last),
        "r" | "reload" => Command::Action(Action::Reload),
        "dismiss" => Command::Action(Action::DismissSuggestions),
        "page" => Command::Action(Action::GoTo(parse_number(rest, "page")?)),
        "per-page" => {
            let per_page: u32 = parse_number(rest, "per-page")?;
            if per_page == 0 {
                return Err("per-page must be positive".to_string());
            }
            Command::Action(Action::SetPerPage(per_page))
        }
        "pick" => {
            let index: usize = parse_number(rest, "suggestion number")?;
            if index == 0 {
                return Err("suggestions are numbered from 1".to_string());
            }
            Command::Action(Action::Pick(index - 1))
        }
        "search" => {
            if rest.trim().is_empty() {
                Command::Action(Action::Search(None))
            } else {
                Command::Action(Action::Search(Some(rest.to_string())))
            }
        }
        "type" => Command::Action(Action::Type(rest.to_string())),
        other => match other.parse::<u64>() {
            Ok(page) => Command::Action(Action::GoTo(page)),
            Err(_) => return Err(format!("unknown command '{other}', type 'help'")),
        },
    };
    Ok(Some(command))
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn spawn_request(client: &Arc<FactsClient>, tx: &mpsc::Sender<Response>, request: Request) {
    let client = Arc::clone(client);
    let tx = tx.clone();
    tokio::spawn(async move {
        let response = controller::execute(&client, request).await;
        if tx.send(response).await.is_err() {
            tracing::debug!("pager loop closed before response arrived");
        }
    });
}

async fn write_output(path: &str, rendered: &[u8]) -> Result<(), String> {
    let mut outfile = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .await
        .map_err(|e| format!("failed to open output file: {e}"))?;
    outfile
        .write_all(rendered)
        .await
        .map_err(|e| format!("failed to write output file: {e}"))?;
    Ok(())
}

async fn run_suggest(run: &RunConfig, client: &FactsClient, prefix: &str) -> Result<(), String> {
    let mut controller = PageController::new(run.per_page);
    let mut recorder = RecordingView::default();
    controller::dispatch(
        &mut controller,
        client,
        &mut recorder,
        Action::Type(prefix.to_string()),
    )
    .await;
    if let Some(message) = recorder.errors.first() {
        return Err(message.clone());
    }

    let mut view = TerminalView::new(std::io::stdout(), !run.no_color);
    if recorder.suggestions.is_empty() {
        println!("no suggestions for '{prefix}'");
    } else {
        view.show_suggestions(&recorder.suggestions);
    }
    Ok(())
}

async fn run_once(run: &RunConfig, client: &FactsClient) -> Result<(), String> {
    let mut controller = PageController::new(run.per_page);
    if let Some(query) = run.query.as_deref() {
        controller.preset_search(query);
    }

    let mut recorder = RecordingView::default();
    let pb = spinner(format!("fetching {}", client.facts_url()));
    controller::dispatch(
        &mut controller,
        client,
        &mut recorder,
        Action::GoTo(run.page),
    )
    .await;
    pb.finish_and_clear();

    if let Some(message) = recorder.errors.first() {
        return Err(message.clone());
    }
    let snapshot = recorder
        .current()
        .ok_or_else(|| "no page was received".to_string())?;

    match (run.output.as_deref(), run.output_format) {
        (Some(path), format) => {
            let format = format.unwrap_or(OutputFormat::Text);
            let rendered = output::render(format, snapshot)?;
            write_output(path, &rendered).await?;
            TerminalView::new(std::io::stdout(), !run.no_color).apply_snapshot(snapshot);
            format_kv_line("Output", path);
        }
        (None, Some(format)) if format != OutputFormat::Text => {
            let rendered = output::render(format, snapshot)?;
            let mut stdout = tokio::io::stdout();
            stdout
                .write_all(&rendered)
                .await
                .map_err(|e| format!("failed to write to stdout: {e}"))?;
            stdout
                .flush()
                .await
                .map_err(|e| format!("failed to write to stdout: {e}"))?;
        }
        _ => {
            TerminalView::new(std::io::stdout(), !run.no_color).apply_snapshot(snapshot);
        }
    }
    Ok(())
}

async fn run_interactive(run: &RunConfig, client: FactsClient) -> Result<(), String> {
    format_kv_line("Facts", client.facts_url().as_str());
    format_kv_line("Complete", client.autocomplete_url().as_str());
    format_kv_line("Per page", &run.per_page.to_string());
    println!("{}", "type 'help' for commands".dimmed());

    let client = Arc::new(client);
    let (tx, mut rx) = mpsc::channel::<Response>(32);
    let mut controller = PageController::new(run.per_page);
    let mut view = TerminalView::new(std::io::stdout(), !run.no_color);

    if let Some(query) = run.query.as_deref() {
        controller.preset_search(query);
    }
    if let Some(request) = controller.plan(Action::GoTo(run.page)).request {
        spawn_request(&client, &tx, request);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => return Err(format!("failed to read input: {e}")),
                };
                match parse_command(&line) {
                    Ok(None) => {}
                    Ok(Some(Command::Quit)) => break,
                    Ok(Some(Command::Help)) => print!("{INTERACTIVE_HELP}"),
                    Ok(Some(Command::Action(action))) => {
                        let picked = matches!(action, Action::Pick(_));
                        let plan = controller.plan(action);
                        if plan.clear_suggestions {
                            view.clear_suggestions();
                        }
                        if picked {
                            format_kv_line("Search", controller.search_field());
                        }
                        if let Some(request) = plan.request {
                            spawn_request(&client, &tx, request);
                        }
                    }
                    Err(message) => view.show_error(&message),
                }
            }
            Some(response) = rx.recv() => {
                controller::present(&mut view, controller.accept(response));
            }
        }
    }
    Ok(())
}

async fn run_async(run: RunConfig) -> Result<(), String> {
    if run.no_color {
        colored::control::set_override(false);
    }

    let client = FactsClient::new(&run.facts_url, &run.autocomplete_url, &run.client_options)
        .map_err(|e| e.to_string())?;
    tracing::info!(facts = %client.facts_url(), autocomplete = %client.autocomplete_url(), "client ready");

    if let Some(prefix) = run.suggest.as_deref() {
        return run_suggest(&run, &client, prefix).await;
    }
    if run.interactive {
        return run_interactive(&run, client).await;
    }
    run_once(&run, &client).await
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{e}");
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };

    init_tracing(args.verbose)?;

    let cfg = match args.config.as_deref() {
        Some(path) => config::load_config(&config::expand_tilde(path), false)?,
        None => match config::default_config_path() {
            Some(path) => {
                if args.interactive {
                    if let Err(e) = config::ensure_default_config_file(&path) {
                        tracing::warn!(error = %e, "could not write default config");
                    }
                }
                config::load_config(&path, true)?
            }
            None => ConfigFile::default(),
        },
    };

    let run = build_run_config(args, cfg)?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run))?;
    Ok(())
}
