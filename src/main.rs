// SPDX-License-Identifier: MPL-2.0
use grid_notify::config::{self, Config};
use grid_notify::error::Result;
use grid_notify::grid::cell_provider::LABEL_VAR;
use grid_notify::grid::{ActionTemplate, Column, ColumnKind, Grid, GridRequest, GridRow};
use grid_notify::i18n::I18n;
use grid_notify::infrastructure::HttpNotificationSource;
use grid_notify::notifications::{
    CycleOutcome, LayoutSnapshot, NotificationController, NotificationOptions, VerticalSpan,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
grid_notify

USAGE:
  grid_notify [OPTIONS]               Fetch notifications once
  grid_notify grid <ROWS.json> [OPTIONS]  Render a JSON array of rows

OPTIONS:
  --url <URL>         Notification endpoint (overrides settings.toml)
  --options <JSON>    Request options sent with every fetch
  --config <PATH>     Read settings from PATH instead of the user config dir
  --lang <LOCALE>     Locale used for titles, e.g. fr
  --offscreen         Treat the region as scrolled out of view
  -v, --verbose       Debug logging
  -h, --help          Print this help
";

#[derive(Debug)]
struct Args {
    grid_rows: Option<PathBuf>,
    url: Option<String>,
    options: Option<String>,
    config: Option<PathBuf>,
    lang: Option<String>,
    offscreen: bool,
    verbose: bool,
}

fn parse_args() -> std::result::Result<Option<Args>, pico_args::Error> {
    let mut pargs = pico_args::Arguments::from_env();
    if pargs.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let grid = pargs.subcommand()?.is_some_and(|cmd| cmd == "grid");
    let args = Args {
        url: pargs.opt_value_from_str("--url")?,
        options: pargs.opt_value_from_str("--options")?,
        config: pargs.opt_value_from_str("--config")?,
        lang: pargs.opt_value_from_str("--lang")?,
        offscreen: pargs.contains("--offscreen"),
        verbose: pargs.contains(["-v", "--verbose"]),
        grid_rows: if grid {
            Some(pargs.free_from_str()?)
        } else {
            None
        },
    };

    let rest = pargs.finish();
    if !rest.is_empty() {
        eprintln!("warning: ignoring unused arguments: {rest:?}");
    }
    Ok(Some(args))
}

fn setup_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env("GRID_NOTIFY_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("grid_notify={default}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => config::load_from_path(path)?,
        None => config::load()?,
    };
    if let Some(url) = &args.url {
        config.fetch_notification_url = Some(url.clone());
    }
    Ok(config)
}

fn notification_options(args: &Args, config: &Config) -> Result<NotificationOptions> {
    let mut options = NotificationOptions::from_config(config)?;
    if let Some(raw) = &args.options {
        options.request_options = serde_json::from_str(raw)?;
    }
    Ok(options)
}

/// A terminal has no layout; the region either sits at the top of the
/// window or far below it.
fn layout(offscreen: bool) -> LayoutSnapshot {
    let top = if offscreen { 10_000.0 } else { 0.0 };
    LayoutSnapshot {
        element: VerticalSpan::new(top, 40.0),
        window: VerticalSpan::new(0.0, 800.0),
        modal: None,
    }
}

async fn run_notify(args: &Args, config: &Config) -> Result<()> {
    let options = notification_options(args, config)?;
    let source = HttpNotificationSource::new(config.request_timeout())?;
    let probe = layout(args.offscreen);

    let (controller, mut parent, outcome) =
        NotificationController::start(options, &source, &probe).await;
    tracing::debug!(?outcome, "initial notification cycle finished");

    match outcome {
        CycleOutcome::Aborted => eprintln!("notifications unavailable, see log"),
        CycleOutcome::Cleared => println!("(no notifications)"),
        _ => println!("{}", controller.region().html()),
    }

    while let Ok(escalation) = parent.try_recv() {
        let payload = serde_json::to_string_pretty(&escalation.envelope)?;
        println!("{}: {payload}", escalation.event_name());
    }
    Ok(())
}

fn run_grid(path: &std::path::Path, i18n: &I18n, config: &Config) -> Result<()> {
    let raw = std::fs::read_to_string(path)?;
    let rows: Vec<serde_json::Value> = serde_json::from_str(&raw)?;

    let rows: Vec<GridRow> = rows
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            let id = match value.get("id") {
                Some(serde_json::Value::String(id)) => id.clone(),
                Some(other) => other.to_string(),
                None => index.to_string(),
            };
            GridRow::from_json(id, value)
        })
        .collect();

    let mut grid = Grid::new("cli-grid");
    let keys: Vec<String> = rows
        .first()
        .map(|row| row.data().keys().filter(|k| *k != "id").cloned().collect())
        .unwrap_or_default();
    for key in keys {
        let title_key = format!("grid-column-{key}");
        let mut column = Column::new(key.clone()).with_template(config.cell_template());
        column = match i18n.try_tr(&title_key) {
            Some(_) => column.with_title(title_key),
            None => column.with_title_translated(key),
        };
        grid.add_column(column)?;
    }
    grid.add_column(Column::new("actions").with_title("grid-column-actions").with_kind(
        ColumnKind::RowActions(vec![
            ActionTemplate::new("edit", "grid-action-edit", "edit/{row}"),
            ActionTemplate::new("delete", "grid-action-delete", "delete/{row}"),
        ]),
    ))?;

    let request = GridRequest::new(
        config
            .fetch_notification_url
            .clone()
            .unwrap_or_else(|| "http://localhost".to_string()),
    );

    println!("{}", grid.column_titles(i18n).join("\t"));
    for row in &rows {
        let cells = grid.render_row(&request, row);
        let line: Vec<String> = cells
            .iter()
            .map(|cell| {
                if cell.actions.is_empty() {
                    cell.content.get(LABEL_VAR).unwrap_or_default().to_string()
                } else {
                    cell.actions
                        .iter()
                        .map(|action| action.localized_title(i18n))
                        .collect::<Vec<_>>()
                        .join(" | ")
                }
            })
            .collect();
        println!("{}", line.join("\t"));
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print!("{HELP}");
            return;
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            std::process::exit(2);
        }
    };
    setup_tracing(args.verbose);

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "could not load settings");
            std::process::exit(1);
        }
    };
    let i18n = I18n::new(args.lang.clone(), &config);
    tracing::debug!(locale = %i18n.current_locale(), "localization ready");

    let result = match &args.grid_rows {
        Some(path) => run_grid(path, &i18n, &config),
        None => run_notify(&args, &config).await,
    };
    if let Err(err) = result {
        tracing::error!(error = %err, "grid_notify failed");
        std::process::exit(1);
    }
}
