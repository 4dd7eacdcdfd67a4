use ledger::gallery::{AirtableClient, AirtableConfig, DEFAULT_TABLE, DEFAULT_VIEW, GalleryState, GalleryView, StoryDetail};
use ledger::model::FlowModel;
use ledger::render::raster::{RasterError, RasterOptions, svg_to_png};
use ledger::render::{Action, Binding, HeadlessError, HeadlessRenderer, InteractionState, VisualizationKind, update};
use ledger::{Fixtures, LedgerConfig};
use serde::Serialize;
use std::io::Write;
use std::str::FromStr;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Invalid(String),
    Io(std::io::Error),
    Data(ledger::Error),
    Render(HeadlessError),
    Raster(RasterError),
    Gallery(ledger::gallery::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Invalid(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Data(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Raster(err) => write!(f, "{err}"),
            CliError::Gallery(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<ledger::Error> for CliError {
    fn from(value: ledger::Error) -> Self {
        Self::Data(value)
    }
}

impl From<HeadlessError> for CliError {
    fn from(value: HeadlessError) -> Self {
        Self::Render(value)
    }
}

impl From<RasterError> for CliError {
    fn from(value: RasterError) -> Self {
        Self::Raster(value)
    }
}

impl From<ledger::gallery::Error> for CliError {
    fn from(value: ledger::gallery::Error) -> Self {
        Self::Gallery(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Command {
    #[default]
    Validate,
    Stats,
    Layout,
    Render,
    Card,
    Stories,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum RenderFormat {
    #[default]
    Svg,
    Png,
}

impl FromStr for RenderFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    kind: Option<VisualizationKind>,
    data: Option<String>,
    config: Option<String>,
    pretty: bool,
    verbose: bool,
    model: Option<FlowModel>,
    transformed: bool,
    compare: bool,
    hover: Option<Binding>,
    select: Vec<Binding>,
    intervention: Option<String>,
    proximity_intervention: Option<String>,
    format: RenderFormat,
    scale: Option<f32>,
    background: Option<String>,
    diagram_id: Option<String>,
    out: Option<String>,
    step: usize,
    table: Option<String>,
    view: Option<String>,
    limit: Option<usize>,
    detail: Option<String>,
}

fn usage() -> &'static str {
    "ledger-cli\n\
\n\
USAGE:\n\
  ledger-cli validate [--data <file>]\n\
  ledger-cli stats [--model traditional|equitable] [--data <file>] [--pretty]\n\
  ledger-cli layout <viz> [--pretty] [STATE] [--config <json-file>] [--data <file>]\n\
  ledger-cli render <viz> [--format svg|png] [--out <path>] [--scale <n>] [--background <color>] [--id <diagram-id>] [STATE] [--config <json-file>] [--data <file>]\n\
  ledger-cli card <viz> [--step <n>] [--model m] [--data <file>] [--pretty]\n\
  ledger-cli stories [--table <name>] [--view <name>] [--limit <n>] [--detail <record-id>] [--pretty]\n\
\n\
STATE:\n\
  --model traditional|equitable  --transformed  --compare  --hover <kind:id>  --select <kind:id>\n\
  --intervention <id>  --proximity-intervention <id>\n\
\n\
NOTES:\n\
  - <viz> is one of value-flow, listening-gauge, systems-model, sovereignty-journey,\n\
    evidence-explorer, proximity-map (or its first word).\n\
  - render prints SVG to stdout by default; PNG defaults to ./<viz>.png.\n\
  - --select may repeat; each one is applied as a click, so `case-study:cs1` opens its detail.\n\
  - stories reads AIRTABLE_API_KEY and AIRTABLE_BASE_ID (a .env file is honoured).\n\
  - RUST_LOG controls diagnostics on stderr (default: warn, or debug with --verbose).\n\
"
}

fn next_value<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<&'a str, CliError> {
    it.next().map(String::as_str).ok_or(CliError::Usage(usage()))
}

fn parse_binding(raw: &str) -> Result<Binding, CliError> {
    raw.parse::<Binding>()
        .map_err(|e| CliError::Invalid(e.to_string()))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();
    let mut command_seen = false;

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "validate" | "stats" | "layout" | "render" | "card" | "stories" if !command_seen => {
                command_seen = true;
                args.command = match a.as_str() {
                    "validate" => Command::Validate,
                    "stats" => Command::Stats,
                    "layout" => Command::Layout,
                    "render" => Command::Render,
                    "card" => Command::Card,
                    _ => Command::Stories,
                };
            }
            "--data" => args.data = Some(next_value(&mut it)?.to_string()),
            "--config" => args.config = Some(next_value(&mut it)?.to_string()),
            "--pretty" => args.pretty = true,
            "--verbose" | "-v" => args.verbose = true,
            "--model" => {
                let raw = next_value(&mut it)?;
                args.model = Some(raw.parse::<FlowModel>().map_err(CliError::Invalid)?);
            }
            "--transformed" => args.transformed = true,
            "--compare" => args.compare = true,
            "--hover" => args.hover = Some(parse_binding(next_value(&mut it)?)?),
            "--select" => args.select.push(parse_binding(next_value(&mut it)?)?),
            "--intervention" => args.intervention = Some(next_value(&mut it)?.to_string()),
            "--proximity-intervention" => {
                args.proximity_intervention = Some(next_value(&mut it)?.to_string());
            }
            "--format" => {
                args.format = next_value(&mut it)?
                    .parse::<RenderFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--scale" => {
                let scale = next_value(&mut it)?
                    .parse::<f32>()
                    .map_err(|_| CliError::Usage(usage()))?;
                if !(scale.is_finite() && scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
                args.scale = Some(scale);
            }
            "--background" => {
                let bg = next_value(&mut it)?.trim();
                if !bg.is_empty() {
                    args.background = Some(bg.to_string());
                }
            }
            "--id" => args.diagram_id = Some(next_value(&mut it)?.to_string()),
            "--out" => args.out = Some(next_value(&mut it)?.to_string()),
            "--step" => {
                args.step = next_value(&mut it)?
                    .parse::<usize>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--table" => args.table = Some(next_value(&mut it)?.to_string()),
            "--view" => args.view = Some(next_value(&mut it)?.to_string()),
            "--limit" => {
                args.limit = Some(
                    next_value(&mut it)?
                        .parse::<usize>()
                        .map_err(|_| CliError::Usage(usage()))?,
                );
            }
            "--detail" => args.detail = Some(next_value(&mut it)?.to_string()),
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            viz => {
                if args.kind.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.kind = Some(
                    viz.parse::<VisualizationKind>()
                        .map_err(|e| CliError::Invalid(e.to_string()))?,
                );
            }
        }
    }

    let needs_kind = matches!(args.command, Command::Layout | Command::Render | Command::Card);
    if needs_kind && args.kind.is_none() {
        return Err(CliError::Usage(usage()));
    }
    Ok(args)
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    let mut out = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, value)?;
    } else {
        serde_json::to_writer(&mut out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_bytes(bytes: &[u8], out: Option<&str>) -> Result<(), CliError> {
    match out {
        None | Some("-") => std::io::stdout().lock().write_all(bytes)?,
        Some(path) => std::fs::write(path, bytes)?,
    }
    Ok(())
}

fn load_fixtures(path: Option<&str>) -> Result<Fixtures, CliError> {
    match path {
        None => Ok(Fixtures::default()),
        Some(path) => {
            tracing::debug!(%path, "loading fixture overrides");
            Ok(Fixtures::from_path(path)?)
        }
    }
}

fn load_config(path: Option<&str>) -> Result<LedgerConfig, CliError> {
    match path {
        None => Ok(LedgerConfig::default()),
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            let overrides: serde_json::Value = serde_json::from_str(&text)?;
            Ok(LedgerConfig::with_overrides(&overrides))
        }
    }
}

fn build_state(args: &Args) -> InteractionState {
    let mut state = InteractionState {
        flow_model: args.model.unwrap_or_default(),
        show_transformed: args.transformed,
        compare_mode: args.compare,
        ..InteractionState::default()
    };
    for binding in &args.select {
        update(&mut state, Action::Click(binding.clone()));
    }
    if let Some(id) = &args.intervention {
        update(&mut state, Action::SetIntervention(Some(id.clone())));
    }
    if let Some(id) = &args.proximity_intervention {
        update(&mut state, Action::SetProximityIntervention(Some(id.clone())));
    }
    if let Some(binding) = &args.hover {
        update(&mut state, Action::PointerEnter(binding.clone()));
    }
    state
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsOut {
    model: &'static str,
    origin: &'static str,
    return_node: &'static str,
    #[serde(flatten)]
    totals: ledger::ValueTotals,
}

fn fetch_stories(table: &str, view: &str) -> Result<GalleryState, CliError> {
    let client = AirtableClient::new(AirtableConfig::from_env()?)?;
    let runtime = tokio::runtime::Runtime::new()?;
    let state = match runtime.block_on(client.list_records(table, view)) {
        Ok(records) => GalleryState {
            records,
            ..GalleryState::default()
        },
        Err(err) => {
            tracing::warn!(error = %err, "story fetch failed");
            GalleryState {
                error: Some(err.to_string()),
                ..GalleryState::default()
            }
        }
    };
    Ok(state)
}

fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Command::Validate => {
            let fixtures = load_fixtures(args.data.as_deref())?;
            ledger::validate_fixtures(&fixtures)?;
            println!("ok");
            Ok(())
        }
        Command::Stats => {
            let fixtures = load_fixtures(args.data.as_deref())?;
            let models = match args.model {
                Some(m) => vec![m],
                None => vec![FlowModel::Traditional, FlowModel::Equitable],
            };
            let out: Vec<StatsOut> = models
                .into_iter()
                .map(|m| StatsOut {
                    model: m.title(),
                    origin: FlowModel::ORIGIN_NODE,
                    return_node: m.return_node(),
                    totals: m.totals(&fixtures),
                })
                .collect();
            write_json(&out, args.pretty)
        }
        Command::Layout => {
            let kind = args.kind.ok_or(CliError::Usage(usage()))?;
            let renderer = HeadlessRenderer::new()
                .with_fixtures(load_fixtures(args.data.as_deref())?)
                .with_config(load_config(args.config.as_deref())?);
            let layout = renderer.layout_json(kind, &build_state(&args))?;
            write_json(&layout, args.pretty)
        }
        Command::Render => {
            let kind = args.kind.ok_or(CliError::Usage(usage()))?;
            let renderer = HeadlessRenderer::new()
                .with_fixtures(load_fixtures(args.data.as_deref())?)
                .with_config(load_config(args.config.as_deref())?);
            let state = build_state(&args);
            let svg = match &args.diagram_id {
                Some(id) => renderer.render_svg_with_diagram_id(kind, &state, id)?,
                None => renderer.render_svg(kind, &state)?,
            };
            match args.format {
                RenderFormat::Svg => write_bytes(svg.as_bytes(), args.out.as_deref()),
                RenderFormat::Png => {
                    let raster = RasterOptions {
                        scale: args.scale.unwrap_or(1.0),
                        background: args.background.clone(),
                    };
                    let bytes = svg_to_png(&svg, &raster)?;
                    let out = args.out.clone().unwrap_or_else(|| format!("{}.png", kind.as_str()));
                    write_bytes(&bytes, Some(&out))
                }
            }
        }
        Command::Card => {
            let kind = args.kind.ok_or(CliError::Usage(usage()))?;
            let renderer = HeadlessRenderer::new().with_fixtures(load_fixtures(args.data.as_deref())?);
            let card = renderer
                .step_card(kind, &build_state(&args), args.step)
                .ok_or_else(|| CliError::Invalid(format!("{kind} has no card {}", args.step)))?;
            write_json(&card, args.pretty)
        }
        Command::Stories => {
            let table = args.table.as_deref().unwrap_or(DEFAULT_TABLE);
            let view = args.view.as_deref().unwrap_or(DEFAULT_VIEW);
            let mut state = fetch_stories(table, view)?;
            if let Some(id) = &args.detail {
                state.selected = Some(id.clone());
                let detail: StoryDetail = state
                    .selected_detail()
                    .ok_or_else(|| CliError::Invalid(format!("no story with id {id}")))?;
                return write_json(&detail, args.pretty);
            }
            let view = GalleryView::from_state(&state, args.limit);
            write_json(&view, args.pretty)?;
            if let GalleryView::Error(_) = view {
                return Err(CliError::Invalid("story fetch failed".to_string()));
            }
            Ok(())
        }
    }
}

fn main() {
    let _ = dotenvy::dotenv();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    init_tracing(args.verbose);

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
