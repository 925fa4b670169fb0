use serde::Serialize;
use serde_json::Value;
use std::io::Read;
use std::str::FromStr;
use yamazumi::render::raster::{RasterError, RasterOptions, svg_to_png};
use yamazumi::render::{
    HeadlessError, LayoutOptions, SvgRenderOptions, effective_config, layout_process_map,
    render_svg, sanitize_svg_id,
};
use yamazumi::{
    ChartConfig, LineBalance, ProcessMap, coerce_duration, compute_geometry, line_balance,
};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Chart(HeadlessError),
    Raster(RasterError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Chart(err) => write!(f, "{err}"),
            CliError::Raster(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<HeadlessError> for CliError {
    fn from(value: HeadlessError) -> Self {
        Self::Chart(value)
    }
}

impl From<yamazumi::Error> for CliError {
    fn from(value: yamazumi::Error) -> Self {
        Self::Chart(HeadlessError::Parse(value))
    }
}

impl From<RasterError> for CliError {
    fn from(value: RasterError) -> Self {
        Self::Raster(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Geometry,
    Parse,
    Summary,
    Layout,
    Render,
}

#[derive(Debug, Clone, Copy, Default)]
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
    input: Option<String>,
    pretty: bool,
    takt: Option<f64>,
    config: Option<String>,
    locale: Option<String>,
    render_format: RenderFormat,
    render_scale: f32,
    background: Option<String>,
    diagram_id: Option<String>,
    out: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryOut<'a> {
    #[serde(flatten)]
    balance: LineBalance,
    takt_time: f64,
    bottlenecks: Vec<&'a str>,
}

fn usage() -> &'static str {
    "yamazumi-cli\n\
\n\
USAGE:\n\
  yamazumi-cli [geometry] [--pretty] [--takt <n>] [<path>|-]\n\
  yamazumi-cli parse [--pretty] [<path>|-]\n\
  yamazumi-cli summary [--pretty] [--takt <n>] [<path>|-]\n\
  yamazumi-cli layout [--pretty] [--takt <n>] [--config <path>] [--locale en|zh] [<path>|-]\n\
  yamazumi-cli render [--format svg|png] [--scale <n>] [--background <css-color>] [--takt <n>] [--config <path>] [--locale en|zh] [--id <chart-id>] [--out <path>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the process map JSON is read from stdin.\n\
  - --takt overrides the takt time stored in the process map.\n\
  - --config points to a JSON file merged over the chart defaults.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - PNG output defaults to writing next to the input file (or ./out.png for stdin).\n\
  - --scale and --background only apply to --format png.\n\
  - --locale wins over a `locale` key in the map or in --config.\n\
  - An input file named like a command (e.g. `render`) must follow `--`.\n\
  - Set YAMAZUMI_LOG (e.g. `debug`) to see diagnostics on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        render_scale: 1.0,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "geometry" => args.command = Command::Geometry,
            "parse" => args.command = Command::Parse,
            "summary" => args.command = Command::Summary,
            "layout" => args.command = Command::Layout,
            "render" => args.command = Command::Render,
            "--pretty" => args.pretty = true,
            "--takt" => {
                let Some(takt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.takt = Some(takt.parse::<f64>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--locale" => {
                let Some(locale) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.locale = Some(locale.clone());
            }
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.render_format = fmt
                    .parse::<RenderFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--scale" => {
                let Some(scale) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.render_scale = scale.parse::<f32>().map_err(|_| CliError::Usage(usage()))?;
                if !(args.render_scale.is_finite() && args.render_scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--background" => {
                let Some(bg) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                if !bg.trim().is_empty() {
                    args.background = Some(bg.trim().to_string());
                }
            }
            "--id" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.diagram_id = Some(id.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" if args.input.is_none() => args.input = Some("-".to_string()),
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None | Some("-") => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn default_raster_out_path(input: Option<&str>, ext: &str) -> std::path::PathBuf {
    match input {
        Some(path) if path != "-" => std::path::PathBuf::from(path).with_extension(ext),
        _ => std::path::PathBuf::from(format!("out.{ext}")),
    }
}

/// Chart config for `map`: defaults, embedded config, `--config`, then `--locale`.
fn chart_config(args: &Args, map: &ProcessMap) -> Result<ChartConfig, CliError> {
    let overrides = match args.config.as_deref() {
        Some(path) => Some(serde_json::from_str::<Value>(&std::fs::read_to_string(path)?)?),
        None => None,
    };
    let mut config = effective_config(map, overrides.as_ref())?;
    if let Some(locale) = args.locale.as_deref() {
        config.set_value("locale", Value::String(locale.to_string()));
    }
    Ok(config)
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("YAMAZUMI_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let mut map: ProcessMap = yamazumi::parse_process_map(&text)?;
    if let Some(takt) = args.takt {
        map.takt_time = coerce_duration(takt);
    }
    tracing::debug!(
        nodes = map.nodes.len(),
        takt_time = map.takt_time,
        "loaded process map"
    );

    match args.command {
        Command::Parse => write_json(&map, args.pretty),
        Command::Geometry => {
            let geometry = compute_geometry(&map.nodes, map.takt_time);
            write_json(&geometry, args.pretty)
        }
        Command::Summary => {
            let geometry = compute_geometry(&map.nodes, map.takt_time);
            let out = SummaryOut {
                balance: line_balance(&geometry),
                takt_time: geometry.takt_time,
                bottlenecks: geometry.bottlenecks().map(|b| b.id.as_str()).collect(),
            };
            write_json(&out, args.pretty)
        }
        Command::Layout => {
            let config = chart_config(&args, &map)?;
            let chart = layout_process_map(&map, &config, &LayoutOptions::default())
                .map_err(HeadlessError::from)?;
            write_json(&chart, args.pretty)
        }
        Command::Render => {
            let config = chart_config(&args, &map)?;
            let chart = layout_process_map(&map, &config, &LayoutOptions::default())
                .map_err(HeadlessError::from)?;
            let svg_options = SvgRenderOptions {
                diagram_id: args.diagram_id.as_deref().map(sanitize_svg_id),
                ..Default::default()
            };
            let svg = render_svg(&chart.layout, &svg_options).map_err(HeadlessError::from)?;

            match args.render_format {
                RenderFormat::Svg => write_text(&svg, args.out.as_deref()),
                RenderFormat::Png => {
                    let bytes = svg_to_png(
                        &svg,
                        &RasterOptions {
                            scale: args.render_scale,
                            background: args.background.clone(),
                        },
                    )?;
                    let out = args.out.clone().unwrap_or_else(|| {
                        default_raster_out_path(args.input.as_deref(), "png")
                            .to_string_lossy()
                            .to_string()
                    });
                    if out == "-" {
                        use std::io::Write;
                        std::io::stdout().lock().write_all(&bytes)?;
                    } else {
                        std::fs::write(out, bytes)?;
                    }
                    Ok(())
                }
            }
        }
    }
}

fn main() {
    init_logging();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
