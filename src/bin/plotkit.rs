use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use plotkit::Series;
use plotkit::demo::DemoChart;
use plotkit::viz::{
    self, BoundingBox, DynamicLayout, OrdinalScale, Plot, RecordingCanvas, Renderable, XAxis,
    YAxis, YScale,
};

#[derive(Parser, Debug)]
#[command(
    name = "plotkit",
    version,
    about = "Render bar, line and point charts to SVG, PNG or JSON draw instructions"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one of the built-in example charts.
    Demo(DemoArgs),
    /// Chart a single series given on the command line.
    Series(SeriesArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DemoName {
    Bars,
    Stacked,
    Lines,
    Sparkline,
    Timeseries,
    Ratings,
    Mixed,
}

impl From<DemoName> for DemoChart {
    fn from(d: DemoName) -> Self {
        match d {
            DemoName::Bars => DemoChart::Bars,
            DemoName::Stacked => DemoChart::Stacked,
            DemoName::Lines => DemoChart::Lines,
            DemoName::Sparkline => DemoChart::Sparkline,
            DemoName::Timeseries => DemoChart::Timeseries,
            DemoName::Ratings => DemoChart::Ratings,
            DemoName::Mixed => DemoChart::Mixed,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Kind {
    Points,
    Lines,
    Bars,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum OutFormat {
    /// Draw instructions as JSON.
    Json,
    /// SVG or PNG, chosen by the --out extension.
    Image,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Write to this file. JSON goes to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format. If omitted, inferred from --out (.json -> json, anything else -> image).
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Canvas width in pixels.
    #[arg(long)]
    width: Option<u32>,
    /// Canvas height in pixels.
    #[arg(long)]
    height: Option<u32>,
    /// TrueType/OpenType font registered as "sans-serif" (needed for text in PNG output).
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct DemoArgs {
    #[arg(value_enum)]
    name: DemoName,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct SeriesArgs {
    /// Values separated by comma or semicolon (e.g., 1,4,2.5)
    #[arg(long)]
    values: String,
    /// Category labels separated by comma or semicolon; defaults to 0,1,2,...
    #[arg(long)]
    labels: Option<String>,
    /// Plot kind.
    #[arg(long, value_enum, default_value_t = Kind::Bars)]
    kind: Kind,
    /// Number of vertical ticks.
    #[arg(long, default_value_t = 10)]
    ticks: usize,
    #[command(flatten)]
    output: OutputArgs,
}

fn parse_list(s: &str) -> Vec<String> {
    s.split([',', ';'])
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

fn parse_values(s: &str) -> Result<Vec<f64>> {
    parse_list(s)
        .iter()
        .map(|v| {
            v.parse::<f64>()
                .with_context(|| format!("invalid value {v:?} in --values"))
        })
        .collect()
}

fn register_font(path: &Path) -> Result<()> {
    let bytes = std::fs::read(path).with_context(|| format!("reading font {}", path.display()))?;
    // plotters keeps a 'static reference to registered font data
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    plotters::style::register_font("sans-serif", plotters::style::FontStyle::Normal, bytes)
        .map_err(|_| anyhow!("invalid font {}", path.display()))?;
    log::info!("registered {} as sans-serif", path.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Demo(args) => cmd_demo(args),
        Command::Series(args) => cmd_series(args),
    }
}

fn cmd_demo(args: DemoArgs) -> Result<()> {
    let chart = DemoChart::from(args.name);
    let (w, h) = chart.default_size();
    emit(&*chart.build(), &args.output, w, h)
}

fn cmd_series(args: SeriesArgs) -> Result<()> {
    let values = parse_values(&args.values)?;
    if values.is_empty() {
        bail!("--values needs at least one number");
    }
    let labels = args.labels.as_deref().map(parse_list);
    if let Some(l) = &labels {
        if l.len() != values.len() {
            bail!(
                "--labels has {} entries but --values has {}",
                l.len(),
                values.len()
            );
        }
    }
    let series = Series::new(labels, values);

    let y = Arc::new(YScale::with_ticks(args.ticks, [&series]));
    let offset = match args.kind {
        Kind::Bars => 10.0,
        _ => 0.0,
    };
    let x = Arc::new(OrdinalScale::new(&series, offset));
    let series = Arc::new(series);
    let plot = match args.kind {
        Kind::Points => Plot::points(Arc::clone(&y), Arc::clone(&x), series),
        Kind::Lines => Plot::lines(Arc::clone(&y), Arc::clone(&x), series),
        Kind::Bars => Plot::bars(Arc::clone(&y), Arc::clone(&x), series),
    };
    let chart = DynamicLayout::new(
        YAxis::new(Arc::clone(&y)),
        XAxis::new(x),
        vec![Plot::grid(y), plot],
    );
    emit(&chart, &args.output, 800, 400)
}

fn emit(chart: &dyn Renderable, out: &OutputArgs, default_w: u32, default_h: u32) -> Result<()> {
    let width = out.width.unwrap_or(default_w);
    let height = out.height.unwrap_or(default_h);
    if width == 0 || height == 0 {
        bail!("--width and --height must be positive");
    }

    let format = match (out.format, out.out.as_ref()) {
        (Some(f), _) => f,
        (None, Some(p)) if p.extension().and_then(|e| e.to_str()) == Some("json") => {
            OutFormat::Json
        }
        (None, Some(_)) => OutFormat::Image,
        (None, None) => OutFormat::Json,
    };

    match format {
        OutFormat::Json => {
            let mut canvas = RecordingCanvas::new();
            chart
                .render(&mut canvas, BoundingBox::from_canvas_size(width, height))
                .context("rendering chart")?;
            let json = serde_json::to_string_pretty(canvas.commands())?;
            match &out.out {
                Some(path) => {
                    std::fs::write(path, json)
                        .with_context(|| format!("writing {}", path.display()))?;
                    eprintln!(
                        "Wrote {} draw commands to {}",
                        canvas.commands().len(),
                        path.display()
                    );
                }
                None => println!("{json}"),
            }
        }
        OutFormat::Image => {
            let path = out
                .out
                .as_ref()
                .ok_or_else(|| anyhow!("--format image needs --out <file.svg|file.png>"))?;
            if let Some(font) = &out.font {
                register_font(font)?;
            }
            viz::render_to_file(path, width, height, chart)?;
            eprintln!("Wrote chart to {}", path.display());
        }
    }
    Ok(())
}
