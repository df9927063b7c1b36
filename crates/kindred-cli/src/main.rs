use kindred::{FamilySnapshot, PersonId, TreeConfig};
use kindred_render::{
    SvgRenderOptions, build_graph_document, layout_family_rows, render_graph_svg, render_rows_svg,
};
use serde::Serialize;
use serde_json::Value;
use std::io::Read;
use std::str::FromStr;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Snapshot(kindred::Error),
    Render(kindred_render::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Snapshot(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<kindred::Error> for CliError {
    fn from(value: kindred::Error) -> Self {
        Self::Snapshot(value)
    }
}

impl From<kindred_render::Error> for CliError {
    fn from(value: kindred_render::Error) -> Self {
        Self::Render(value)
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
    Graph,
    Rows,
    Detect,
    Render,
}

#[derive(Debug, Clone, Copy, Default)]
enum RenderVariant {
    #[default]
    Graph,
    Rows,
}

impl FromStr for RenderVariant {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "graph" => Ok(Self::Graph),
            "rows" => Ok(Self::Rows),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    focus: Option<i64>,
    person_url: Option<String>,
    viewport_width: Option<f64>,
    viewport_height: Option<f64>,
    variant: RenderVariant,
    out: Option<String>,
}

fn usage() -> &'static str {
    "kindred-cli\n\
\n\
USAGE:\n\
  kindred-cli [graph] [--pretty] [--focus <person-id>] [--viewport-width <w>] [--viewport-height <h>] [--person-url <template>] [<path>|-]\n\
  kindred-cli rows [--pretty] [--focus <person-id>] [<path>|-]\n\
  kindred-cli detect [<path>|-]\n\
  kindred-cli render [--variant graph|rows] [--focus <person-id>] [--viewport-width <w>] [--viewport-height <h>] [--person-url <template>] [--out <path>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - Input is a family snapshot in either historical JSON shape; `detect` names which.\n\
  - graph and rows print layout JSON to stdout.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - --person-url is a template for person links; `{id}` expands to the person id.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "graph" => args.command = Command::Graph,
            "rows" => args.command = Command::Rows,
            "detect" => args.command = Command::Detect,
            "render" => args.command = Command::Render,
            "--pretty" => args.pretty = true,
            "--focus" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.focus = Some(id.parse::<i64>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--person-url" => {
                let Some(url) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.person_url = Some(url.clone());
            }
            "--viewport-width" => {
                let Some(w) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.viewport_width = Some(w.parse::<f64>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--viewport-height" => {
                let Some(h) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.viewport_height =
                    Some(h.parse::<f64>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--variant" => {
                let Some(variant) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.variant = variant
                    .parse::<RenderVariant>()
                    .map_err(|_| CliError::Usage(usage()))?;
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
                while it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            // Bare '-' is the stdin sentinel, not a flag.
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
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
    Ok(())
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn load_snapshot(text: &str, focus: Option<i64>) -> Result<FamilySnapshot, CliError> {
    let mut snapshot = FamilySnapshot::from_json_str(text)?;
    if let Some(id) = focus {
        snapshot.focus = PersonId(id);
    }
    Ok(snapshot)
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;

    let mut config = TreeConfig::defaults();
    if let Some(w) = args.viewport_width {
        config.set_value("viewport.width", serde_json::json!(w));
    }
    if let Some(h) = args.viewport_height {
        config.set_value("viewport.height", serde_json::json!(h));
    }
    if let Some(url) = &args.person_url {
        config.set_value("navigation.personUrl", serde_json::json!(url));
    }

    match args.command {
        Command::Detect => {
            let value: Value = serde_json::from_str(&text)?;
            let Some(shape) = kindred::detect_shape(&value) else {
                return Err(CliError::Snapshot(kindred::Error::UnknownShape));
            };
            println!("{shape}");
            Ok(())
        }
        Command::Graph => {
            let snapshot = load_snapshot(&text, args.focus)?;
            let doc = build_graph_document(&snapshot, &config)?;
            write_json(&doc, args.pretty)?;
            Ok(())
        }
        Command::Rows => {
            let snapshot = load_snapshot(&text, args.focus)?;
            let layout = layout_family_rows(&snapshot, &config)?;
            write_json(&layout, args.pretty)?;
            Ok(())
        }
        Command::Render => {
            let snapshot = load_snapshot(&text, args.focus)?;
            let svg_options = SvgRenderOptions::default();
            let svg = match args.variant {
                RenderVariant::Graph => {
                    let doc = build_graph_document(&snapshot, &config)?;
                    render_graph_svg(&doc, &svg_options)
                }
                RenderVariant::Rows => {
                    let layout = layout_family_rows(&snapshot, &config)?;
                    render_rows_svg(&layout, &svg_options)
                }
            };
            write_text(&svg, args.out.as_deref())?;
            Ok(())
        }
    }
}

fn main() {
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
        Err(CliError::Snapshot(err @ kindred::Error::UnknownShape)) => {
            eprintln!("{err}");
            std::process::exit(3);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
