use sankey_layout::{Align, ByAttribute, Sankey, SankeyData, SankeyOptions};
use serde::Serialize;
use std::io::{Read, Write};
use tracing_subscriber::{EnvFilter, prelude::*};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Layout(sankey_layout::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Layout(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<sankey_layout::Error> for CliError {
    fn from(value: sankey_layout::Error) -> Self {
        Self::Layout(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Default)]
struct Args {
    input: Option<String>,
    config: Option<String>,
    pretty: bool,
    width: Option<f64>,
    height: Option<f64>,
    align: Align,
    node_id: Option<String>,
    iterations: Option<usize>,
}

fn usage() -> &'static str {
    "sankey-layout\n\
\n\
USAGE:\n\
  sankey-layout [--pretty] [--config <options.json>] [--width <w>] [--height <h>] [--align left|right|justify|center|midpoint] [--node-id <attr>] [--iterations <n>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - Input is a JSON object with `nodes` and `links`; links refer to nodes by index unless --node-id names an attribute.\n\
  - --config reads layout options (extent, nodeWidth, nodePadding, firstLevelNodePadding, iterations, relaxRightToLeft); flags override it.\n\
  - Set RUST_LOG=sankey_layout=debug to trace the pipeline on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--pretty" => args.pretty = true,
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--width" => {
                let Some(w) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.width = Some(w.parse::<f64>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--height" => {
                let Some(h) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.height = Some(h.parse::<f64>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--align" => {
                let Some(align) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.align = align
                    .parse::<Align>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--node-id" => {
                let Some(attr) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.node_id = Some(attr.clone());
            }
            "--iterations" => {
                let Some(n) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.iterations = Some(n.parse::<usize>().map_err(|_| CliError::Usage(usage()))?);
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
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
    let mut out = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, value)?;
    } else {
        serde_json::to_writer(&mut out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

fn build_options(args: &Args) -> Result<SankeyOptions, CliError> {
    let mut options = match args.config.as_deref() {
        Some(path) => serde_json::from_str::<SankeyOptions>(&std::fs::read_to_string(path)?)?,
        None => SankeyOptions::default().with_size(600.0, 400.0),
    };
    if args.width.is_some() || args.height.is_some() {
        let width = args.width.unwrap_or(options.extent.width());
        let height = args.height.unwrap_or(options.extent.height());
        options = options.with_size(width, height);
    }
    if let Some(n) = args.iterations {
        options.iterations = n;
    }
    Ok(options)
}

fn run(args: Args) -> Result<(), CliError> {
    let options = build_options(&args)?;
    tracing::debug!(?options, "resolved layout options");

    let mut sankey = Sankey::new(options).with_align(args.align);
    if let Some(attr) = args.node_id.clone() {
        sankey = sankey.with_node_id(ByAttribute(attr));
    }

    let text = read_input(args.input.as_deref())?;
    let data = SankeyData::from_json_str(&text)?;
    let graph = sankey.layout(data)?;
    write_json(&graph, args.pretty)
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

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

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("sankey-layout")
            .chain(args.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn parse_args_reads_flags_and_path() {
        let args = parse_args(&argv(&[
            "--pretty",
            "--width",
            "800",
            "--align",
            "left",
            "--node-id",
            "name",
            "graph.json",
        ]))
        .unwrap();
        assert!(args.pretty);
        assert_eq!(args.width, Some(800.0));
        assert_eq!(args.align, Align::Left);
        assert_eq!(args.node_id.as_deref(), Some("name"));
        assert_eq!(args.input.as_deref(), Some("graph.json"));
    }

    #[test]
    fn parse_args_rejects_unknown_flags_and_extra_paths() {
        assert!(matches!(
            parse_args(&argv(&["--bogus"])),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(
            parse_args(&argv(&["a.json", "b.json"])),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(
            parse_args(&argv(&["--align", "diagonal"])),
            Err(CliError::Usage(_))
        ));
    }

    #[test]
    fn flags_override_the_default_size() {
        let args = parse_args(&argv(&["--height", "300", "--iterations", "4"])).unwrap();
        let options = build_options(&args).unwrap();
        assert_eq!(options.extent.width(), 600.0);
        assert_eq!(options.extent.height(), 300.0);
        assert_eq!(options.iterations, 4);
    }
}
