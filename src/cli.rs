use crate::ast::decode;
use crate::config::load_config;
use crate::layout::compute_layout;
use crate::layout_dump::write_layout_dump;
#[cfg(feature = "png")]
use crate::render::write_output_png;
use crate::render::{render_svg, write_output_svg};
use crate::text_metrics::{CharMetrics, TextMeasure, system_metrics};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "padv", version, about = "Problem Analysis Diagram renderer")]
pub struct Args {
    /// Input control-flow JSON file, or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (theme and layout overrides)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Write the computed geometry tree as JSON for inspection
    #[arg(long = "dumpLayout")]
    pub dump_layout: Option<PathBuf>,

    /// Measure text with fixed per-character advances instead of system fonts
    #[arg(long = "fixedMetrics")]
    pub fixed_metrics: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    let input = read_input(args.input.as_deref())?;
    let tree = decode(&input)?;

    let fallback = CharMetrics::default();
    let metrics: &dyn TextMeasure = if args.fixed_metrics {
        &fallback
    } else {
        match system_metrics() {
            Some(system) => system,
            None => &fallback,
        }
    };

    let root = compute_layout(&tree, metrics, &config.layout);

    if let Some(path) = &args.dump_layout {
        write_layout_dump(path, &root)?;
    }

    let svg = render_svg(&root, &config.theme, &config.layout);
    match args.output_format {
        OutputFormat::Svg => {
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            #[cfg(feature = "png")]
            {
                let output = ensure_output(&args.output, "png")?;
                write_output_png(&svg, &output, &config.render, &config.theme)?;
            }
            #[cfg(not(feature = "png"))]
            {
                return Err(anyhow::anyhow!(
                    "PNG output requires the 'png' feature"
                ));
            }
        }
    }

    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

#[cfg(feature = "png")]
fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}
