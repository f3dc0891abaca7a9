use crate::domain::model::DrawingFormat;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "drawgen")]
#[command(about = "Generate DXF or SVG drawings from a text description")]
pub struct CliConfig {
    /// What to draw, e.g. "circle radius 5mm"
    pub description: Option<String>,

    #[arg(long, short, default_value = "dxf", value_parser = parse_format)]
    pub format: DrawingFormat,

    #[arg(long, help = "Use a built-in example description (see --list-presets)")]
    pub preset: Option<String>,

    #[arg(long, help = "List example descriptions for the selected format")]
    pub list_presets: bool,

    #[arg(long, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "DRAWGEN_ENDPOINT")]
    pub endpoint: Option<String>,

    #[arg(long, env = "DRAWGEN_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub output_path: Option<String>,

    #[arg(long, help = "Save the drawing to cloud storage")]
    pub save: bool,

    #[arg(long, help = "Skip writing the exported file")]
    pub no_export: bool,

    #[arg(long, help = "Print the generated drawing to stdout")]
    pub print: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

fn parse_format(value: &str) -> Result<DrawingFormat, String> {
    value.parse().map_err(|e: crate::utils::error::DrawError| e.to_string())
}
