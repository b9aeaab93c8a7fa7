use anyhow::{bail, Context, Result};
use clap::Parser;
use reqwest::Client;
use salescast::{
    fetch::{fetch_sheet_csv, SheetSource},
    output::write_outputs,
    process::{load_csv, load_csv_str, RawTable},
    project, ProjectionConfig,
};
use std::{fs::File, io::BufReader, path::PathBuf, time::Duration};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Project next-period unit sales per product from a two-period volume table"
)]
struct Args {
    /// Local CSV file; takes precedence over a remote sheet.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Google Sheets document id.
    #[arg(long, env = "SALESCAST_SHEET_ID")]
    sheet_id: Option<String>,

    #[arg(long, env = "SALESCAST_SHEET_NAME", default_value = "Hoja 1")]
    sheet_name: String,

    /// YAML file with decline_threshold, top_n and column names.
    #[arg(long, env = "SALESCAST_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long)]
    decline_threshold: Option<f64>,

    #[arg(long)]
    top_n: Option<usize>,

    #[arg(long, default_value = "./output")]
    output: PathBuf,

    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
}

impl Args {
    fn projection_config(&self) -> Result<ProjectionConfig> {
        let mut cfg = match &self.config {
            Some(path) => ProjectionConfig::from_yaml_file(path)?,
            None => ProjectionConfig::default(),
        };
        if let Some(t) = self.decline_threshold {
            cfg.decline_threshold = t;
        }
        if let Some(n) = self.top_n {
            cfg.top_n = n;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

async fn load_table(args: &Args) -> Result<(RawTable, String)> {
    if let Some(path) = &args.input {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let table = load_csv(BufReader::new(file))
            .with_context(|| format!("reading {}", path.display()))?;
        return Ok((table, path.display().to_string()));
    }

    let Some(sheet_id) = &args.sheet_id else {
        bail!("either --input or --sheet-id is required");
    };
    let source = SheetSource {
        sheet_id: sheet_id.clone(),
        sheet_name: args.sheet_name.clone(),
    };
    let client = Client::builder()
        .timeout(Duration::from_secs(args.timeout_secs))
        .build()
        .context("building HTTP client")?;
    let body = fetch_sheet_csv(&client, &source).await?;
    let table = load_csv_str(&body).context("parsing downloaded sheet")?;
    Ok((table, format!("sheet {}/{}", source.sheet_id, source.sheet_name)))
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();
    info!("startup");

    let args = Args::parse();
    let config = args.projection_config()?;

    // ─── 2) load source table ────────────────────────────────────────
    let (raw, source) = load_table(&args).await?;
    info!(source = %source, rows = raw.len(), "loaded table");

    // ─── 3) project ──────────────────────────────────────────────────
    let table = project(&raw, &config).context("projection failed")?;

    // ─── 4) hand off to presentation ─────────────────────────────────
    write_outputs(&args.output, &table, &source)?;

    info!("all done");
    Ok(())
}
