//! solar-sizer entry point: CLI wiring and config-driven sizing.

use std::process;

use anyhow::{Context, anyhow};
use clap::Parser;
use tracing::info;

use solar_sizer::cli::Cli;
use solar_sizer::io::export::export_csv;
use solar_sizer::logging;
use solar_sizer::report::Report;
use solar_sizer::sizing::SizingResult;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(logging::level_for(cli.verbose, cli.quiet)) {
        eprintln!("warning: logging disabled: {e}");
    }

    if let Err(e) = run(&cli) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let cfg = cli.resolve_config()?;
    info!(
        source = %config_source(cli),
        chemistry = %cfg.battery.chemistry,
        "configuration resolved"
    );

    if cli.dump_config {
        print!("{}", cfg.to_toml_string().context("failed to render config")?);
        return Ok(());
    }

    #[cfg(feature = "api")]
    if cli.serve {
        return serve(cfg, cli.port);
    }

    let result = cfg.compute().map_err(|err| {
        // report every bad field, not only the first
        let errors = cfg.validate();
        if errors.len() > 1 {
            for e in &errors {
                eprintln!("{e}");
            }
            anyhow!("{} invalid inputs", errors.len())
        } else {
            anyhow::Error::new(err)
        }
    })?;
    print_result(&result, cli.json)?;

    if let Some(ref path) = cli.csv_out {
        export_csv(&result, path)
            .with_context(|| format!("failed to write CSV to {}", path.display()))?;
        info!(path = %path.display(), "result table written");
    }

    Ok(())
}

fn print_result(result: &SizingResult, json: bool) -> anyhow::Result<()> {
    if json {
        let out = serde_json::to_string_pretty(result).context("failed to serialize result")?;
        println!("{out}");
    } else {
        println!("{}", Report(result));
    }
    Ok(())
}

fn config_source(cli: &Cli) -> String {
    match (&cli.config, &cli.preset) {
        (Some(path), _) => path.display().to_string(),
        (None, Some(name)) => format!("preset {name}"),
        (None, None) => "defaults".to_string(),
    }
}

#[cfg(feature = "api")]
fn serve(defaults: solar_sizer::config::SizingConfig, port: u16) -> anyhow::Result<()> {
    use std::net::SocketAddr;
    use std::sync::Arc;

    let state = Arc::new(solar_sizer::api::AppState { defaults });
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let rt = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;
    rt.block_on(solar_sizer::api::serve(state, addr))
        .with_context(|| format!("API server on {addr} failed"))
}
