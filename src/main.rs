mod cli;

use langstrip::{config, report};
use langstrip_remux::{check_tool, Remuxer};

use anyhow::Result;
use clap::Parser;
use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "langstrip=debug,langstrip_remux=debug".to_string()
        } else {
            "langstrip=info,langstrip_remux=info".to_string()
        }
    });

    // Logs go to stderr so stdout carries only the summary (or JSON).
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = config::load_config_or_default(cli.config.as_deref())?;
    cli.apply_to(&mut config.remux);

    if cli.check_tool {
        return check(&config.remux.tool_path);
    }

    let remuxer = Remuxer::new(config.remux)?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run(&cli, &remuxer))
}

async fn run(cli: &Cli, remuxer: &Remuxer) -> Result<()> {
    let directory = cli.directory.as_deref();

    if cli.dry_run {
        let plan = remuxer.plan(directory).await?;
        println!("{}", report::dry_run(&plan));
        return Ok(());
    }

    let outcome = remuxer.run_directory(directory).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}", report::summary(&outcome));
    }

    if !outcome.is_success() {
        anyhow::bail!("{} file(s) failed", outcome.failed.len());
    }

    Ok(())
}

fn check(tool: &std::path::Path) -> Result<()> {
    let info = check_tool(tool);
    println!("{}", report::tool_status(&info));

    if !info.available {
        anyhow::bail!("{} is not available. Install MKVToolNix or set --tool.", info.name);
    }

    Ok(())
}
