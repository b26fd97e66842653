//! Command Handlers
//!
//! Handler functions for CLI commands.

use reward_bridge::{
    fetch_and_regroup, GitHubGitWriter, GitHubHttp, GitHubTreeSource, LocalTreeSource,
    RegroupPipeline, RepoCoordinate, RunConfig,
};
use reward_core::{Regrouped, SchemaVariant};
use tracing::info;

use crate::commands::{preview::PreviewArgs, Cli, Commands, OutputFormat, RepoArgs};
use crate::error::CliResult;
use crate::output;

/// Run the CLI with parsed arguments
pub async fn run(cli: Cli) -> CliResult<()> {
    match &cli.command {
        Commands::Run(args) => handle_run(&cli.repo, args.variant.into(), cli.format).await,
        Commands::Preview(args) => handle_preview(&cli.repo, args, cli.format).await,
    }
}

/// Handle the publishing run
async fn handle_run(repo: &RepoArgs, variant: SchemaVariant, format: OutputFormat) -> CliResult<()> {
    let config = repo.run_config()?;
    let http = GitHubHttp::new(&repo.github_config()?)?;

    let pipeline = RegroupPipeline::new(
        GitHubTreeSource::new(http.clone()),
        GitHubGitWriter::new(http, config.repo.clone()),
        config,
    );

    let report = pipeline.run(variant).await?;
    output::print_run_report(&report, format);
    Ok(())
}

/// Handle preview: regroup without committing
async fn handle_preview(repo: &RepoArgs, args: &PreviewArgs, format: OutputFormat) -> CliResult<()> {
    let variant = SchemaVariant::from(args.variant);

    let Regrouped { index, stats } = match &args.dir {
        Some(dir) => {
            let config = RunConfig::new(
                RepoCoordinate::new("local", dir.display().to_string()),
                String::new(),
            );
            fetch_and_regroup(&LocalTreeSource::new(dir), &config, variant).await?
        }
        None => {
            let config = repo.read_config()?;
            let source = GitHubTreeSource::new(GitHubHttp::new(&repo.github_config()?)?);
            fetch_and_regroup(&source, &config, variant).await?
        }
    };

    let content = index.to_pretty_json()?;
    match &args.out {
        Some(path) => {
            tokio::fs::write(path, &content).await?;
            info!(path = %path.display(), bytes = content.len(), "Wrote preview");
            output::print_preview_summary(variant, &stats, path, format);
        }
        None => println!("{}", content),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::VariantArg;
    use crate::error::CliError;
    use clap::Parser;
    use tempfile::TempDir;

    fn write_checkout(dir: &std::path::Path) {
        let month = dir.join("reports/2021-01");
        std::fs::create_dir_all(&month).unwrap();
        std::fs::write(
            month.join("merkle-tree.json"),
            serde_json::json!({
                "merkleRoot": "0xroot",
                "windowIndex": 0,
                "recipients": {
                    "0xAAA": {
                        "accountIndex": 0,
                        "amount": "100",
                        "metadata": { "reason": "x" },
                        "windowIndex": 0,
                        "proof": ["0x00"]
                    }
                }
            })
            .to_string(),
        )
        .unwrap();
    }

    fn empty_repo_args() -> RepoArgs {
        RepoArgs {
            owner: None,
            repo: None,
            token: None,
            branch: None,
            source_rev: "HEAD".to_string(),
            api_url: reward_bridge::DEFAULT_API_URL.to_string(),
            graphql_url: reward_bridge::DEFAULT_GRAPHQL_URL.to_string(),
            timeout_secs: 30,
        }
    }

    #[tokio::test]
    async fn test_preview_local_writes_index() {
        let checkout = TempDir::new().unwrap();
        write_checkout(checkout.path());
        let out = checkout.path().join("users.json");

        let args = PreviewArgs {
            variant: VariantArg::Single,
            dir: Some(checkout.path().to_path_buf()),
            out: Some(out.clone()),
        };
        handle_preview(&empty_repo_args(), &args, OutputFormat::Json)
            .await
            .unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(written["0xAAA"]["2021-01"]["amount"], "100");
    }

    #[tokio::test]
    async fn test_run_without_owner_is_config_error() {
        let cli = Cli::try_parse_from(["reward-regroup", "--owner", "", "run", "--variant", "single"])
            .unwrap();

        let err = run(cli).await.unwrap_err();
        assert!(matches!(err, CliError::ConfigError { .. }));
    }

    #[tokio::test]
    async fn test_preview_remote_needs_token() {
        let mut repo = empty_repo_args();
        repo.owner = Some("AuxoDAO".to_string());
        repo.repo = Some("rewards".to_string());

        let args = PreviewArgs {
            variant: VariantArg::Dual,
            dir: None,
            out: None,
        };
        let err = handle_preview(&repo, &args, OutputFormat::Plain).await.unwrap_err();
        assert!(err.to_string().contains("--token"));
    }
}
