use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use version_tagger::host::GithubHost;
use version_tagger::workflow::{self, WorkflowArgs};
use version_tagger::{config, ui};

#[derive(clap::Parser)]
#[command(
    name = "version-tagger",
    about = "Compute the next semantic version from branch class and existing tags, then push it as a tag"
)]
struct Args {
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, help = "API token")]
    token: String,

    #[arg(long, help = "Repository owner")]
    owner: String,

    #[arg(long, help = "Repository name")]
    repo: String,

    #[arg(
        long = "ref",
        env = "GITHUB_REF",
        help = "Git ref that triggered the run (refs/heads/... or refs/pull/...)"
    )]
    git_ref: String,

    #[arg(long, env = "GITHUB_SHA", help = "Commit to tag")]
    sha: String,

    #[arg(long, help = "Major version line to release (overrides config)")]
    major_version: Option<u32>,

    #[arg(long, help = "Tag prefix (overrides config)")]
    tag_prefix: Option<String>,

    #[arg(long, help = "Verify this version exists instead of computing a new one")]
    seek_version: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.verbose {
        std::env::set_var("RUST_LOG", "debug");
    } else if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let major_version = match args.major_version.or(config.tagging.major_version) {
        Some(major) => major,
        None => {
            ui::display_error("No major version given; set --major-version or tagging.major_version");
            std::process::exit(1);
        }
    };

    let workflow_args = WorkflowArgs {
        owner: args.owner,
        repo: args.repo,
        git_ref: args.git_ref,
        sha: args.sha,
        major_version,
        tag_prefix: args.tag_prefix.unwrap_or(config.tagging.tag_prefix),
        seek_version: args.seek_version,
        version_file: config.tagging.version_file,
        dry_run: args.dry_run,
    };

    let host = match GithubHost::new(&config.api.base_url, &args.token) {
        Ok(host) => host,
        Err(e) => {
            ui::display_error(&format!("Cannot create API client: {}", e));
            std::process::exit(1);
        }
    };

    ui::display_status(&format!(
        "Computing next version for {}/{} on {}",
        workflow_args.owner, workflow_args.repo, workflow_args.git_ref
    ));

    let result = match workflow::run_tagging_workflow(&host, &workflow_args) {
        Ok(result) => result,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    if workflow_args.dry_run {
        ui::display_status(&format!("Dry run: would create tag {}", result.tag));
    } else {
        ui::display_success(&format!("Tag {} created", result.tag));
    }
    ui::display_outputs(&result);

    if let Ok(output_path) = std::env::var("GITHUB_OUTPUT") {
        workflow::append_outputs(&PathBuf::from(output_path), &result)?;
    }

    Ok(())
}
