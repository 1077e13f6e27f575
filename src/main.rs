use anyhow::Result;
use clap::Parser;

use release_scope::cli::{run_release_scope, ScopeWorkflowArgs};
use release_scope::config::{self, GitBackend};
use release_scope::git::{Git2Gateway, SystemGitGateway, VersionControlGateway};
use release_scope::logging;
use release_scope::marker::{HttpMarkerSource, ReleaseMarkerSource, StaticMarkerSource};
use release_scope::ui::{self, ConsoleReporter, JsonReporter, Reporter};

#[derive(clap::Parser)]
#[command(
    name = "release-scope",
    version,
    about = "List mainline commits and tickets that have not reached the deployed release"
)]
struct Args {
    #[arg(help = "Release branch to compare (defaults to the current branch)")]
    release_branch: Option<String>,

    #[arg(help = "Mainline branch to measure against (defaults to config, then \"master\")")]
    mainline_branch: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Use this deployed commit instead of fetching the release marker")]
    marker: Option<String>,

    #[arg(long, help = "Do not fetch the remote before reading branch histories")]
    no_fetch: bool,

    #[arg(long, value_enum, help = "Git implementation used to read histories")]
    backend: Option<GitBackend>,

    #[arg(long, help = "Print the report as JSON")]
    json: bool,

    #[arg(short, long, help = "Enable debug logging on stderr")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let gateway: Box<dyn VersionControlGateway> = match args.backend.unwrap_or(config.git.backend) {
        GitBackend::Git2 => match Git2Gateway::open(".") {
            Ok(gateway) => Box::new(gateway),
            Err(e) => {
                ui::display_error(&format!("Git repository error: {}", e));
                std::process::exit(1);
            }
        },
        GitBackend::System => Box::new(SystemGitGateway::new(".")),
    };

    let marker_source: Box<dyn ReleaseMarkerSource> = match &args.marker {
        Some(hash) => Box::new(StaticMarkerSource::new(hash)),
        None => Box::new(HttpMarkerSource::new(config.marker.url.clone())),
    };

    let workflow_args = ScopeWorkflowArgs {
        release_branch: args.release_branch,
        mainline_branch: args.mainline_branch,
        fetch: config.git.fetch && !args.no_fetch,
    };

    let scope = match run_release_scope(&workflow_args, &config.git, &*gateway, &*marker_source) {
        Ok(scope) => scope,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    let reporter: Box<dyn Reporter> = if args.json {
        Box::new(JsonReporter::new(config.tracker.base_url.clone()))
    } else {
        Box::new(ConsoleReporter::new(config.tracker.base_url.clone()))
    };
    reporter.report(&scope)?;

    Ok(())
}
