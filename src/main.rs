use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use tracing::debug;

use version_tags::config::ToolConfig;
use version_tags::logging;
use version_tags::version::build_tagged_versions;

#[derive(Parser)]
#[command(name = "version-tags")]
#[command(version, about = "Show which published versions a dependency declaration points at")]
struct Cli {
    /// Requested version expression, e.g. "^1.2.0"
    requested: String,

    /// Published versions, newest first. Read from stdin when omitted
    versions: Vec<String>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Channel names to show (comma separated), overrides the config allow-list
    #[arg(long, value_delimiter = ',')]
    tags: Vec<String>,

    /// Do not list pre-release channels
    #[arg(long)]
    no_prereleases: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = ToolConfig::load(cli.config.as_deref())?;
    let _guard = logging::init(&config.log)?;

    if !cli.tags.is_empty() {
        config.tags.allow_list = cli.tags;
    }
    if cli.no_prereleases {
        config.tags.show_prereleases = false;
    }

    let versions = if cli.versions.is_empty() {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;
        input.split_whitespace().map(str::to_string).collect()
    } else {
        cli.versions
    };
    debug!("Resolving {:?} against {} versions", cli.requested, versions.len());

    let tags = build_tagged_versions(&versions, &cli.requested, &config.tags);

    let output = if cli.pretty {
        serde_json::to_string_pretty(&tags)?
    } else {
        serde_json::to_string(&tags)?
    };
    println!("{}", output);

    Ok(())
}
