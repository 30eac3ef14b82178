mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tagsync",
    about = "Publish tagged container images and sync the GitOps descriptor"
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the release job: guard, build, publish, descriptor sync
    Run {
        /// Repository root (build context and git work tree)
        #[arg(long, default_value = ".")]
        context: PathBuf,
        /// Skip the image build and registry pushes
        #[arg(long)]
        skip_publish: bool,
        /// Skip the descriptor rewrite and sync commit
        #[arg(long)]
        skip_sync: bool,
    },
    /// Print the image tag that would be generated for HEAD
    Tag {
        /// Repository root
        #[arg(long, default_value = ".")]
        context: PathBuf,
    },
    /// Rewrite the descriptor image line to the given tag, without committing
    Patch {
        /// Tag to write into the descriptor
        #[arg(long)]
        tag: String,
        /// Repository root
        #[arg(long, default_value = ".")]
        context: PathBuf,
    },
    /// Check that the environment is ready to run a release
    Check {
        /// Repository root
        #[arg(long, default_value = ".")]
        context: PathBuf,
    },
    /// Write tagsync.toml and the GitHub Actions release workflow
    Init,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::debug!(dotenv = dotenv_loaded, "starting tagsync");

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            context,
            skip_publish,
            skip_sync,
        } => commands::run(&context, skip_publish, skip_sync).await?,
        Commands::Tag { context } => commands::tag(&context).await?,
        Commands::Patch { tag, context } => commands::patch(&tag, &context)?,
        Commands::Check { context } => commands::check(&context).await?,
        Commands::Init => commands::init()?,
    }

    Ok(())
}
