use blogdesk::cli::{Cli, Commands};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blogdesk=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init { path }) => {
            blogdesk::cli::init::run(path).await?;
        }
        Some(Commands::Migrate) => {
            blogdesk::cli::migrate::run(&cli.config).await?;
        }
        Some(Commands::Serve { host, port }) => {
            blogdesk::cli::serve::run(&cli.config, host, port).await?;
        }
        Some(Commands::Seo { id }) => {
            blogdesk::cli::seo::run(&cli.config, id).await?;
        }
        Some(Commands::Export {
            output,
            include_drafts,
        }) => {
            blogdesk::cli::export::run(&cli.config, &output, include_drafts).await?;
        }
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
        }
    }

    Ok(())
}
