use anyhow::Result;
use clap::Parser;
use sat_intake::cli::Cli;
use sat_intake::{logger, App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Cargar configuración
    let config = Config::load()?;

    // Inicializar logs
    logger::init_with_verbosity(cli.verbose || config.verbose_logging);

    // Inicializar y ejecutar
    let mut app = App::initialize(config)?;
    app.run(cli.command).await?;

    Ok(())
}
