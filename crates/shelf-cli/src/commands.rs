use colored::Colorize;
use shelf_server::{DatabaseConfig, ServerConfig, ShelfServer};

use crate::cli::{Cli, Command, ConfigArgs};

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args.config).await,
        Command::CheckConfig(args) => cmd_check_config(args),
    }
}

/// Load the file (if any), then apply command-line overrides.
pub fn resolve_config(args: &ConfigArgs) -> anyhow::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(url) = &args.database_url {
        config.database = DatabaseConfig::Sqlite { url: url.clone() };
    }
    Ok(config)
}

async fn cmd_serve(args: ConfigArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args)?;
    ShelfServer::new(config).serve().await?;
    Ok(())
}

fn cmd_check_config(args: ConfigArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args)?;
    println!("{} configuration is valid", "✓".green().bold());
    println!("  bind:     {}", config.bind_addr.to_string().bold());
    println!("  database: {}", describe_database(&config.database).cyan());
    println!();
    print!("{}", config.to_toml_string()?);
    Ok(())
}

fn describe_database(database: &DatabaseConfig) -> String {
    match database {
        DatabaseConfig::Memory => "in-memory".to_string(),
        DatabaseConfig::Sqlite { url } => format!("sqlite {url}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ConfigArgs {
        ConfigArgs {
            config: None,
            bind: None,
            database_url: None,
        }
    }

    #[test]
    fn defaults_without_file() {
        assert_eq!(resolve_config(&args()).unwrap(), ServerConfig::default());
    }

    #[test]
    fn flags_override_defaults() {
        let mut a = args();
        a.bind = Some("0.0.0.0:9100".parse().unwrap());
        a.database_url = Some("sqlite::memory:".into());
        let config = resolve_config(&a).unwrap();
        assert_eq!(config.bind_addr.port(), 9100);
        assert_eq!(
            config.database,
            DatabaseConfig::Sqlite {
                url: "sqlite::memory:".into()
            }
        );
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let mut a = args();
        a.config = Some("/nonexistent/shelf.toml".into());
        assert!(resolve_config(&a).is_err());
    }

    #[test]
    fn database_description() {
        assert_eq!(describe_database(&DatabaseConfig::Memory), "in-memory");
        assert_eq!(
            describe_database(&DatabaseConfig::Sqlite {
                url: "sqlite://x.db".into()
            }),
            "sqlite sqlite://x.db"
        );
    }
}
