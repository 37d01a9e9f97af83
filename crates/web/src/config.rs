use anyhow::{Context, Result, ensure};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    pub page_size: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let page_size: u32 = match std::env::var("PAGE_SIZE") {
            Ok(value) => value.parse().context("PAGE_SIZE must be a number")?,
            Err(_) => 50,
        };
        ensure!(
            (1..=storage::dto::common::MAX_LIMIT).contains(&page_size),
            "PAGE_SIZE must be between 1 and {}",
            storage::dto::common::MAX_LIMIT
        );

        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("PORT must be a number")?
                .parse()?,
            database_url: std::env::var("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            database_max_connections: match std::env::var("DATABASE_MAX_CONNECTIONS") {
                Ok(value) => value
                    .parse()
                    .context("DATABASE_MAX_CONNECTIONS must be a number")?,
                Err(_) => 10,
            },
            page_size,
        })
    }
}
