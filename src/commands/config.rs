use crate::config::Config;
use crate::error::{DeskError, Result};

/// Show the whole configuration (token redacted).
pub fn cmd_config_show() -> Result<()> {
    let config = Config::load()?;
    println!("{:?}", config);
    Ok(())
}

/// Print one configuration value.
pub fn cmd_config_get(key: &str) -> Result<()> {
    let config = Config::load()?;
    match key {
        "api.url" => println!("{}", config.api.url.as_deref().unwrap_or("")),
        "api.token" => println!("{}", if config.api.token.is_some() { "[set]" } else { "" }),
        "timeout" => println!("{}", config.timeout),
        _ => return Err(DeskError::Config(format!("unknown config key '{}'", key))),
    }
    Ok(())
}

/// Set one configuration value and save the file.
pub fn cmd_config_set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;
    match key {
        "api.url" => config.set_api_url(value)?,
        "api.token" => config.set_token(value.to_string()),
        "timeout" => {
            let timeout: u64 = value
                .parse()
                .map_err(|_| DeskError::Config(format!("invalid timeout '{}'", value)))?;
            config.timeout = timeout;
        }
        _ => return Err(DeskError::Config(format!("unknown config key '{}'", key))),
    }
    config.save()?;
    Ok(())
}
