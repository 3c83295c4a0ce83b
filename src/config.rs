//! Connection and server configuration.
//!
//! Everything is read once at startup and passed into constructors; no
//! module reads the environment on its own.

use serde::Serialize;

/// Connection parameters for the remote Odoo server.
#[derive(Debug, Clone)]
pub struct OdooConfig {
    /// Base URL of the Odoo server, e.g. `http://127.0.0.1:8069`.
    pub server: String,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl OdooConfig {
    pub fn from_env() -> Self {
        Self {
            server: env_or("ODOO_SERVER", "http://127.0.0.1:8069"),
            database: env_or("ODOO_DB", "odoodb"),
            username: env_or("ODOO_USERNAME", "admin"),
            password: env_or("ODOO_PASSWORD", "admin"),
        }
    }

    /// The subset of the config that is safe to show on the landing page.
    pub fn display(&self) -> ConfigDisplay {
        ConfigDisplay {
            server: self.server.clone(),
            database: self.database.clone(),
            username: self.username.clone(),
        }
    }
}

/// Connection info rendered on the landing page. The password never
/// leaves the config struct.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigDisplay {
    pub server: String,
    pub database: String,
    pub username: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub odoo: OdooConfig,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let port = std::env::var("SERVER_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8000);
        Self {
            odoo: OdooConfig::from_env(),
            port,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_omits_password() {
        let config = OdooConfig {
            server: "http://odoo:8069".into(),
            database: "db".into(),
            username: "admin".into(),
            password: "secret".into(),
        };
        let json = serde_json::to_value(config.display()).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["server"], "http://odoo:8069");
    }
}
