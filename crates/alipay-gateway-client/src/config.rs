use std::env;
use std::path::PathBuf;

use alipay::{AlipayError, SignType};
use url::Url;

use crate::credentials::Credentials;

/// Client settings read from the environment.
///
/// | variable | |
/// |---|---|
/// | `ALIPAY_APP_ID` | required |
/// | `ALIPAY_PRIVATE_KEY_PATH` | required, merchant key PEM |
/// | `ALIPAY_PUBLIC_KEY_PATH` | required, gateway key PEM |
/// | `ALIPAY_SIGN_TYPE` | `RSA` or `RSA2` (default) |
/// | `ALIPAY_SANDBOX` | `true` / `false` (default) |
/// | `ALIPAY_NOTIFY_URL` | optional |
/// | `ALIPAY_APP_AUTH_TOKEN` | optional |
/// | `ALIPAY_GATEWAY_URL` | optional endpoint override |
#[derive(Clone)]
pub struct AlipayConfig {
    pub app_id: String,
    pub private_key_path: PathBuf,
    pub public_key_path: PathBuf,
    pub sign_type: SignType,
    pub sandbox: bool,
    pub notify_url: Option<String>,
    pub app_auth_token: Option<String>,
    pub gateway_url: Option<String>,
}

impl std::fmt::Debug for AlipayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlipayConfig")
            .field("app_id", &self.app_id)
            .field("private_key_path", &self.private_key_path)
            .field("public_key_path", &self.public_key_path)
            .field("sign_type", &self.sign_type)
            .field("sandbox", &self.sandbox)
            .field("notify_url", &self.notify_url)
            .field(
                "app_auth_token",
                &self.app_auth_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("gateway_url", &self.gateway_url)
            .finish()
    }
}

impl AlipayConfig {
    /// Load from the process environment, after merging a `.env` file if one
    /// is present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &'static str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &'static str| var(name).ok_or(ConfigError::MissingRequired(name));

        let app_id = required("ALIPAY_APP_ID")?;
        let private_key_path = PathBuf::from(required("ALIPAY_PRIVATE_KEY_PATH")?);
        let public_key_path = PathBuf::from(required("ALIPAY_PUBLIC_KEY_PATH")?);

        let sign_type = match var("ALIPAY_SIGN_TYPE") {
            Some(s) => s.trim().parse::<SignType>().map_err(|_| ConfigError::Invalid {
                var: "ALIPAY_SIGN_TYPE",
                reason: format!("{s:?} is not RSA or RSA2"),
            })?,
            None => SignType::default(),
        };

        let sandbox = match var("ALIPAY_SANDBOX") {
            Some(s) => parse_bool(&s).ok_or_else(|| ConfigError::Invalid {
                var: "ALIPAY_SANDBOX",
                reason: format!("{s:?} is not a boolean"),
            })?,
            None => false,
        };

        let notify_url = var("ALIPAY_NOTIFY_URL")
            .map(|u| validate_url("ALIPAY_NOTIFY_URL", u))
            .transpose()?;
        let gateway_url = var("ALIPAY_GATEWAY_URL")
            .map(|u| validate_url("ALIPAY_GATEWAY_URL", u))
            .transpose()?;

        Ok(Self {
            app_id,
            private_key_path,
            public_key_path,
            sign_type,
            sandbox,
            notify_url,
            app_auth_token: var("ALIPAY_APP_AUTH_TOKEN"),
            gateway_url,
        })
    }

    /// Read the key files and build [`Credentials`].
    pub fn credentials(&self) -> Result<Credentials, AlipayError> {
        let mut credentials = Credentials::from_files(
            self.app_id.clone(),
            &self.private_key_path,
            &self.public_key_path,
            self.sign_type,
        )?
        .with_sandbox(self.sandbox);
        if let Some(url) = &self.notify_url {
            credentials = credentials.with_notify_url(url.clone());
        }
        if let Some(token) = &self.app_auth_token {
            credentials = credentials.with_app_auth_token(token.clone());
        }
        Ok(credentials)
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn validate_url(var: &'static str, value: String) -> Result<String, ConfigError> {
    let parsed = Url::parse(&value).map_err(|e| ConfigError::Invalid {
        var,
        reason: format!("invalid URL {value:?}: {e}"),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::Invalid {
            var,
            reason: format!("{value:?} is not an http(s) URL"),
        });
    }
    Ok(value)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingRequired(&'static str),
    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

impl From<ConfigError> for AlipayError {
    fn from(e: ConfigError) -> Self {
        AlipayError::ConfigError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("ALIPAY_APP_ID", "2021000000000000"),
        ("ALIPAY_PRIVATE_KEY_PATH", "/keys/app_private.pem"),
        ("ALIPAY_PUBLIC_KEY_PATH", "/keys/alipay_public.pem"),
    ];

    #[test]
    fn test_defaults() {
        let config = AlipayConfig::from_lookup(lookup(&REQUIRED)).unwrap();
        assert_eq!(config.app_id, "2021000000000000");
        assert_eq!(config.sign_type, SignType::Rsa2);
        assert!(!config.sandbox);
        assert!(config.notify_url.is_none());
        assert!(config.gateway_url.is_none());
    }

    #[test]
    fn test_missing_app_id() {
        let err = AlipayConfig::from_lookup(lookup(&REQUIRED[1..])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequired("ALIPAY_APP_ID")));
    }

    #[test]
    fn test_blank_counts_as_missing() {
        let mut vars = REQUIRED.to_vec();
        vars[2] = ("ALIPAY_PUBLIC_KEY_PATH", "  ");
        let err = AlipayConfig::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingRequired("ALIPAY_PUBLIC_KEY_PATH")
        ));
    }

    #[test]
    fn test_optional_fields() {
        let mut vars = REQUIRED.to_vec();
        vars.extend([
            ("ALIPAY_SIGN_TYPE", "RSA"),
            ("ALIPAY_SANDBOX", "TRUE"),
            ("ALIPAY_NOTIFY_URL", "https://shop.example.com/notify"),
            ("ALIPAY_APP_AUTH_TOKEN", "201708BB28623ce3d10f4f4f2e9a1a7d"),
        ]);
        let config = AlipayConfig::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.sign_type, SignType::Rsa);
        assert!(config.sandbox);
        assert_eq!(
            config.notify_url.as_deref(),
            Some("https://shop.example.com/notify")
        );
        let dbg = format!("{config:?}");
        assert!(!dbg.contains("201708BB28623ce3d10f4f4f2e9a1a7d"));
    }

    #[test]
    fn test_invalid_values() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("ALIPAY_SIGN_TYPE", "MD5"));
        assert!(matches!(
            AlipayConfig::from_lookup(lookup(&vars)),
            Err(ConfigError::Invalid { var: "ALIPAY_SIGN_TYPE", .. })
        ));

        let mut vars = REQUIRED.to_vec();
        vars.push(("ALIPAY_SANDBOX", "maybe"));
        assert!(matches!(
            AlipayConfig::from_lookup(lookup(&vars)),
            Err(ConfigError::Invalid { var: "ALIPAY_SANDBOX", .. })
        ));

        let mut vars = REQUIRED.to_vec();
        vars.push(("ALIPAY_GATEWAY_URL", "ftp://example.com"));
        assert!(matches!(
            AlipayConfig::from_lookup(lookup(&vars)),
            Err(ConfigError::Invalid { var: "ALIPAY_GATEWAY_URL", .. })
        ));
    }

    #[test]
    fn test_config_error_converts() {
        let err: AlipayError = ConfigError::MissingRequired("ALIPAY_APP_ID").into();
        assert!(matches!(err, AlipayError::ConfigError(msg) if msg.contains("ALIPAY_APP_ID")));
    }
}
