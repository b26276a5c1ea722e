use std::fmt;
use std::path::Path;

use alipay::{keys, AlipayError, RsaPrivateKey, RsaPublicKey, SignType};

/// Merchant identity and key material for one client.
///
/// Built once, then shared read-only by every request the client issues.
#[derive(Clone)]
pub struct Credentials {
    app_id: String,
    private_key: RsaPrivateKey,
    public_key: RsaPublicKey,
    sign_type: SignType,
    sandbox: bool,
    notify_url: Option<String>,
    app_auth_token: Option<String>,
}

impl Credentials {
    /// `private_key` signs requests, `public_key` is the gateway's key used to
    /// verify what comes back.
    pub fn new(
        app_id: impl Into<String>,
        private_key: RsaPrivateKey,
        public_key: RsaPublicKey,
        sign_type: SignType,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            private_key,
            public_key,
            sign_type,
            sandbox: false,
            notify_url: None,
            app_auth_token: None,
        }
    }

    /// Build credentials from PEM text.
    pub fn from_pem(
        app_id: impl Into<String>,
        private_pem: &str,
        public_pem: &str,
        sign_type: SignType,
    ) -> Result<Self, AlipayError> {
        Ok(Self::new(
            app_id,
            keys::parse_private_key(private_pem)?,
            keys::parse_public_key(public_pem)?,
            sign_type,
        ))
    }

    /// Build credentials from PEM files. The files are read once, here.
    pub fn from_files(
        app_id: impl Into<String>,
        private_key_path: impl AsRef<Path>,
        public_key_path: impl AsRef<Path>,
        sign_type: SignType,
    ) -> Result<Self, AlipayError> {
        let private_pem = read_pem(private_key_path.as_ref())?;
        let public_pem = read_pem(public_key_path.as_ref())?;
        Self::from_pem(app_id, &private_pem, &public_pem, sign_type)
    }

    /// Target the sandbox gateway instead of production.
    pub fn with_sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    /// URL the gateway posts asynchronous payment notifications to.
    pub fn with_notify_url(mut self, url: impl Into<String>) -> Self {
        self.notify_url = Some(url.into());
        self
    }

    /// Token for acting on behalf of an authorized merchant.
    pub fn with_app_auth_token(mut self, token: impl Into<String>) -> Self {
        self.app_auth_token = Some(token.into());
        self
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn private_key(&self) -> &RsaPrivateKey {
        &self.private_key
    }

    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public_key
    }

    pub fn sign_type(&self) -> SignType {
        self.sign_type
    }

    pub fn is_sandbox(&self) -> bool {
        self.sandbox
    }

    pub fn notify_url(&self) -> Option<&str> {
        self.notify_url.as_deref()
    }

    pub fn app_auth_token(&self) -> Option<&str> {
        self.app_auth_token.as_deref()
    }
}

fn read_pem(path: &Path) -> Result<String, AlipayError> {
    std::fs::read_to_string(path)
        .map_err(|e| AlipayError::KeyError(format!("failed to read {}: {e}", path.display())))
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("app_id", &self.app_id)
            .field("private_key", &"[REDACTED]")
            .field("public_key", &"[REDACTED]")
            .field("sign_type", &self.sign_type)
            .field("sandbox", &self.sandbox)
            .field("notify_url", &self.notify_url)
            .field(
                "app_auth_token",
                &self.app_auth_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}
