/*
[INPUT]:  Ordered request parameters and the API secret
[OUTPUT]: Canonical query strings and hex HMAC-SHA256 signatures
[POS]:    HTTP layer - request signing for authenticated endpoints
[UPDATE]: When changing signing algorithm or query encoding
*/

use std::fmt;

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use url::form_urlencoded;

use crate::http::{OrderError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Signs query strings for `SIGNED` endpoints
#[derive(Clone)]
pub struct RequestSigner {
    mac: HmacSha256,
}

impl RequestSigner {
    /// Create a signer keyed with the API secret
    pub fn new(secret: &SecretString) -> Result<Self> {
        let mac = HmacSha256::new_from_slice(secret.expose_secret().as_bytes())
            .map_err(|err| OrderError::Config(format!("invalid API secret: {err}")))?;
        Ok(Self { mac })
    }

    /// Sign a payload according to the exchange's HMAC scheme
    ///
    /// Returns the lowercase hex digest of HMAC-SHA256(secret, payload).
    pub fn sign(&self, payload: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

impl fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestSigner").finish_non_exhaustive()
    }
}

/// Encode parameters as `k=v&k=v` in the order given.
///
/// The signature is computed over exactly this string, so the same encoder
/// must be used for both signing and sending.
pub fn canonical_query<K, V>(params: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        serializer.append_pair(key.as_ref(), value.as_ref());
    }
    serializer.finish()
}
