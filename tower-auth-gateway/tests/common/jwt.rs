use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::json;

use crate::common::TEST_SECRET;

#[derive(Clone, Debug)]
pub struct JwtBuilder {
    secret: String,
    algorithm: Algorithm,
    iss: Option<String>,
    sub: Option<String>,
    aud: Option<String>,
    nbf: Option<u64>,
    exp: Option<u64>,
    custom_claims: Vec<(String, String)>,
}

impl JwtBuilder {
    pub fn new() -> Self {
        JwtBuilder::default()
    }

    #[allow(dead_code)]
    pub fn secret<S: Into<String>>(mut self, secret: S) -> Self {
        self.secret = secret.into();
        self
    }

    #[allow(dead_code)]
    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    #[allow(dead_code)]
    pub fn iss<S: Into<String>>(mut self, iss: S) -> Self {
        self.iss = Some(iss.into());
        self
    }

    pub fn sub<S: Into<String>>(mut self, sub: S) -> Self {
        self.sub = Some(sub.into());
        self
    }

    pub fn aud<S: Into<String>>(mut self, aud: S) -> Self {
        self.aud = Some(aud.into());
        self
    }

    #[allow(dead_code)]
    pub fn nbf(mut self, nbf: u64) -> Self {
        self.nbf = Some(nbf);
        self
    }

    pub fn exp(mut self, exp: u64) -> Self {
        self.exp = Some(exp);
        self
    }

    pub fn custom_claim(mut self, key: String, value: String) -> Self {
        self.custom_claims.push((key, value));
        self
    }

    pub fn build(&self) -> String {
        let header = Header::new(self.algorithm);

        let mut claims = json!({});

        if let Some(ref iss) = self.iss {
            claims["iss"] = json!(iss);
        }
        if let Some(ref sub) = self.sub {
            claims["sub"] = json!(sub);
        }
        if let Some(ref aud) = self.aud {
            claims["aud"] = json!(aud);
        }
        if let Some(nbf) = self.nbf {
            claims["nbf"] = json!(nbf);
        }
        if let Some(exp) = self.exp {
            claims["exp"] = json!(exp);
        }

        for (key, value) in &self.custom_claims {
            claims[key] = json!(value);
        }

        encode(
            &header,
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .unwrap()
    }
}

impl Default for JwtBuilder {
    fn default() -> Self {
        JwtBuilder {
            secret: TEST_SECRET.to_owned(),
            algorithm: Algorithm::HS256,
            iss: None,
            sub: None,
            aud: None,
            nbf: None,
            exp: None,
            custom_claims: Vec::new(),
        }
    }
}
