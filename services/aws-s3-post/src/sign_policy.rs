use crate::constants::{
    ACL, ALGORITHM_AWS4_HMAC_SHA256, AWS4_REQUEST, BUCKET, CONTENT_TYPE, KEY, POLICY,
    REQUESTED_WITH_XHR, SERVICE_S3, STATUS_CREATED, SUCCESS_ACTION_STATUS, X_AMZ_ALGORITHM,
    X_AMZ_CREDENTIAL, X_AMZ_DATE, X_AMZ_SECURITY_TOKEN, X_AMZ_SIGNATURE, X_REQUESTED_WITH,
};
use crate::policy::{Condition, PolicyDocument};
use crate::region;
use crate::Credential;
use log::debug;
use postsign_core::hash::{hex_hmac_sha256, hmac_sha256};
use postsign_core::time::{format_date, format_iso8601_with_separator, now, DateTime};
use postsign_core::utils::Redact;
use postsign_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};

/// PolicySigner that produces signed S3 POST policies.
///
/// - [Browser-based uploads using POST](https://docs.aws.amazon.com/AmazonS3/latest/API/sigv4-UsingHTTPPOST.html)
///
/// The signer holds the upload constraints (bucket, key prefix, ACL,
/// region); credentials are passed per call. Each call captures the wall
/// clock once and produces a policy valid for five minutes.
#[derive(Debug, Clone)]
pub struct PolicySigner {
    bucket: String,
    key_start: String,
    acl: String,
    region: Option<String>,

    time: Option<DateTime>,
}

impl PolicySigner {
    /// Create a new signer for uploads into `bucket` under `key_start`.
    pub fn new(bucket: &str, key_start: &str, acl: &str) -> Self {
        Self {
            bucket: bucket.into(),
            key_start: key_start.into(),
            acl: acl.into(),
            region: None,

            time: None,
        }
    }

    /// Specify the bucket region.
    ///
    /// Defaults to us-east-1 when not set; the legacy `"s3"` token is
    /// accepted as an alias for it.
    pub fn with_region(mut self, region: &str) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign policies.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Sign an upload policy with the given credential.
    ///
    /// Pure apart from one wall-clock read: same input and same time means
    /// byte-identical output. Fails before any hashing when the credential
    /// or region cannot produce a policy the provider would accept.
    pub fn sign(&self, cred: &Credential) -> Result<SignedPostPolicy> {
        if cred.access_key_id.is_empty() || cred.secret_access_key.is_empty() {
            return Err(Error::credential_missing(
                "access key id and secret access key are required",
            ));
        }
        if !cred.is_valid() {
            return Err(Error::credential_expired(format!(
                "credential {:?} is expired or about to expire",
                cred
            )));
        }

        let region = region::normalize(self.region.as_deref());
        region::validate(region)?;

        let now = match self.time {
            Some(t) => t,
            None => now()?,
        };
        let date_stamp = format_date(now);
        // The time-of-day component stays zeroed: the credential scope is
        // derived per calendar day and the date form field must match it.
        let amz_date = format!("{date_stamp}T000000Z");

        // Scope: "<access key>/20240101/us-west-2/s3/aws4_request"
        let scope = format!(
            "{}/{}/{}/{}/{}",
            cred.access_key_id, date_stamp, region, SERVICE_S3, AWS4_REQUEST
        );
        debug!("calculated scope: {scope}");

        let expiration = now + chrono::TimeDelta::try_minutes(5).expect("in bounds");

        let mut conditions = vec![
            Condition::equal(BUCKET, self.bucket.as_str()),
            Condition::equal(ACL, self.acl.as_str()),
            Condition::equal(SUCCESS_ACTION_STATUS, STATUS_CREATED),
            Condition::equal(X_REQUESTED_WITH, REQUESTED_WITH_XHR),
            Condition::equal(X_AMZ_ALGORITHM, ALGORITHM_AWS4_HMAC_SHA256),
            Condition::equal(X_AMZ_CREDENTIAL, scope.as_str()),
            Condition::equal(X_AMZ_DATE, amz_date.as_str()),
            Condition::starts_with(KEY, self.key_start.as_str()),
            // Accept all content types.
            Condition::starts_with(CONTENT_TYPE, ""),
        ];
        if let Some(token) = &cred.session_token {
            conditions.push(Condition::starts_with(X_AMZ_SECURITY_TOKEN, token.as_str()));
        }

        let policy = PolicyDocument {
            expiration: format_iso8601_with_separator(expiration),
            conditions,
        };
        let policy_base64 = policy.encode()?;
        debug!("encoded policy document: {} bytes", policy_base64.len());

        let signing_key = generate_signing_key(&cred.secret_access_key, now, region, SERVICE_S3);
        let signature = hex_hmac_sha256(&signing_key, policy_base64.as_bytes());

        Ok(SignedPostPolicy {
            bucket: self.bucket.clone(),
            region: region::endpoint_alias(region),
            key_start: self.key_start.clone(),
            params: PostParams {
                acl: self.acl.clone(),
                policy: policy_base64,
                algorithm: ALGORITHM_AWS4_HMAC_SHA256.into(),
                credential: scope,
                date: amz_date,
                signature,
                security_token: cred.session_token.clone(),
            },
        })
    }
}

/// Everything a client needs to issue the upload form.
///
/// Serializes as `{bucket, region, keyStart, params}`. The region here is
/// the endpoint-style alias (`s3` or `s3-{region}`) used to build the
/// upload hostname; the scope inside `params` keeps the canonical region.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedPostPolicy {
    /// Target bucket, unchanged from the signer.
    pub bucket: String,
    /// Endpoint-style region alias.
    pub region: String,
    /// Key prefix uploads are constrained to.
    #[serde(rename = "keyStart")]
    pub key_start: String,
    /// Form fields to embed in the upload request.
    pub params: PostParams,
}

/// The hidden form fields that accompany an upload.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostParams {
    /// Canned ACL applied to the uploaded object.
    pub acl: String,
    /// Base64-encoded policy document.
    pub policy: String,
    /// Fixed algorithm identifier.
    #[serde(rename = "x-amz-algorithm")]
    pub algorithm: String,
    /// Credential scope string.
    #[serde(rename = "x-amz-credential")]
    pub credential: String,
    /// Signing date, day granularity.
    #[serde(rename = "x-amz-date")]
    pub date: String,
    /// Hex-encoded policy signature.
    #[serde(rename = "x-amz-signature")]
    pub signature: String,
    /// Session token, present only when signed with temporary credentials.
    #[serde(
        rename = "x-amz-security-token",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub security_token: Option<String>,
}

impl PostParams {
    /// The form fields as ordered pairs, ready to embed in a multipart form.
    pub fn to_form_fields(&self) -> Vec<(&'static str, &str)> {
        let mut fields = vec![
            (ACL, self.acl.as_str()),
            (POLICY, self.policy.as_str()),
            (X_AMZ_ALGORITHM, self.algorithm.as_str()),
            (X_AMZ_CREDENTIAL, self.credential.as_str()),
            (X_AMZ_DATE, self.date.as_str()),
            (X_AMZ_SIGNATURE, self.signature.as_str()),
        ];
        if let Some(token) = &self.security_token {
            fields.push((X_AMZ_SECURITY_TOKEN, token.as_str()));
        }

        fields
    }
}

impl Debug for PostParams {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostParams")
            .field("acl", &self.acl)
            .field("policy", &self.policy)
            .field("algorithm", &self.algorithm)
            .field("credential", &self.credential)
            .field("date", &self.date)
            .field("signature", &self.signature)
            .field("security_token", &Redact::from(&self.security_token))
            .finish()
    }
}

fn generate_signing_key(secret: &str, time: DateTime, region: &str, service: &str) -> Vec<u8> {
    // Sign secret
    let secret = format!("AWS4{secret}");
    // Sign date
    let sign_date = hmac_sha256(secret.as_bytes(), format_date(time).as_bytes());
    // Sign region
    let sign_region = hmac_sha256(sign_date.as_slice(), region.as_bytes());
    // Sign service
    let sign_service = hmac_sha256(sign_region.as_slice(), service.as_bytes());
    // Sign request
    hmac_sha256(sign_service.as_slice(), AWS4_REQUEST.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono::Utc;
    use postsign_core::time::parse_iso8601_with_separator;
    use postsign_core::ErrorKind;
    use pretty_assertions::assert_eq;

    fn frozen_time() -> DateTime {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn test_signer() -> PolicySigner {
        PolicySigner::new("b", "editor/", "public-read")
            .with_region("us-west-2")
            .with_time(frozen_time())
    }

    #[test]
    fn test_signing_key_chain_known_answer() {
        // Vector from rust-s3's POST policy tests: signing key derived for
        // 2015-12-29/us-east-1/s3 over a fixed policy document.
        let policy_base64 = "eyJleHBpcmF0aW9uIjoiMjAxNS0xMi0zMFQwMDowMDowMFoiLCJjb25kaXRpb25zIjpbWyJzdGFydHMtd2l0aCIsIiRrZXkiLCJ1c2VyL3VzZXIxLyJdLFsiY29udGVudC1sZW5ndGgtcmFuZ2UiLDAsMzAwMDAwMF0seyJidWNrZXQiOiJydXN0LXMzIn0seyJ4LWFtei1hbGdvcml0aG0iOiJBV1M0LUhNQUMtU0hBMjU2In0seyJ4LWFtei1jcmVkZW50aWFsIjoiQUtJQUlPU0ZPRE5ON0VYQU1QTEUvMjAxNTEyMjkvdXMtZWFzdC0xL3MzL2F3czRfcmVxdWVzdCJ9LHsieC1hbXotZGF0ZSI6IjIwMTUxMjI5VDAwMDAwMFoifV19";

        let time = Utc.with_ymd_and_hms(2015, 12, 29, 0, 0, 0).unwrap();
        let key = generate_signing_key(
            "wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY",
            time,
            "us-east-1",
            SERVICE_S3,
        );
        let signature = hex_hmac_sha256(&key, policy_base64.as_bytes());

        assert_eq!(
            signature,
            "0ff9c50ab7e543a841e91e5c663fd32117c5243e56e7a69db88f94ee95c4706f"
        );
    }

    #[test]
    fn test_sign_matches_hand_rolled_chain() {
        let _ = env_logger::builder().is_test(true).try_init();

        let signed = test_signer().sign(&Credential::new("AK", "SK")).unwrap();

        assert_eq!(signed.bucket, "b");
        assert_eq!(signed.region, "s3-us-west-2");
        assert_eq!(signed.key_start, "editor/");
        assert_eq!(signed.params.credential, "AK/20240101/us-west-2/s3/aws4_request");
        assert_eq!(signed.params.date, "20240101T000000Z");
        assert_eq!(signed.params.algorithm, "AWS4-HMAC-SHA256");
        assert_eq!(signed.params.acl, "public-read");

        // Re-derive the signature stage by stage.
        let k_date = hmac_sha256(b"AWS4SK", b"20240101");
        let k_region = hmac_sha256(&k_date, b"us-west-2");
        let k_service = hmac_sha256(&k_region, b"s3");
        let k_signing = hmac_sha256(&k_service, b"aws4_request");
        assert_eq!(
            signed.params.signature,
            hex_hmac_sha256(&k_signing, signed.params.policy.as_bytes())
        );
    }

    #[test]
    fn test_sign_is_deterministic_under_frozen_clock() {
        let signer = test_signer();
        let cred = Credential::new("AK", "SK");

        assert_eq!(signer.sign(&cred).unwrap(), signer.sign(&cred).unwrap());
    }

    #[test]
    fn test_policy_conditions_and_expiration() {
        let signed = test_signer().sign(&Credential::new("AK", "SK")).unwrap();
        let policy = PolicyDocument::decode(&signed.params.policy).unwrap();

        assert_eq!(
            parse_iso8601_with_separator(&policy.expiration).unwrap(),
            frozen_time() + chrono::TimeDelta::try_minutes(5).unwrap()
        );
        assert_eq!(
            policy.conditions,
            vec![
                Condition::equal("bucket", "b"),
                Condition::equal("acl", "public-read"),
                Condition::equal("success_action_status", "201"),
                Condition::equal("x-requested-with", "xhr"),
                Condition::equal("x-amz-algorithm", "AWS4-HMAC-SHA256"),
                Condition::equal("x-amz-credential", "AK/20240101/us-west-2/s3/aws4_request"),
                Condition::equal("x-amz-date", "20240101T000000Z"),
                Condition::starts_with("key", "editor/"),
                Condition::starts_with("Content-Type", ""),
            ]
        );
    }

    #[test]
    fn test_session_token_adds_one_trailing_condition() {
        let cred = Credential::new("AK", "SK");
        let cred_with_token = cred.clone().with_session_token("SomeSecurityToken");

        let plain = test_signer().sign(&cred).unwrap();
        let with_token = test_signer().sign(&cred_with_token).unwrap();

        let plain_policy = PolicyDocument::decode(&plain.params.policy).unwrap();
        let token_policy = PolicyDocument::decode(&with_token.params.policy).unwrap();

        assert_eq!(token_policy.conditions.len(), plain_policy.conditions.len() + 1);
        assert_eq!(
            token_policy.conditions.last().unwrap(),
            &Condition::starts_with("x-amz-security-token", "SomeSecurityToken")
        );
        assert_eq!(
            with_token.params.security_token.as_deref(),
            Some("SomeSecurityToken")
        );
        assert_eq!(plain.params.security_token, None);
    }

    #[test]
    fn test_default_region_and_legacy_alias() {
        let cred = Credential::new("AK", "SK");

        let default = PolicySigner::new("b", "editor/", "public-read")
            .with_time(frozen_time())
            .sign(&cred)
            .unwrap();
        let aliased = PolicySigner::new("b", "editor/", "public-read")
            .with_region("s3")
            .with_time(frozen_time())
            .sign(&cred)
            .unwrap();

        assert_eq!(default, aliased);
        assert_eq!(default.region, "s3");
        assert_eq!(default.params.credential, "AK/20240101/us-east-1/s3/aws4_request");
    }

    #[test]
    fn test_missing_credential_fails_fast() {
        let err = test_signer().sign(&Credential::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialMissing);

        let err = test_signer()
            .sign(&Credential::new("AK", ""))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialMissing);
    }

    #[test]
    fn test_expired_credential_is_rejected() {
        let cred = Credential::new("AK", "SK")
            .with_session_token("token")
            .with_expires_in(frozen_time());

        let err = test_signer().sign(&cred).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialExpired);
    }

    #[test]
    fn test_unrecognized_region_is_rejected() {
        let err = PolicySigner::new("b", "editor/", "public-read")
            .with_region("moon-base-1")
            .with_time(frozen_time())
            .sign(&Credential::new("AK", "SK"))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::RegionInvalid);
    }

    #[test]
    fn test_form_fields_order_and_token() {
        let cred = Credential::new("AK", "SK").with_session_token("token");
        let signed = test_signer().sign(&cred).unwrap();

        let names: Vec<&str> = signed
            .params
            .to_form_fields()
            .iter()
            .map(|(name, _)| *name)
            .collect();
        assert_eq!(
            names,
            vec![
                "acl",
                "policy",
                "x-amz-algorithm",
                "x-amz-credential",
                "x-amz-date",
                "x-amz-signature",
                "x-amz-security-token",
            ]
        );
    }

    #[test]
    fn test_params_debug_redacts_session_token() {
        let cred = Credential::new("AK", "SK").with_session_token("FwoGZXIvYXdzEBEaDFAKETOKENFAKETOKEN");
        let signed = test_signer().sign(&cred).unwrap();

        let repr = format!("{:?}", signed.params);
        assert!(!repr.contains("FwoGZXIvYXdzEBEaDFAKETOKENFAKETOKEN"));
    }
}
