use crate::constants::SERVICE_S3;
use postsign_core::{Error, Result};

/// Region used when the caller does not name one.
///
/// This is also what the legacy `"s3"` alias resolves to: at the API level
/// the bare service token and us-east-1 are interchangeable, but the scope
/// string must carry the canonical region.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Region tokens the scope string may carry.
///
/// Kept in sync with the public AWS region table. Unknown tokens are
/// rejected before any hashing so a caller cannot obtain a policy the
/// provider would refuse anyway.
const RECOGNIZED_REGIONS: &[&str] = &[
    "af-south-1",
    "ap-east-1",
    "ap-northeast-1",
    "ap-northeast-2",
    "ap-northeast-3",
    "ap-south-1",
    "ap-south-2",
    "ap-southeast-1",
    "ap-southeast-2",
    "ap-southeast-3",
    "ap-southeast-4",
    "ca-central-1",
    "ca-west-1",
    "cn-north-1",
    "cn-northwest-1",
    "eu-central-1",
    "eu-central-2",
    "eu-north-1",
    "eu-south-1",
    "eu-south-2",
    "eu-west-1",
    "eu-west-2",
    "eu-west-3",
    "il-central-1",
    "me-central-1",
    "me-south-1",
    "sa-east-1",
    "us-east-1",
    "us-east-2",
    "us-gov-east-1",
    "us-gov-west-1",
    "us-west-1",
    "us-west-2",
];

/// Normalize a caller-supplied region into its canonical form.
///
/// Absent and empty regions default to [`DEFAULT_REGION`], and the legacy
/// `"s3"` alias is remapped to it.
pub fn normalize(region: Option<&str>) -> &str {
    match region {
        None => DEFAULT_REGION,
        Some(r) if r.is_empty() || r == SERVICE_S3 => DEFAULT_REGION,
        Some(r) => r,
    }
}

/// Check that a normalized region is a recognized region token.
pub fn validate(region: &str) -> Result<()> {
    if RECOGNIZED_REGIONS.binary_search(&region).is_ok() {
        return Ok(());
    }

    Err(Error::region_invalid(format!(
        "{region} is not a recognized region"
    )))
}

/// Endpoint-style alias for a normalized region.
///
/// The result names the S3 endpoint host prefix, not the scope region:
/// us-east-1 is plain `s3`, every other region is `s3-{region}`.
pub fn endpoint_alias(region: &str) -> String {
    if region == DEFAULT_REGION {
        SERVICE_S3.to_string()
    } else {
        format!("{SERVICE_S3}-{region}")
    }
}
