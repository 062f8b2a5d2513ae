//! AWS S3 POST policy signer.
//!
//! Produces the signed form fields that let a browser upload an object
//! directly to a bucket without ever seeing the secret key.
//!
//! ```
//! use postsign_aws_s3_post::{Credential, PolicySigner};
//!
//! # fn main() -> postsign_core::Result<()> {
//! let signer = PolicySigner::new("my-bucket", "editor/", "public-read")
//!     .with_region("us-west-2");
//! let cred = Credential::new("access_key_id", "secret_access_key");
//!
//! let signed = signer.sign(&cred)?;
//! assert_eq!(signed.region, "s3-us-west-2");
//! // signed.params holds the hidden form fields for the upload request.
//! # Ok(())
//! # }
//! ```

mod constants;

mod credential;
pub use credential::Credential;

mod policy;
pub use policy::Condition;
pub use policy::PolicyDocument;

mod region;

mod sign_policy;
pub use sign_policy::PolicySigner;
pub use sign_policy::PostParams;
pub use sign_policy::SignedPostPolicy;
