use anyhow::Result;
use postsign_aws_s3_post::{Credential, PolicySigner};

fn main() -> Result<()> {
    env_logger::init();

    // Create a signer for uploads into my-bucket under editor/
    let signer = PolicySigner::new("my-bucket", "editor/", "public-read").with_region("us-west-2");

    // Credentials would come from the surrounding service in real use
    let cred = Credential::new("access_key_id", "secret_access_key");

    // Sign the upload policy
    let signed = signer.sign(&cred)?;

    println!("upload endpoint region: {}", signed.region);
    for (name, value) in signed.params.to_form_fields() {
        println!("{name}: {value}");
    }

    Ok(())
}
