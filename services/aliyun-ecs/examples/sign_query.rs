//! Sign a DescribeImages call and print the finalized query string.
//!
//! Run with:
//!
//! ```bash
//! ALIBABA_CLOUD_ACCESS_KEY_ID=xxx ALIBABA_CLOUD_ACCESS_KEY_SECRET=yyy \
//!     cargo run --example sign_query
//! ```

use std::collections::HashMap;
use std::env;

use ecsctl_aliyun_ecs::sign::RequestSigner;
use ecsctl_aliyun_ecs::{Credential, Region};

fn main() -> ecsctl_core::Result<()> {
    env_logger::init();

    let cred = Credential::new(
        env::var("ALIBABA_CLOUD_ACCESS_KEY_ID").unwrap_or_default(),
        env::var("ALIBABA_CLOUD_ACCESS_KEY_SECRET").unwrap_or_default(),
    );

    let params = HashMap::from([
        ("RegionId".to_string(), Region::ApSoutheast5.to_string()),
        ("PageSize".to_string(), "100".to_string()),
    ]);

    let query = RequestSigner::new().signed_query("DescribeImages", &params, &cred)?;
    println!("https://ecs.aliyuncs.com/?{query}");
    Ok(())
}
