//! Prints the power state and accepted reset actions of a BMC.
//!
//! Reads `REDPOWER_HOST`, `REDPOWER_USER` and `REDPOWER_PASS` from the environment.
//! Set `REDPOWER_INSECURE=1` for BMCs with self-signed certificates.

use redpower::{RedfishResult, RedpowerClient, TlsMode};
use std::env;

#[tokio::main(flavor = "current_thread")]
async fn main() -> RedfishResult<()> {
    let host = env::var("REDPOWER_HOST").unwrap_or_default();
    let user = env::var("REDPOWER_USER").unwrap_or_default();
    let pass = env::var("REDPOWER_PASS").unwrap_or_default();
    let insecure = env::var("REDPOWER_INSECURE").is_ok_and(|v| v == "1");

    let client = RedpowerClient::builder()
        .host(host)
        .credentials(user, pass)
        .tls_mode(TlsMode::from_insecure(insecure))
        .build()?;

    println!("system: {}", client.system_url().await?);
    println!("power state: {}", client.power_state().await?);
    println!("allowed actions:");
    for action in client.allowed_actions().await? {
        println!("  {}", action);
    }

    Ok(())
}
