//! Log in and print every app with its instance count and ports.
//!
//! Reads `CAPROVER_URL` / `CAPROVER_PASSWORD` from the environment, falling
//! back to the default config file.
//!
//! ```text
//! CAPROVER_URL=https://captain.example.com CAPROVER_PASSWORD=... \
//!     cargo run -p caprover-api --example list_apps
//! ```

use anyhow::Context;

use caprover_api::CaproverClient;
use caprover_core::config::Config;
use caprover_core::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = Config::load_default().context("loading config")?;
    if let Ok(url) = std::env::var("CAPROVER_URL") {
        config.server.endpoint = url;
    }
    if let Ok(password) = std::env::var("CAPROVER_PASSWORD") {
        config.server.password = password;
    }

    let _guard = logging::init_logging(&config.logging)?;

    let client = CaproverClient::connect(&config.server)
        .await
        .context("connecting to CapRover")?;

    let listing = client.list_apps().await?;
    println!("root domain: {}", listing.root_domain);
    for app in &listing.app_definitions {
        println!("App Name: {}", app.app_name);
        println!("Instance Count: {}", app.instance_count);
        let ports: Vec<String> = app
            .ports
            .iter()
            .map(|p| format!("{}:{}", p.host_port, p.container_port))
            .collect();
        println!("Ports: [{}]", ports.join(", "));
        println!();
    }

    Ok(())
}
