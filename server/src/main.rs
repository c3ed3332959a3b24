use webterm_core::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    webterm_core::init_logging();

    let config = Config::from_env()?;
    webterm_server::run(config).await
}
