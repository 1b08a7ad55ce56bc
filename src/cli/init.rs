use anyhow::Result;
use std::path::PathBuf;

const CONFIG_FILE: &str = "blogdesk.toml";

pub async fn run(path: PathBuf) -> Result<()> {
    let config_path = path.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("{} already exists", config_path.display());
    }

    std::fs::create_dir_all(path.join("data/uploads"))?;

    let config = r#"[server]
host = "127.0.0.1"
port = 5000
request_timeout = 30

[database]
path = "./data/blogdesk.db"
pool_size = 10

[media]
upload_dir = "./data/uploads"
max_upload_size = "10MB"

[cors]
# Empty allows any origin
allowed_origins = []
"#;

    std::fs::write(&config_path, config)?;

    tracing::info!("Created {}", config_path.display());
    tracing::info!("Run 'blogdesk migrate' to set up the database");
    tracing::info!("Run 'blogdesk serve' to start the server");

    Ok(())
}
