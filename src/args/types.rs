use clap::Parser;

use crate::storage::StorageKind;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Storage backend: sqlite, json or memory
    #[arg(
        short = 'd',
        long,
        value_name = "DATABASE_TYPE",
        env = "DB_TYPE",
        default_value = "sqlite",
        value_enum
    )]
    pub db_type: StorageKind,
    /// For sqlite, the database file. `sqlite:///path` urls are accepted too.
    #[arg(
        short = 'n',
        long,
        value_name = "DATABASE_NAME",
        env = "DATABASE_URL",
        default_value = "golf.db"
    )]
    pub db_name: String,
    /// Directory holding golf.json when the json backend is used.
    #[arg(long, value_name = "DATA_DIR", env = "DATA_DIR", default_value = "data")]
    pub data_dir: String,
    #[arg(
        short = 'b',
        long,
        value_name = "ADDRESS",
        env = "BIND_ADDR",
        default_value = "0.0.0.0:8081"
    )]
    pub bind: String,
    /// Without a key the story page shows an error instead of a joke.
    #[arg(long, value_name = "OPENAI_API_KEY", env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,
    #[arg(
        long,
        value_name = "OPENAI_MODEL",
        env = "OPENAI_MODEL",
        default_value = "gpt-4.1-nano"
    )]
    pub openai_model: String,
}

#[derive(Debug, Clone)]
pub struct CleanArgs {
    pub db_type: StorageKind,
    pub db_name: String,
    pub data_dir: String,
    pub bind: String,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
}
