use std::env;
use std::path::PathBuf;

pub struct Config {
    pub admin_password: String,
    pub data_dir: PathBuf,
    pub frontend_origin: String,
    pub port: u16,
    pub session_ttl_hours: i64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok(); // Load .env file

        let admin_password = env::var("ADMIN_PASSWORD").expect("ADMIN_PASSWORD must be set");
        let data_dir = PathBuf::from(env::var("DATA_DIR").expect("DATA_DIR must be set"));

        let frontend_origin =
            env::var("FRONTEND_ORIGIN").unwrap_or_else(|_| "http://localhost:5173".to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(3000);
        let session_ttl_hours = env::var("SESSION_TTL_HOURS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(12);

        Config {
            admin_password,
            data_dir,
            frontend_origin,
            port,
            session_ttl_hours,
        }
    }
}
