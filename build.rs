use std::env;
use std::fs;
use std::path::Path;

/// Claves que `AppConfig::from_env` lee con `option_env!`
const CONFIG_KEYS: [&str; 9] = [
    "BACKEND_URL_DEVELOPMENT",
    "BACKEND_URL_PRODUCTION",
    "ENVIRONMENT",
    "ENABLE_LOGGING",
    "STORAGE_USER_KEY",
    "STORAGE_TOKEN_KEY",
    "REGISTER_REDIRECT_DELAY_MS",
    "TABLE_LOAD_DELAY_MS",
    "CHARSET_PROFILE",
];

fn main() {
    // Siempre: un .env creado después del primer build también dispara la recompilación
    println!("cargo:rerun-if-changed=.env");
    for key in CONFIG_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }

    let env_file = Path::new(".env");
    match fs::read_to_string(env_file) {
        Ok(contents) => {
            for (key, value) in contents.lines().filter_map(parse_line) {
                // Las variables del entorno tienen prioridad sobre el .env
                if env::var(key).is_err() {
                    println!("cargo:rustc-env={}={}", key, value);
                }
            }
        }
        Err(_) => {
            println!("cargo:warning=No .env file found. Using built-in backend URLs and storage keys. Copy .env.example to .env to override them.");
        }
    }

    println!("cargo:rerun-if-changed=build.rs");
}

/// `KEY=VALUE`; comentarios y líneas vacías se ignoran
fn parse_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let (key, value) = line.split_once('=')?;
    Some((key.trim(), value.trim().trim_matches('"')))
}
