use dotenvy::dotenv;
use lazy_static::lazy_static;
use std::env as std_env;

lazy_static! {
    pub static ref APP_PROFILE: Option<String> = load_profile();
}

fn load_env() {
    dotenv().ok();
}

fn load_profile() -> Option<String> {
    load_env();
    std_env::var(env::APP_PROFILE_ENV_VAR)
        .ok()
        .filter(|profile| !profile.trim().is_empty())
}

pub mod env {
    pub const APP_PROFILE_ENV_VAR: &str = "APP_PROFILE";
    pub const DATABASE_URL_ENV_VAR: &str = "DATABASE_URL";
    pub const DATABASE_USERNAME_ENV_VAR: &str = "DATABASE_USERNAME";
    pub const DATABASE_PASSWORD_ENV_VAR: &str = "DATABASE_PASSWORD";
    pub const DATABASE_SCHEMA_MODE_ENV_VAR: &str = "DATABASE_SCHEMA_MODE";
    pub const MYSQL_HOST_ENV_VAR: &str = "MYSQL_HOST";
    pub const MYSQL_PORT_ENV_VAR: &str = "MYSQL_PORT";
}

pub const MEMBER_TABLE: &str = "member";
pub const MEMBER_COLUMNS: [&str; 2] = ["id", "name"];
pub const DEFAULT_MEMBER_NAME: &str = "name";

pub mod prod {
    use std::time::Duration;

    pub const MAX_CONNECTIONS: u32 = 5;
    pub const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);
}

pub mod test {
    use std::time::Duration;

    pub const PROFILE: &str = "test";
    pub const COMPOSE_DATABASE: &str = "test_container_test";
    pub const CONTAINER_DATABASE: &str = "test";
    pub const CONTAINER_USERNAME: &str = "root";
    pub const CONTAINER_PASSWORD: &str = "";
    pub const MYSQL_PORT: u16 = 3306;
    pub const DEFAULT_MYSQL_HOST: &str = "127.0.0.1";
    pub const DEFAULT_MYSQL_PORT: u16 = 3306;
    pub const USERNAME: &str = "root";
    pub const PASSWORD: &str = "password";
    pub const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(2);
}
