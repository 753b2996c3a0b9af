use member_persistence::{
    domain::SchemaMode,
    get_mysql_pool,
    services::{
        data_stores::MySqlMemberStore, member_service::MemberService,
        schema::prepare_schema,
    },
    utils::{
        config::DatabaseSettings,
        constants::{env, test},
    },
};
use secrecy::Secret;
use sqlx::{
    mysql::{MySqlConnectOptions, MySqlConnection},
    Connection, Executor, MySqlPool,
};
use std::sync::Arc;
use test_context::AsyncTestContext;
use testcontainers_modules::{
    mysql::Mysql,
    testcontainers::{runners::AsyncRunner, ContainerAsync},
};
use uuid::Uuid;

/// A member service wired to a freshly created, uniquely named database.
pub struct TestApp {
    pub member_service: MemberService,
    pub member_store: Arc<MySqlMemberStore>,
    pub pool: MySqlPool,
    pub server_options: MySqlConnectOptions,
    pub tmp_db_name: String,
}

impl TestApp {
    pub async fn new() -> Self {
        let settings = DatabaseSettings::for_profile(test::PROFILE)
            .expect("Failed to load test profile settings");
        Self::with_settings(&settings).await
    }

    pub async fn with_settings(settings: &DatabaseSettings) -> Self {
        let tmp_db_name = format!("member_{}", Uuid::new_v4().simple());
        let server_options = settings
            .connect_options()
            .expect("Failed to build MySQL connect options");

        let pool = configure_mysql(&server_options, &tmp_db_name).await;
        let member_store = Arc::new(MySqlMemberStore::new(pool.clone()));
        let member_service = MemberService::new(member_store.clone());

        Self {
            member_service,
            member_store,
            pool,
            server_options,
            tmp_db_name,
        }
    }

    pub async fn cleanup(self) {
        self.pool.close().await;
        delete_database(&self.server_options, &self.tmp_db_name).await;
    }
}

impl AsyncTestContext for TestApp {
    async fn setup() -> TestApp {
        TestApp::new().await
    }

    async fn teardown(self) {
        self.cleanup().await;
    }
}

/// Same as [`TestApp`], but the server is located through a host and port
/// handed over at runtime, the way a compose service publishes them.
pub struct EndpointTestApp {
    pub app: TestApp,
}

impl AsyncTestContext for EndpointTestApp {
    async fn setup() -> EndpointTestApp {
        let host = std::env::var(env::MYSQL_HOST_ENV_VAR)
            .unwrap_or_else(|_| test::DEFAULT_MYSQL_HOST.to_owned());
        let port = std::env::var(env::MYSQL_PORT_ENV_VAR)
            .ok()
            .and_then(|port| port.parse().ok())
            .unwrap_or(test::DEFAULT_MYSQL_PORT);

        let settings = DatabaseSettings::for_endpoint(
            &host,
            port,
            test::COMPOSE_DATABASE,
            test::USERNAME,
            Secret::new(test::PASSWORD.to_owned()),
            SchemaMode::Create,
        );

        EndpointTestApp {
            app: TestApp::with_settings(&settings).await,
        }
    }

    async fn teardown(self) {
        self.app.cleanup().await;
    }
}

/// [`TestApp`] against a MySQL container started for this test alone.
pub struct ContainerTestApp {
    pub app: TestApp,
    pub host: String,
    pub port: u16,
    _container: ContainerAsync<Mysql>,
}

impl AsyncTestContext for ContainerTestApp {
    async fn setup() -> ContainerTestApp {
        let container = Mysql::default()
            .start()
            .await
            .expect("Failed to start MySQL container");
        let host = container
            .get_host()
            .await
            .expect("Failed to get container host");
        let port = container
            .get_host_port_ipv4(test::MYSQL_PORT)
            .await
            .expect("Failed to get container port");

        let host = host.to_string();

        let settings = DatabaseSettings::for_endpoint(
            &host,
            port,
            test::CONTAINER_DATABASE,
            test::CONTAINER_USERNAME,
            Secret::new(test::CONTAINER_PASSWORD.to_owned()),
            SchemaMode::Create,
        );

        ContainerTestApp {
            app: TestApp::with_settings(&settings).await,
            host,
            port,
            _container: container,
        }
    }

    async fn teardown(self) {
        self.app.cleanup().await;
    }
}

async fn configure_mysql(
    server_options: &MySqlConnectOptions,
    db_name: &str,
) -> MySqlPool {
    configure_database(server_options, db_name).await;

    let pool = get_mysql_pool(server_options.clone().database(db_name))
        .await
        .expect("Failed to create MySQL connection pool!");

    prepare_schema(&pool, SchemaMode::Create)
        .await
        .expect("Failed to create the member table");

    pool
}

async fn configure_database(
    server_options: &MySqlConnectOptions,
    db_name: &str,
) {
    let mut connection = MySqlConnection::connect_with(server_options)
        .await
        .expect("Failed to connect to MySQL");

    connection
        .execute(format!("CREATE DATABASE `{}`;", db_name).as_str())
        .await
        .expect("Failed to create database.");
}

async fn delete_database(server_options: &MySqlConnectOptions, db_name: &str) {
    let mut connection = MySqlConnection::connect_with(server_options)
        .await
        .expect("Failed to connect to MySQL");

    connection
        .execute(format!("DROP DATABASE IF EXISTS `{}`;", db_name).as_str())
        .await
        .expect("Failed to drop the database.");
}
