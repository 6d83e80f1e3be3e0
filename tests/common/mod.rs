//! Helpers for integration tests.
#![allow(dead_code)]

use blog_publisher::db::{DbPool, establish_connection_pool, run_migrations};
use blog_publisher::models::config::{RuntimeEnvironment, ServerConfig};
use blog_publisher::repository::DieselRepository;
use tempfile::NamedTempFile;
use tera::Tera;

/// Temporary database used in integration tests.
pub struct TestDb {
    _tempfile: NamedTempFile,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let tempfile = NamedTempFile::new().expect("Failed to create temp file");
        let pool = establish_connection_pool(tempfile.path().to_str().unwrap())
            .expect("Failed to establish SQLite connection.");
        run_migrations(&pool).expect("Migrations failed");
        TestDb {
            _tempfile: tempfile,
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}

pub fn server_config(environment: RuntimeEnvironment) -> ServerConfig {
    ServerConfig {
        environment,
        database_url: String::new(),
        bind_address: "127.0.0.1".into(),
        admin_port: 0,
        api_port: 0,
        templates_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*").into(),
        assets_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/assets").into(),
        secret: Some("integration-test-secret-".repeat(4)),
    }
}

pub fn tera() -> Tera {
    Tera::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*"))
        .expect("templates should parse")
}
