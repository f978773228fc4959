// Library for tests to access modules

pub mod config;
pub mod discovery;
pub mod error;
pub mod inventory;
pub mod mac;
pub mod models;
pub mod publish;
pub mod report;
pub mod routes;
pub mod telemetry;
pub mod transport;
pub mod version;
pub mod worker;
