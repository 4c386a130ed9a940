pub mod badge;
pub mod captcha;
pub mod client;
pub mod config;
pub mod domain;
pub mod identity;
pub mod metrics;
pub mod middleware;
pub mod poller;
pub mod routes;
pub mod run;
pub mod slack;
pub mod startup;
pub mod telemetry;
