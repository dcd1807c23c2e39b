// Subway service status: MTA feed normalization with a sample-data fallback,
// served as JSON next to an embedded status page.

pub mod errors;
pub mod feed_tree;
pub mod poller;
pub mod render;
pub mod routes;
pub mod settings;
pub mod status_feed;
pub mod status_models;
pub mod telemetry;

#[cfg(test)]
pub(crate) mod test_support;
