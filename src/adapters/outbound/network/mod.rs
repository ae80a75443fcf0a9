/// Network adapters for external API calls
mod packagist_client;

pub use packagist_client::PackagistAdvisoryClient;
