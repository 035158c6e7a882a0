use crate::configuration::Configuration;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(about = "Tutoring availability and session scheduling service")]
pub struct ConfigurationHandler {
    /// Address the HTTP server listens on.
    #[arg(long, default_value = "127.0.0.1:3000")]
    bind_address: String,

    /// Insert an example tutor on startup.
    #[arg(long)]
    seed_example_data: bool,
}

impl Configuration for ConfigurationHandler {
    fn bind_address(&self) -> String {
        self.bind_address.clone()
    }

    fn seed_example_data(&self) -> bool {
        self.seed_example_data
    }
}
