use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "talentmarket", about = "Talent marketplace portal")]
pub struct Config {
    /// Listen address
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    pub listen_addr: String,

    /// Path to the candidate fixture file loaded at startup
    #[arg(long, env = "CANDIDATE_FILE", default_value = "data/candidates.json")]
    pub candidate_file: String,

    /// Base URL of the upstream profile service. When unset, profile
    /// updates are rejected and candidate reads are served from the
    /// local catalog only.
    #[arg(long, env = "UPSTREAM_URL")]
    pub upstream_url: Option<String>,

    /// Load the catalog from the upstream service instead of the fixture
    #[arg(long, env = "LOAD_FROM_UPSTREAM", default_value = "false")]
    pub load_from_upstream: bool,

    /// Bootstrap API token accepted without a sign-in round trip
    #[arg(long, env = "BOOTSTRAP_TOKEN")]
    pub bootstrap_token: Option<String>,
}
