use clap::Parser;

#[derive(Parser, Clone, Debug)]
pub struct Config {
    /// libpq style connection string for the bookings database
    #[clap(env, long)]
    pub postgres_connection_url: String,

    #[clap(env, long, default_value_t = 5000)]
    pub port: u16,

    #[clap(env, long, default_value = "0.0.0.0")]
    pub bind_address: String,

    /// Comma separated list of allowed CORS origins, `*` allows any origin
    #[clap(env, long, default_value = "*")]
    pub origin_urls: String,

    #[clap(env, long, default_value_t = 10)]
    pub pool_max_size: u32,

    #[clap(env, long, default_value_t = 30)]
    pub pool_connection_timeout_secs: u64,
}
