use {
    reqwest::{Client, ClientBuilder},
    std::{
        fmt::{self, Display, Formatter},
        time::Duration,
    },
};

const USER_AGENT: &str = "cadastro-ong/0.1.0";

/// An HTTP client factory.
///
/// Keeps the timeout and user agent consistent for every client handed out,
/// so all lookups against the service behave the same regardless of which
/// component created the client.
#[derive(Clone, Debug)]
pub struct HttpClientFactory {
    timeout: Duration,
}

impl HttpClientFactory {
    pub fn new(args: &Arguments) -> Self {
        Self {
            timeout: args.http_timeout,
        }
    }

    /// Creates a new HTTP client with the shared settings.
    pub fn create(&self) -> Client {
        ClientBuilder::new()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()
            .unwrap()
    }
}

impl Default for HttpClientFactory {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
        }
    }
}

/// Command line arguments for the common HTTP factory.
#[derive(clap::Parser)]
#[group(skip)]
pub struct Arguments {
    /// Default timeout for HTTP requests. The engine enforces no timeout of
    /// its own, so this is what eventually turns a hung lookup into a
    /// transient failure.
    #[clap(
        long,
        env,
        default_value = "10s",
        value_parser = humantime::parse_duration,
    )]
    pub http_timeout: Duration,
}

impl Display for Arguments {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let Self { http_timeout } = self;

        writeln!(f, "http_timeout: {:?}", http_timeout)
    }
}
