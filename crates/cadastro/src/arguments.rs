use {
    model::field::FieldId,
    std::fmt::{self, Display, Formatter},
    tracing::level_filters::LevelFilter,
    url::Url,
};

#[derive(clap::Parser)]
pub struct Arguments {
    #[clap(flatten)]
    pub logging: LoggingArguments,

    #[clap(flatten)]
    pub http_client: viacep::http::Arguments,

    /// Base URL of the ViaCEP web service used to verify postal codes.
    #[clap(long, env, default_value = viacep::api::DEFAULT_URL)]
    pub viacep_url: Url,

    /// Path of the JSON form snapshot to validate. Pass "-" to read the
    /// snapshot from stdin instead.
    #[clap(long, env, default_value = "-")]
    pub form: String,

    /// Validate a single field instead of the whole submission.
    #[clap(long, env)]
    pub field: Option<FieldId>,
}

#[derive(clap::Parser)]
#[group(skip)]
pub struct LoggingArguments {
    #[clap(
        long,
        env,
        default_value = "warn,cadastro=debug,form_validation=debug,viacep=debug"
    )]
    pub log_filter: String,

    #[clap(long, env, default_value = "error")]
    pub log_stderr_threshold: LevelFilter,
}

impl Display for Arguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            logging,
            http_client,
            viacep_url,
            form,
            field,
        } = self;

        write!(f, "{}", logging)?;
        write!(f, "{}", http_client)?;
        writeln!(f, "viacep_url: {}", viacep_url)?;
        writeln!(f, "form: {}", form)?;
        display_option(f, "field", field)?;
        Ok(())
    }
}

impl Display for LoggingArguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            log_filter,
            log_stderr_threshold,
        } = self;

        writeln!(f, "log_filter: {}", log_filter)?;
        writeln!(f, "log_stderr_threshold: {}", log_stderr_threshold)?;
        Ok(())
    }
}

fn display_option(f: &mut Formatter<'_>, name: &str, option: &Option<impl Display>) -> fmt::Result {
    write!(f, "{name}: ")?;
    match option {
        Some(display) => writeln!(f, "{display}"),
        None => writeln!(f, "None"),
    }
}
