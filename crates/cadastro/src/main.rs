mod arguments;

use {
    anyhow::{Context, Result},
    clap::Parser,
    form_validation::{
        report::{FieldOutcome, Verdict},
        validator::{CepCheck, FormValidator},
    },
    model::{field::FieldId, form::RegistrationForm},
    std::{io::Read, sync::Arc},
    viacep::{
        api::DefaultCepApi,
        http::HttpClientFactory,
        resolver::{CachedCepResolver, ViaCepResolver},
    },
};

/// Nothing blocks the submission.
const EXIT_VALID: i32 = 0;
/// At least one field needs correction before resubmitting.
const EXIT_INVALID: i32 = 1;
/// Blocked only because the postal-code lookup could not complete; an
/// unchanged resubmission may go through.
const EXIT_UNVERIFIED: i32 = 2;
/// The run itself failed, e.g. an unreadable or unparsable snapshot.
const EXIT_ERROR: i32 = 3;

#[tokio::main]
async fn main() {
    let args = arguments::Arguments::parse();
    observe::tracing::initialize(&args.logging.log_filter, args.logging.log_stderr_threshold);
    observe::metrics::setup_registry(Some("cadastro".into()), None);
    tracing::info!("running cadastro with validated arguments:\n{}", args);

    match run(args).await {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            tracing::error!("validation run failed: {:?}", err);
            std::process::exit(EXIT_ERROR);
        }
    }
}

async fn run(args: arguments::Arguments) -> Result<i32> {
    let form = read_form(&args.form)?;

    let http_factory = HttpClientFactory::new(&args.http_client);
    let api = DefaultCepApi::new(&http_factory, args.viacep_url)?;
    let resolver = Arc::new(CachedCepResolver::new(Arc::new(ViaCepResolver::new(
        Arc::new(api),
    ))));
    let validator = FormValidator::new(resolver);

    let code = match args.field {
        Some(field) => check_field(&validator, &form, field).await?,
        None => check_submission(&validator, &form).await?,
    };
    tracing::debug!(
        "collected metrics:\n{}",
        observe::metrics::encode(observe::metrics::get_registry())
    );
    Ok(code)
}

/// Validates a single field, the way hosts do when an input loses focus,
/// and prints its verdict.
async fn check_field(
    validator: &FormValidator,
    form: &RegistrationForm,
    field: FieldId,
) -> Result<i32> {
    let (verdict, address) = match field {
        // Go through the full postal-code check so the resolved address is
        // available for host-side autofill.
        FieldId::Cep => {
            let CepCheck { verdict, address } = validator.check_cep(&form.cep).await;
            (verdict, address)
        }
        _ => (validator.validate_field(form, field).await, None),
    };
    let code = exit_code(&verdict);

    let mut row = serde_json::to_value(FieldOutcome { field, verdict })
        .context("failed to serialize verdict")?;
    if let Some(address) = address {
        row["address"] =
            serde_json::to_value(address).context("failed to serialize address")?;
    }
    print_json(&row)?;
    Ok(code)
}

/// Validates the whole submission and prints the ordered report.
async fn check_submission(validator: &FormValidator, form: &RegistrationForm) -> Result<i32> {
    let report = validator.validate_submission(form).await;
    for outcome in &report.outcomes {
        if let Some(message) = outcome.verdict.message() {
            tracing::warn!(field = %outcome.field, message, "field blocks submission");
        }
    }
    print_json(&report)?;

    Ok(if report.is_submittable() {
        EXIT_VALID
    } else if report.only_transient_failures() {
        EXIT_UNVERIFIED
    } else {
        EXIT_INVALID
    })
}

fn exit_code(verdict: &Verdict) -> i32 {
    match verdict {
        Verdict::Valid => EXIT_VALID,
        Verdict::Invalid { .. } => EXIT_INVALID,
        Verdict::Unverified { .. } => EXIT_UNVERIFIED,
    }
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to serialize report")?;
    println!("{rendered}");
    Ok(())
}

fn read_form(source: &str) -> Result<RegistrationForm> {
    let raw = if source == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read form snapshot from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("failed to read form snapshot at {source}"))?
    };
    serde_json::from_str(&raw).context("failed to parse form snapshot")
}
