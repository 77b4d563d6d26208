use {
    crate::http::HttpClientFactory,
    anyhow::{Context, Result},
    model::cep::Cep,
    reqwest::{Client, IntoUrl, Url},
    serde::{Deserialize, Serialize},
};

/// Public ViaCEP endpoint. Lookups append `<digits>/json/` to this base.
pub const DEFAULT_URL: &str = "https://viacep.com.br/ws/";

/// Address record returned for an assigned postal code. Field names follow
/// the ViaCEP wire format.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub cep: String,
    pub logradouro: String,
    pub complemento: String,
    pub bairro: String,
    pub localidade: String,
    pub uf: String,
}

/// ViaCEP answers syntactically valid but unassigned codes with HTTP 200 and
/// a payload carrying an error marker instead of address fields. The marker
/// outranks everything else: a payload that sets it is a confirmed
/// "unassigned" answer no matter what other fields it carries.
#[derive(Debug, Deserialize)]
struct ErrorMarker {
    erro: Option<ErrorFlag>,
}

/// The marker has been emitted both as `"erro": true` and `"erro": "true"`
/// across versions of the service, so accept either shape.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorFlag {
    Bool(bool),
    Text(String),
}

impl ErrorFlag {
    fn is_set(&self) -> bool {
        match self {
            Self::Bool(flag) => *flag,
            Self::Text(text) => text == "true",
        }
    }
}

#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait::async_trait]
pub trait CepApi: Send + Sync {
    /// Fetches the address assigned to the given code. `Ok(None)` means the
    /// service confirmed the code is unassigned; `Err` means the answer could
    /// not be obtained at all.
    async fn lookup(&self, cep: Cep) -> Result<Option<Address>>;
}

pub struct DefaultCepApi {
    client: Client,
    base: Url,
}

impl DefaultCepApi {
    /// `base` must end with a trailing slash for the per-code path segments
    /// to join correctly.
    pub fn new(factory: &HttpClientFactory, base: impl IntoUrl) -> Result<Self> {
        Ok(Self {
            client: factory.create(),
            base: base.into_url().context("invalid viacep base url")?,
        })
    }
}

#[async_trait::async_trait]
impl CepApi for DefaultCepApi {
    async fn lookup(&self, cep: Cep) -> Result<Option<Address>> {
        let url = self
            .base
            .join(&format!("{}/json/", cep.as_digits()))
            .context("failed to build lookup url")?;
        logged_query(&self.client, url).await
    }
}

async fn logged_query(client: &Client, url: Url) -> Result<Option<Address>> {
    tracing::debug!(%url, "querying viacep");
    let response = client.get(url).send().await.context("failed to send request")?;
    let status = response.status();
    let body = response.text().await.context("failed to read response body")?;
    tracing::trace!(%status, %body, "viacep answered");
    anyhow::ensure!(status.is_success(), "viacep returned {status}: {body}");
    parse_payload(&body)
}

fn parse_payload(body: &str) -> Result<Option<Address>> {
    let marker: ErrorMarker = serde_json::from_str(body)
        .with_context(|| format!("failed to parse viacep response: {body}"))?;
    if marker.erro.is_some_and(|flag| flag.is_set()) {
        return Ok(None);
    }
    // A missing or unset marker promises address fields; a payload with
    // neither is malformed, not a confirmed "unassigned" answer.
    let address: Address = serde_json::from_str(body)
        .with_context(|| format!("unexpected viacep payload: {body}"))?;
    Ok(Some(address))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_address_payload() {
        let address = parse_payload(
            r#"{
                "cep": "01001-000",
                "logradouro": "Praça da Sé",
                "complemento": "lado ímpar",
                "unidade": "",
                "bairro": "Sé",
                "localidade": "São Paulo",
                "uf": "SP",
                "estado": "São Paulo",
                "regiao": "Sudeste",
                "ibge": "3550308",
                "gia": "1004",
                "ddd": "11",
                "siafi": "7107"
            }"#,
        )
        .unwrap()
        .unwrap();
        assert_eq!(address.logradouro, "Praça da Sé");
        assert_eq!(address.localidade, "São Paulo");
        assert_eq!(address.uf, "SP");
    }

    #[test]
    fn classifies_error_marker_payloads() {
        assert_eq!(parse_payload(r#"{"erro": true}"#).unwrap(), None);
        assert_eq!(parse_payload(r#"{"erro": "true"}"#).unwrap(), None);
    }

    #[test]
    fn error_marker_wins_over_address_fields() {
        let body = r#"{
            "cep": "01001-000",
            "logradouro": "Praça da Sé",
            "complemento": "",
            "bairro": "Sé",
            "localidade": "São Paulo",
            "uf": "SP",
            "erro": true
        }"#;
        assert_eq!(parse_payload(body).unwrap(), None);
    }

    #[test]
    fn rejects_unrecognized_payloads() {
        // Neither an address nor a confirmed error marker; must not be
        // mistaken for an unassigned code.
        assert!(parse_payload(r#"{"erro": false}"#).is_err());
        assert!(parse_payload(r#"{"whatever": 1}"#).is_err());
        assert!(parse_payload("<html>busy</html>").is_err());
    }

    // Hits the real service. Run with `cargo test -- --ignored`.
    #[tokio::test]
    #[ignore]
    async fn real_viacep_lookup() {
        observe::tracing::initialize_reentrant("viacep=trace");
        let api = DefaultCepApi::new(&HttpClientFactory::default(), DEFAULT_URL).unwrap();

        let found = api.lookup("01001000".parse().unwrap()).await.unwrap();
        assert_eq!(found.unwrap().localidade, "São Paulo");

        let missing = api.lookup("99999999".parse().unwrap()).await.unwrap();
        assert!(missing.is_none());
    }
}
