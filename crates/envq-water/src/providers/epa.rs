use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::EpaDirectoryConfig;
use crate::error::ProviderError;
use crate::traits::WaterSystemDirectory;
use crate::types::{ViolationRecord, WaterSystem};

/// EPA Envirofacts SDWIS tables, queried by path-encoded filters.
#[derive(Clone)]
pub struct EpaWaterDirectory {
    config: EpaDirectoryConfig,
    client: Client,
}

impl EpaWaterDirectory {
    pub fn new(config: EpaDirectoryConfig) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    fn base(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    fn systems_url(&self, column: &str, value: &str, limit: usize) -> String {
        format!(
            "{}/sdwis.water_system/{column}/equals/{}/pws_activity_code/equals/A/1:{limit}/json",
            self.base(),
            encode_segment(value)
        )
    }

    fn violations_url(&self, pwsid: &str, limit: usize) -> String {
        format!(
            "{}/sdwis.violation/pwsid/equals/{}/is_health_based_ind/equals/Y/1:{limit}/json",
            self.base(),
            encode_segment(pwsid)
        )
    }

    async fn get_json(&self, url: &str) -> Result<Value, ProviderError> {
        debug!(url, "epa request");
        let res = self.client.get(url).send().await?;
        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(ProviderError::Api { status, body });
        }
        let body = res.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn systems(&self, url: String) -> Result<Vec<WaterSystem>, ProviderError> {
        let body = self.get_json(&url).await?;
        let rows: Vec<RawWaterSystem> = parse_rows(rows_of(body));
        Ok(rows.into_iter().filter_map(RawWaterSystem::into_system).collect())
    }
}

#[async_trait::async_trait]
impl WaterSystemDirectory for EpaWaterDirectory {
    fn name(&self) -> &'static str {
        "epa-sdwis"
    }

    async fn systems_by_zip(
        &self,
        zip_code: &str,
        limit: usize,
    ) -> Result<Vec<WaterSystem>, ProviderError> {
        self.systems(self.systems_url("zip_code", zip_code, limit))
            .await
    }

    async fn systems_by_state(
        &self,
        state_code: &str,
        limit: usize,
    ) -> Result<Vec<WaterSystem>, ProviderError> {
        self.systems(self.systems_url("primacy_agency_code", state_code, limit))
            .await
    }

    async fn health_violations(
        &self,
        pwsid: &str,
        limit: usize,
    ) -> Result<Vec<ViolationRecord>, ProviderError> {
        let body = self.get_json(&self.violations_url(pwsid, limit)).await?;
        let rows: Vec<RawViolation> = parse_rows(rows_of(body));
        Ok(rows.into_iter().map(RawViolation::into_record).collect())
    }
}

/// Envirofacts answers with a bare array or, for some tables, `{"results": [...]}`.
fn rows_of(body: Value) -> Vec<Value> {
    match body {
        Value::Array(rows) => rows,
        Value::Object(mut map) => match map.remove("results") {
            Some(Value::Array(rows)) => rows,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

fn parse_rows<T: DeserializeOwned>(rows: Vec<Value>) -> Vec<T> {
    rows.into_iter()
        .filter_map(|row| match serde_json::from_value(row) {
            Ok(v) => Some(v),
            Err(err) => {
                debug!(error = %err, "skipping malformed epa row");
                None
            }
        })
        .collect()
}

fn encode_segment(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
        .collect()
}

/// Leading-number parse: `"0.08 mg/L"` reads as 0.08, `"n/a"` as nothing.
pub(crate) fn parse_leading_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let end = s
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')))
        .unwrap_or(s.len());
    let candidate = s.get(..end)?;
    (1..=candidate.len())
        .rev()
        .find_map(|n| candidate.get(..n)?.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Number(f64),
    Text(String),
}

impl LooseNumber {
    fn value(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(*n),
            Self::Number(_) => None,
            Self::Text(s) => parse_leading_number(s),
        }
    }
}

fn loose(v: Option<&LooseNumber>) -> Option<f64> {
    v.and_then(LooseNumber::value)
}

#[derive(Debug, Deserialize)]
struct RawWaterSystem {
    #[serde(alias = "PWSID")]
    pwsid: Option<String>,
    #[serde(default, alias = "PWS_NAME")]
    pws_name: Option<String>,
    #[serde(default, alias = "PRIMACY_AGENCY_CODE")]
    primacy_agency_code: Option<String>,
    #[serde(default, alias = "POPULATION_SERVED_COUNT")]
    population_served_count: Option<LooseNumber>,
}

impl RawWaterSystem {
    fn into_system(self) -> Option<WaterSystem> {
        let pwsid = self.pwsid.filter(|p| !p.trim().is_empty())?;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let population_served = loose(self.population_served_count.as_ref())
            .filter(|n| *n >= 0.0)
            .map(|n| n as u64);
        Some(WaterSystem {
            name: self.pws_name.unwrap_or_else(|| pwsid.clone()),
            pwsid,
            primacy_agency_code: self.primacy_agency_code,
            population_served,
        })
    }
}

#[derive(Debug, Deserialize)]
struct RawViolation {
    #[serde(default, alias = "CONTAMINANT_CODE")]
    contaminant_code: Option<LooseCode>,
    #[serde(default, alias = "ANALYTE_NAME")]
    analyte_name: Option<String>,
    #[serde(default, alias = "VIOLATION_MEASURE")]
    violation_measure: Option<LooseNumber>,
    #[serde(default, alias = "UNIT_OF_MEASURE")]
    unit_of_measure: Option<String>,
    #[serde(default, alias = "MCL")]
    mcl: Option<LooseNumber>,
    #[serde(default, alias = "MCLG")]
    mclg: Option<LooseNumber>,
}

/// Contaminant codes are usually strings but some rows carry bare numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LooseCode {
    Text(String),
    Number(serde_json::Number),
}

impl LooseCode {
    fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
        }
    }
}

impl RawViolation {
    /// Zero or unparsable measures read as 0; zero or unparsable limits as absent.
    fn into_record(self) -> ViolationRecord {
        let nonzero = |v: Option<f64>| v.filter(|n| *n != 0.0);
        ViolationRecord {
            contaminant_code: self
                .contaminant_code
                .map(LooseCode::into_string)
                .unwrap_or_default(),
            analyte_name: self.analyte_name,
            measure: loose(self.violation_measure.as_ref()).unwrap_or(0.0),
            unit: self.unit_of_measure,
            mcl: nonzero(loose(self.mcl.as_ref())),
            mclg: nonzero(loose(self.mclg.as_ref())),
        }
    }
}
