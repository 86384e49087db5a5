//! DNS query and response data structures.
//!
//! The response types mirror the Google DNS-over-HTTPS JSON API
//! (`{"Status": 0, "Answer": [{"name": .., "type": 16, "TTL": .., "data": ..}]}`).

use serde::Deserialize;
use strum_macros::{Display, EnumString};

/// Record types the checks query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum RecordType {
    /// Text record (SPF, DMARC, DKIM)
    #[strum(serialize = "TXT")]
    Txt,
    /// Mail exchanger record
    #[strum(serialize = "MX")]
    Mx,
}

impl RecordType {
    /// IANA RR type code, as carried in the `type` field of DoH JSON answers.
    pub fn code(self) -> u16 {
        match self {
            RecordType::Txt => 16,
            RecordType::Mx => 15,
        }
    }
}

/// A single DNS question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Fully qualified query name (no trailing dot)
    pub name: String,
    /// Requested record type
    pub record_type: RecordType,
}

impl Query {
    /// TXT query at the bare domain (SPF).
    pub fn txt(domain: &str) -> Self {
        Self {
            name: domain.to_string(),
            record_type: RecordType::Txt,
        }
    }

    /// MX query at the bare domain.
    pub fn mx(domain: &str) -> Self {
        Self {
            name: domain.to_string(),
            record_type: RecordType::Mx,
        }
    }

    /// TXT query at `<selector>._domainkey.<domain>`.
    pub fn dkim(selector: &str, domain: &str) -> Self {
        Self {
            name: format!("{selector}._domainkey.{domain}"),
            record_type: RecordType::Txt,
        }
    }

    /// TXT query at `_dmarc.<domain>`.
    pub fn dmarc(domain: &str) -> Self {
        Self {
            name: format!("_dmarc.{domain}"),
            record_type: RecordType::Txt,
        }
    }
}

/// One entry of the `Answer` array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnswerRecord {
    /// Owner name of the record
    #[serde(default)]
    pub name: Option<String>,
    /// RR type code (16 = TXT, 15 = MX, 5 = CNAME, ...)
    #[serde(rename = "type", default)]
    pub record_type: Option<u16>,
    /// Time to live in seconds
    #[serde(rename = "TTL", default)]
    pub ttl: Option<u32>,
    /// Raw record text, possibly quoted
    pub data: String,
}

impl AnswerRecord {
    /// Builds an answer carrying only record text.
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            name: None,
            record_type: None,
            ttl: None,
            data: data.into(),
        }
    }
}

/// Decoded resolver response.
///
/// `status == 0` means the query itself succeeded (the record may still be
/// absent). Any other value is a resolution failure (NXDOMAIN = 3,
/// SERVFAIL = 2, ...).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResolverResponse {
    /// DNS RCODE
    #[serde(rename = "Status")]
    pub status: u32,
    /// Answer section; `None` when the upstream omitted the field
    #[serde(rename = "Answer", default)]
    pub answers: Option<Vec<AnswerRecord>>,
}

impl ResolverResponse {
    /// Successful response with the given record texts.
    pub fn with_answers<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            status: 0,
            answers: Some(answers.into_iter().map(AnswerRecord::new).collect()),
        }
    }

    /// Response with the given status and no `Answer` field.
    pub fn empty(status: u32) -> Self {
        Self {
            status,
            answers: None,
        }
    }

    /// Whether the query itself succeeded.
    pub fn is_success(&self) -> bool {
        self.status == 0
    }

    /// Answers of the requested type.
    ///
    /// Answers with a different explicit `type` (CNAME links of a chain) are
    /// dropped; untyped answers are kept. Returns `None` when the response had
    /// no `Answer` field at all.
    pub fn answers_for(&self, record_type: RecordType) -> Option<Vec<&AnswerRecord>> {
        self.answers.as_ref().map(|answers| {
            answers
                .iter()
                .filter(|a| match a.record_type {
                    Some(code) => code == record_type.code(),
                    None => true,
                })
                .collect()
        })
    }
}
