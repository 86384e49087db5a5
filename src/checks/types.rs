//! Check result types.
//!
//! Each result serializes with the field names consumers of the JSON report
//! expect (`isValid`, `reason`, plus a protocol-specific payload that is
//! omitted when absent).

use serde::Serialize;

/// The verdict common to every record check.
pub trait Verdict {
    /// Whether the record set passed every rule.
    fn is_valid(&self) -> bool;

    /// Human-readable explanation of the verdict.
    fn reason(&self) -> &str;

    /// Payload lines for display (selectors, record text, MX entries).
    fn details(&self) -> Vec<String>;
}

/// Outcome of [`crate::check_dkim`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DkimResult {
    /// Whether at least one selector holds a well-formed record
    pub is_valid: bool,
    /// Explanation of the verdict
    pub reason: String,
    /// Selectors with a valid record, in probe order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dkim_selectors: Option<Vec<String>>,
}

impl DkimResult {
    pub(crate) fn valid(selectors: Vec<String>) -> Self {
        Self {
            is_valid: true,
            reason: "DKIM records found".to_string(),
            dkim_selectors: Some(selectors),
        }
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            reason: reason.into(),
            dkim_selectors: None,
        }
    }
}

impl Verdict for DkimResult {
    fn is_valid(&self) -> bool {
        self.is_valid
    }

    fn reason(&self) -> &str {
        &self.reason
    }

    fn details(&self) -> Vec<String> {
        self.dkim_selectors
            .iter()
            .flatten()
            .map(|s| format!("selector: {s}"))
            .collect()
    }
}

/// Outcome of [`crate::check_spf`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpfResult {
    /// Whether exactly one SPF record exists within the lookup budget
    pub is_valid: bool,
    /// Explanation of the verdict
    pub reason: String,
    /// The normalized SPF record text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spf: Option<String>,
}

impl SpfResult {
    pub(crate) fn valid(record: String) -> Self {
        Self {
            is_valid: true,
            reason: "Valid SPF record".to_string(),
            spf: Some(record),
        }
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            reason: reason.into(),
            spf: None,
        }
    }
}

impl Verdict for SpfResult {
    fn is_valid(&self) -> bool {
        self.is_valid
    }

    fn reason(&self) -> &str {
        &self.reason
    }

    fn details(&self) -> Vec<String> {
        self.spf.iter().cloned().collect()
    }
}

/// Outcome of [`crate::check_dmarc`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DmarcResult {
    /// Whether exactly one DMARC record carries the required tags
    pub is_valid: bool,
    /// Explanation of the verdict
    pub reason: String,
    /// The normalized DMARC record text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dmarc: Option<String>,
}

impl DmarcResult {
    pub(crate) fn valid(record: String) -> Self {
        Self {
            is_valid: true,
            reason: "Valid DMARC record".to_string(),
            dmarc: Some(record),
        }
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            reason: reason.into(),
            dmarc: None,
        }
    }
}

impl Verdict for DmarcResult {
    fn is_valid(&self) -> bool {
        self.is_valid
    }

    fn reason(&self) -> &str {
        &self.reason
    }

    fn details(&self) -> Vec<String> {
        self.dmarc.iter().cloned().collect()
    }
}

/// A validated mail exchanger.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MxEntry {
    /// Relative preference (lower is preferred)
    pub preference: u16,
    /// Lower-cased exchange hostname without trailing dot
    pub exchange: String,
}

impl std::fmt::Display for MxEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.preference, self.exchange)
    }
}

/// Outcome of [`crate::check_mx`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MxResult {
    /// Whether every MX record passed the structural rules
    pub is_valid: bool,
    /// Explanation of the verdict
    pub reason: String,
    /// All records in answer order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mx: Option<Vec<MxEntry>>,
}

impl MxResult {
    pub(crate) fn valid(entries: Vec<MxEntry>) -> Self {
        Self {
            is_valid: true,
            reason: "Valid MX records".to_string(),
            mx: Some(entries),
        }
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            reason: reason.into(),
            mx: None,
        }
    }
}

impl Verdict for MxResult {
    fn is_valid(&self) -> bool {
        self.is_valid
    }

    fn reason(&self) -> &str {
        &self.reason
    }

    fn details(&self) -> Vec<String> {
        self.mx
            .iter()
            .flatten()
            .map(ToString::to_string)
            .collect()
    }
}

/// Results of [`crate::check_all`]; a check that was not enabled is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthReport {
    /// Normalized domain that was checked
    pub domain: String,
    /// DKIM result
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dkim: Option<DkimResult>,
    /// SPF result
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spf: Option<SpfResult>,
    /// DMARC result
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dmarc: Option<DmarcResult>,
    /// MX result
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mx: Option<MxResult>,
}

impl AuthReport {
    /// The results that are present, paired with their check label.
    pub fn verdicts(&self) -> Vec<(&'static str, &dyn Verdict)> {
        let mut verdicts: Vec<(&'static str, &dyn Verdict)> = Vec::with_capacity(4);
        if let Some(r) = &self.dkim {
            verdicts.push(("DKIM", r));
        }
        if let Some(r) = &self.spf {
            verdicts.push(("SPF", r));
        }
        if let Some(r) = &self.dmarc {
            verdicts.push(("DMARC", r));
        }
        if let Some(r) = &self.mx {
            verdicts.push(("MX", r));
        }
        verdicts
    }

    /// Number of present results that are invalid.
    pub fn invalid_count(&self) -> usize {
        self.verdicts().iter().filter(|(_, v)| !v.is_valid()).count()
    }

    /// Whether every present result is valid.
    pub fn all_valid(&self) -> bool {
        self.invalid_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dmarc_result_serializes_with_external_names() {
        let result =
            DmarcResult::valid("v=DMARC1; p=none; rua=mailto:dmarc@example.com".to_string());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "isValid": true,
                "reason": "Valid DMARC record",
                "dmarc": "v=DMARC1; p=none; rua=mailto:dmarc@example.com"
            })
        );
    }

    #[test]
    fn test_invalid_result_omits_payload() {
        let json = serde_json::to_value(SpfResult::invalid("No SPF record found")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"isValid": false, "reason": "No SPF record found"})
        );
    }

    #[test]
    fn test_dkim_result_serializes_selectors_camel_case() {
        let json = serde_json::to_value(DkimResult::valid(vec!["google".to_string()])).unwrap();
        assert_eq!(json["dkimSelectors"], serde_json::json!(["google"]));
    }

    #[test]
    fn test_mx_details_and_display() {
        let result = MxResult::valid(vec![MxEntry {
            preference: 10,
            exchange: "mail.example.com".to_string(),
        }]);
        assert_eq!(result.details(), vec!["10 mail.example.com".to_string()]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json["mx"],
            serde_json::json!([{"preference": 10, "exchange": "mail.example.com"}])
        );
    }

    #[test]
    fn test_report_counts_only_present_results() {
        let report = AuthReport {
            domain: "example.com".to_string(),
            dkim: None,
            spf: Some(SpfResult::valid("v=spf1 -all".to_string())),
            dmarc: Some(DmarcResult::invalid("No TXT records found")),
            mx: None,
        };
        assert_eq!(report.verdicts().len(), 2);
        assert_eq!(report.invalid_count(), 1);
        assert!(!report.all_valid());
    }
}
