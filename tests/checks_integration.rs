//! End-to-end tests of the record checks through a real `DohResolver`
//! talking to a mock DNS-over-HTTPS endpoint.

mod helpers;

use helpers::{mount_answers, mount_body, mount_http_error, resolver_for, start_doh_server};
use mailauth_check::{
    check_all, check_dkim, check_dkim_for_provider_tag, check_dmarc, check_mx, check_spf,
    CheckError, CheckKind, CheckOptions, DkimProvider, MxEntry, ResolveError, SelectorSet,
};
use serde_json::json;

#[tokio::test]
async fn test_dkim_google_selector_end_to_end() {
    let server = start_doh_server().await;
    mount_answers(
        &server,
        "google._domainkey.example.com",
        "TXT",
        &["\"v=DKIM1; k=rsa; p=MIIBIjANBgkqhkiG9w0BAQEFAAOCAQ8AMIIBCgKCAQEAu5\""],
    )
    .await;
    let resolver = resolver_for(&server);

    let result = check_dkim(&resolver, "example.com", Some(DkimProvider::Google))
        .await
        .unwrap();

    assert!(result.is_valid);
    assert_eq!(result.reason, "DKIM records found");
    assert_eq!(result.dkim_selectors, Some(vec!["google".to_string()]));
}

#[tokio::test]
async fn test_dkim_common_selectors_with_nxdomain_elsewhere() {
    let server = start_doh_server().await;
    mount_answers(
        &server,
        "selector2._domainkey.example.com",
        "TXT",
        &["v=DKIM1; k=rsa; p=MIGfMA0GCSqGSIb3DQEB"],
    )
    .await;
    let resolver = resolver_for(&server);

    let result = check_dkim(&resolver, "example.com", None).await.unwrap();

    assert_eq!(result.dkim_selectors, Some(vec!["selector2".to_string()]));
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 19);
}

#[tokio::test]
async fn test_dkim_unknown_provider_sends_no_request() {
    let server = start_doh_server().await;
    let resolver = resolver_for(&server);

    let err = check_dkim_for_provider_tag(&resolver, "example.com", Some("fastmail"))
        .await
        .unwrap_err();

    assert!(matches!(err, CheckError::UnknownProvider(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_spf_valid_and_too_many_lookups() {
    let server = start_doh_server().await;
    mount_answers(
        &server,
        "good.example",
        "TXT",
        &["\"v=spf1 include:_spf.google.com ~all\""],
    )
    .await;
    let includes: Vec<String> = (1..=11).map(|i| format!("include:{i}.com")).collect();
    let heavy = format!("v=spf1 {} ~all", includes.join(" "));
    mount_answers(&server, "heavy.example", "TXT", &[&heavy]).await;
    let resolver = resolver_for(&server);

    let good = check_spf(&resolver, "good.example").await.unwrap();
    assert!(good.is_valid);
    assert_eq!(
        good.spf.as_deref(),
        Some("v=spf1 include:_spf.google.com ~all")
    );

    let heavy = check_spf(&resolver, "heavy.example").await.unwrap();
    assert!(!heavy.is_valid);
    assert_eq!(heavy.reason, "Too many DNS lookups (exceeds 10)");
}

#[tokio::test]
async fn test_spf_no_txt_records_when_answer_is_empty() {
    let server = start_doh_server().await;
    mount_body(&server, "example.com", "TXT", json!({"Status": 0, "Answer": []})).await;
    let resolver = resolver_for(&server);

    let result = check_spf(&resolver, "example.com").await.unwrap();
    assert_eq!(result.reason, "No TXT records found");
}

#[tokio::test]
async fn test_dmarc_scenario() {
    let server = start_doh_server().await;
    mount_answers(
        &server,
        "_dmarc.example.com",
        "TXT",
        &["v=DMARC1; p=none; rua=mailto:dmarc@example.com"],
    )
    .await;
    let resolver = resolver_for(&server);

    let result = check_dmarc(&resolver, "example.com").await.unwrap();
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({
            "isValid": true,
            "reason": "Valid DMARC record",
            "dmarc": "v=DMARC1; p=none; rua=mailto:dmarc@example.com"
        })
    );
}

#[tokio::test]
async fn test_dmarc_nxdomain_is_query_failure() {
    let server = start_doh_server().await;
    let resolver = resolver_for(&server);

    let result = check_dmarc(&resolver, "example.com").await.unwrap();
    assert!(!result.is_valid);
    assert_eq!(result.reason, "DNS query failed");
}

#[tokio::test]
async fn test_mx_records_and_ip_literal() {
    let server = start_doh_server().await;
    mount_answers(
        &server,
        "example.com",
        "MX",
        &["10 mail.example.com.", "20 Backup.Example.com."],
    )
    .await;
    mount_answers(&server, "bad.example", "MX", &["10 192.168.1.1"]).await;
    let resolver = resolver_for(&server);

    let result = check_mx(&resolver, "example.com").await.unwrap();
    assert!(result.is_valid);
    assert_eq!(
        result.mx,
        Some(vec![
            MxEntry {
                preference: 10,
                exchange: "mail.example.com".to_string(),
            },
            MxEntry {
                preference: 20,
                exchange: "backup.example.com".to_string(),
            },
        ])
    );

    let bad = check_mx(&resolver, "bad.example").await.unwrap();
    assert_eq!(
        bad.reason,
        "MX exchange cannot be an IP address: 192.168.1.1"
    );
}

#[tokio::test]
async fn test_mx_without_answer_field() {
    let server = start_doh_server().await;
    mount_body(&server, "example.com", "MX", json!({"Status": 0})).await;
    let resolver = resolver_for(&server);

    let result = check_mx(&resolver, "example.com").await.unwrap();
    assert_eq!(result.reason, "No MX records found");
}

#[tokio::test]
async fn test_mx_ignores_cname_links_in_answer() {
    let server = start_doh_server().await;
    mount_body(
        &server,
        "example.com",
        "MX",
        json!({"Status": 0, "Answer": [
            {"name": "example.com.", "type": 5, "TTL": 60, "data": "mail-host.example.net."},
            {"name": "mail-host.example.net.", "type": 15, "TTL": 60, "data": "5 mx.example.net."}
        ]}),
    )
    .await;
    let resolver = resolver_for(&server);

    let result = check_mx(&resolver, "example.com").await.unwrap();
    assert!(result.is_valid);
    assert_eq!(result.mx.unwrap().len(), 1);
}

#[tokio::test]
async fn test_check_all_over_doh() {
    let server = start_doh_server().await;
    mount_answers(
        &server,
        "selector1._domainkey.example.com",
        "TXT",
        &["v=DKIM1; k=rsa; p=MIGfMA0GCSqGSIb3DQEB"],
    )
    .await;
    mount_answers(&server, "example.com", "TXT", &["v=spf1 include:spf.protection.outlook.com -all"]).await;
    mount_answers(
        &server,
        "_dmarc.example.com",
        "TXT",
        &["v=DMARC1; p=quarantine"],
    )
    .await;
    mount_answers(&server, "example.com", "MX", &["0 example-com.mail.protection.outlook.com."]).await;
    let resolver = resolver_for(&server);

    let options = CheckOptions {
        checks: vec![CheckKind::Dkim, CheckKind::Spf, CheckKind::Dmarc, CheckKind::Mx],
        selectors: SelectorSet::Provider(DkimProvider::Microsoft),
    };
    let report = check_all(&resolver, "https://Example.com/", &options)
        .await
        .unwrap();

    assert_eq!(report.domain, "example.com");
    assert!(report.dkim.as_ref().unwrap().is_valid);
    assert!(report.spf.as_ref().unwrap().is_valid);
    assert!(report.mx.as_ref().unwrap().is_valid);
    assert_eq!(
        report.dmarc.as_ref().unwrap().reason,
        "Missing required DMARC tags: rua"
    );
    assert_eq!(report.invalid_count(), 1);
}

#[tokio::test]
async fn test_http_error_is_a_transport_error() {
    let server = start_doh_server().await;
    mount_http_error(&server, "example.com", "TXT", 503).await;
    let resolver = resolver_for(&server);

    let err = check_spf(&resolver, "example.com").await.unwrap_err();
    assert!(matches!(
        err,
        CheckError::Resolve(ResolveError::HttpStatus { status: 503, .. })
    ));
}

#[tokio::test]
async fn test_malformed_body_is_a_transport_error() {
    let server = start_doh_server().await;
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .and(wiremock::matchers::query_param("name", "_dmarc.example.com"))
        .respond_with(wiremock::ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
        .with_priority(1)
        .mount(&server)
        .await;
    let resolver = resolver_for(&server);

    let err = check_dmarc(&resolver, "example.com").await.unwrap_err();
    assert!(matches!(
        err,
        CheckError::Resolve(ResolveError::Decode { .. })
    ));
}
