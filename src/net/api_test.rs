use super::*;

fn base(url: &str) -> Url {
    Url::parse(url).unwrap()
}

#[test]
fn collection_url_appends_resource() {
    let url = collection_url(&base("http://localhost:8000/api"));
    assert_eq!(url.as_str(), "http://localhost:8000/api/overlays");
}

#[test]
fn collection_url_on_host_root() {
    let url = collection_url(&base("http://localhost:8000/"));
    assert_eq!(url.as_str(), "http://localhost:8000/overlays");
}

#[test]
fn item_url_appends_id() {
    let id = OverlayId::new("abc-123");
    let url = item_url(&base("http://localhost:8000/api"), &id);
    assert_eq!(url.as_str(), "http://localhost:8000/api/overlays/abc-123");
}

#[test]
fn item_url_percent_encodes_reserved_characters() {
    let id = OverlayId::new("a/b?c#d");
    let url = item_url(&base("http://localhost:8000/api"), &id);
    assert_eq!(url.as_str(), "http://localhost:8000/api/overlays/a%2Fb%3Fc%23d");
    assert_eq!(url.query(), None);
    assert_eq!(url.fragment(), None);
}

#[test]
fn with_client_trims_trailing_slash() {
    let repo = HttpOverlayRepository::with_client(reqwest::Client::new(), "http://localhost:8000/api/").unwrap();
    assert_eq!(repo.base_url(), "http://localhost:8000/api");
}

#[test]
fn with_client_rejects_unusable_base_url() {
    for raw in ["not a url", "mailto:ops@example.test"] {
        let err = HttpOverlayRepository::with_client(reqwest::Client::new(), raw).unwrap_err();
        assert!(matches!(err, ApiError::InvalidBaseUrl { .. }));
        assert!(!err.is_protocol());
        assert!(!err.is_transport());
    }
}

#[test]
fn new_uses_config_base_url() {
    let config = ClientConfig { base_url: "http://overlays.test/api".to_owned(), ..ClientConfig::default() };
    let repo = HttpOverlayRepository::new(&config).unwrap();
    assert_eq!(repo.base_url(), "http://overlays.test/api");
}

#[test]
fn decode_envelope_ignores_http_status() {
    let body = br#"{"success":false,"error":"Overlay not found"}"#;
    let envelope = decode_envelope::<Overlay>(404, body).unwrap();
    let err = envelope.into_data(UPDATE_FAILED).unwrap_err();
    assert_eq!(err.to_string(), "Overlay not found");
}

#[test]
fn decode_envelope_reports_malformed_body_with_status() {
    let err = decode_envelope::<Vec<Overlay>>(502, b"<html>Bad Gateway</html>").unwrap_err();
    assert!(err.is_protocol());
    assert!(err.to_string().contains("HTTP 502"));
}

#[test]
fn decode_envelope_rejects_missing_success_flag() {
    let err = decode_envelope::<Vec<Overlay>>(200, br#"{"data":[]}"#).unwrap_err();
    assert!(matches!(err, ApiError::Malformed { .. }));
}

#[test]
fn decode_envelope_trusts_success_flag_over_status() {
    let envelope = decode_envelope::<Vec<Overlay>>(500, br#"{"success":true,"data":[]}"#).unwrap();
    assert!(envelope.into_data(LIST_FAILED).unwrap().is_empty());
}
