use clientcompat::{CompatServiceClient, Empty, Req, Resp};
use compat_service_impl::CompatServiceImpl;
use std::sync::Arc;
use twirpc_core::{ClientError, ErrorCode, TwirpClient};


fn setup_client() -> CompatServiceClient<CompatServiceImpl> {
    let client = TwirpClient::with_transport("http://compat.test", CompatServiceImpl::default());
    CompatServiceClient::from_client(client)
}

fn req(v: &str) -> Req {
    Req { v: v.to_string() }
}

#[tokio::test]
async fn test_method() {
    let client = setup_client();

    let resp = client.method(req("42")).await.unwrap().unwrap();

    assert_eq!(resp, Resp { v: 42 });
}

#[tokio::test]
async fn test_noop_method() {
    let client = setup_client();

    let resp = client.noop_method(Empty {}).await.unwrap().unwrap();

    assert_eq!(resp, Empty {});
}

#[tokio::test]
async fn test_zero_value_response() {
    let client = setup_client();

    // Resp { v: 0 } is encoded as an empty body.
    let resp = client.method(req("0")).await.unwrap().unwrap();

    assert_eq!(resp, Resp::default());
}

#[tokio::test]
async fn test_twirp_error() {
    let client = setup_client();

    let err = client.method(req("fail")).await.unwrap().unwrap_err();

    assert_eq!(err.error_code(), Some(ErrorCode::InvalidArgument));
    assert_eq!(err.message, "v is not allowed to fail");
    assert_eq!(err.meta("argument"), Some("v"));
}

#[tokio::test]
async fn test_error_from_intermediary() {
    let client = setup_client();

    let err = client.method(req("proxy")).await.unwrap().unwrap_err();

    assert_eq!(err.code, "internal");
    assert_eq!(
        err.message,
        "Error from intermediary with HTTP status code 503 Service Unavailable"
    );
    assert!(err.meta.is_empty());
}

#[tokio::test]
async fn test_wrong_prefix_is_a_bad_route() {
    let client = TwirpClient::with_transport("http://compat.test", CompatServiceImpl::default())
        .with_prefix("/v2");
    let client = CompatServiceClient::from_client(client);

    let err = client.method(req("1")).await.unwrap().unwrap_err();

    assert_eq!(err.error_code(), Some(ErrorCode::BadRoute));
    assert!(err.message.contains("/v2/twirp.clientcompat.CompatService/Method"));
}

#[tokio::test]
async fn test_one_request_per_call() {
    let service = Arc::new(CompatServiceImpl::default());
    let client = TwirpClient::with_transport("http://compat.test", service.clone());
    let client = CompatServiceClient::from_client(client);

    client.method(req("1")).await.unwrap().unwrap();
    client.method(req("fail")).await.unwrap().unwrap_err();
    client.noop_method(Empty {}).await.unwrap().unwrap();

    assert_eq!(service.calls(), 3);
}

#[tokio::test]
async fn test_malformed_address_fails_lazily() {
    let client = TwirpClient::with_transport("::not a url::", CompatServiceImpl::default());
    let client = CompatServiceClient::from_client(client);

    let err = client.method(req("1")).await.unwrap_err();

    assert!(matches!(err, ClientError::InvalidRequest { .. }));
}
