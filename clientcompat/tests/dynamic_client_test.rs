use clientcompat::pb::file_descriptor_set_bytes;
use compat_service_impl::CompatServiceImpl;
use twirpc_core::client::online::DynamicCallError;
use twirpc_core::client::{Descriptor, DynamicClient, DynamicRequest, Offline, Online};
use twirpc_core::{ClientError, TwirpClient};


fn setup_offline() -> DynamicClient<Offline> {
    DynamicClient::offline(file_descriptor_set_bytes()).expect("Failed to load file descriptor set")
}

fn setup_client() -> DynamicClient<Online<CompatServiceImpl>> {
    setup_offline().connect(TwirpClient::with_transport(
        "http://compat.test",
        CompatServiceImpl::default(),
    ))
}

fn request(method: &str, body: serde_json::Value) -> DynamicRequest {
    DynamicRequest {
        service: "twirp.clientcompat.CompatService".to_string(),
        method: method.to_string(),
        body,
        headers: vec![],
    }
}

#[test]
fn test_list_services() {
    let client = setup_offline();

    assert_eq!(
        client.list_services(),
        vec!["twirp.clientcompat.CompatService".to_string()]
    );
}

#[test]
fn test_describe_descriptors() {
    let client = setup_offline();

    // 1. Describe Service
    let desc = client
        .get_descriptor_by_symbol("twirp.clientcompat.CompatService")
        .expect("Service not found");
    let service = desc.service_descriptor().expect("Expected ServiceDescriptor");
    let methods: Vec<_> = service.methods().map(|m| m.name().to_string()).collect();
    assert_eq!(methods, vec!["Method", "NoopMethod"]);

    // 2. Describe Message
    let desc = client
        .get_descriptor_by_symbol("twirp.clientcompat.Req")
        .expect("Message not found");
    assert!(matches!(desc, Descriptor::MessageDescriptor(_)));
    assert_eq!(desc.name(), "Req");
    assert_eq!(desc.package_name(), "twirp.clientcompat");

    // 3. Error Case
    assert!(client.get_descriptor_by_symbol("twirp.clientcompat.Ghost").is_none());
}

#[test]
fn test_invalid_descriptor_bytes() {
    assert!(DynamicClient::offline(vec![0xff, 0x01, 0x02]).is_err());
}

#[tokio::test]
async fn test_dynamic_method() {
    let client = setup_client();

    let res = client
        .dynamic(request("Method", serde_json::json!({ "v": "7" })))
        .await
        .unwrap();

    assert_eq!(res.unwrap(), serde_json::json!({ "v": 7 }));
}

#[tokio::test]
async fn test_dynamic_noop_method() {
    let client = setup_client();

    let res = client
        .dynamic(request("NoopMethod", serde_json::json!({})))
        .await
        .unwrap();

    assert_eq!(res.unwrap(), serde_json::json!({}));
}

#[tokio::test]
async fn test_dynamic_twirp_error() {
    let client = setup_client();

    let err = client
        .dynamic(request("Method", serde_json::json!({ "v": "fail" })))
        .await
        .unwrap()
        .unwrap_err();

    assert_eq!(err.code, "invalid_argument");
    assert_eq!(err.meta("argument"), Some("v"));
}

#[tokio::test]
async fn test_dynamic_resolution_errors() {
    let client = setup_client();

    let mut req = request("Method", serde_json::json!({}));
    req.service = "twirp.clientcompat.Ghost".to_string();
    let err = client.dynamic(req).await.unwrap_err();
    assert!(matches!(err, DynamicCallError::ServiceNotFound(s) if s == "twirp.clientcompat.Ghost"));

    let err = client
        .dynamic(request("GhostMethod", serde_json::json!({})))
        .await
        .unwrap_err();
    assert!(matches!(err, DynamicCallError::MethodNotFound(m) if m == "GhostMethod"));
}

#[tokio::test]
async fn test_dynamic_body_must_match_schema() {
    let client = setup_client();

    let err = client
        .dynamic(request("Method", serde_json::json!({ "v": "1", "extra": true })))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DynamicCallError::ClientError(ClientError::Encode(_))
    ));
}
