//! Installer pipeline tests
//!
//! Drive the full request pipeline against a recording stub transport:
//! endpoint construction, request assembly, and response reporting.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::io::Write;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

use mariner_baremetal::auth::StaticTokenProvider;
use mariner_baremetal::config::ApiSettings;
use mariner_baremetal::installer::{
    report, EndpointBuilder, InstallerClient, InstallerOperations, InstallerRequestParams,
    OperationKind, RequestEnvelope, ResponseOutcome, Transport, TransportResponse,
};
use mariner_baremetal::{MarinerError, Result};

const SUBSCRIPTION: &str = "00000000-1111-2222-3333-444444444444";

/// Transport that records every request and answers with a fixed response
struct RecordingTransport {
    status: u16,
    body: String,
    requests: Mutex<Vec<RequestEnvelope>>,
}

impl RecordingTransport {
    fn new(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            status,
            body: body.to_string(),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<RequestEnvelope> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: RequestEnvelope) -> Result<TransportResponse> {
        self.requests.lock().unwrap().push(request);
        Ok(TransportResponse::new(self.status, self.body.clone()))
    }
}

fn client(transport: Arc<RecordingTransport>) -> InstallerClient {
    InstallerClient::new(
        Arc::new(StaticTokenProvider::new("test-token")),
        transport,
        EndpointBuilder::new(ApiSettings::default()),
        SUBSCRIPTION,
    )
}

fn host_config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

/// Log sink for capturing `tracing` output
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

fn report_with_logs(
    kind: OperationKind,
    name: Option<&str>,
    outcome: &ResponseOutcome,
) -> (String, String) {
    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    let mut out = Vec::new();
    tracing::subscriber::with_default(subscriber, || {
        report(&mut out, kind, name, outcome).unwrap();
    });
    (String::from_utf8(out).unwrap(), logs.contents())
}

#[cfg(test)]
mod create_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_end_to_end() {
        let file = host_config_file("host-configuration:\n  hostname: h1\n");
        let transport = RecordingTransport::new(200, r#"{"name":"mariner-baremetal-installer"}"#);

        let params = InstallerRequestParams::new("rg1", "sa1", "bc1", file.path())
            .with_installer_name("mariner-baremetal-installer")
            .with_location("eastus");
        let outcome = client(transport.clone())
            .create_installer(&params)
            .await
            .unwrap();
        assert!(outcome.is_success());

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.method, reqwest::Method::PUT);
        assert_eq!(
            request.url,
            format!(
                "https://centraluseuap.management.azure.com/subscriptions/{}/resourcegroups/rg1/providers/Private.MarinerProvisioningInstaller/installerimage/mariner-baremetal-installer?api-version=2023-10-01-privatepreview",
                SUBSCRIPTION
            )
        );
        assert_eq!(
            request.body.as_deref().unwrap(),
            r#"{"location":"eastus","properties":{"blob-storage-configuration":{"account-url":"https://sa1.blob.core.windows.net/","container-name":"bc1","blob-name":"mariner-baremetal-installer"},"host-configuration":{"hostname":"h1"}}}"#
        );
        assert_eq!(request.headers["authorization"], "Bearer test-token");
        assert_eq!(request.headers["content-type"], "application/json");
    }

    #[tokio::test]
    async fn test_create_passes_nested_host_configuration_verbatim() {
        let file = host_config_file(
            r#"
host-configuration:
  hostname: node-01
  network:
    interfaces:
      - name: eth0
        dhcp: true
      - name: eth1
        address: 10.0.0.5/24
  packages: [openssh-server, curl]
unrelated-key: ignored
"#,
        );
        let transport = RecordingTransport::new(200, "{}");
        let params = InstallerRequestParams::new("rg1", "sa1", "bc1", file.path()).with_location("westus");
        client(transport.clone()).create_installer(&params).await.unwrap();

        let body: Value = serde_json::from_str(transport.requests()[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body["properties"]["host-configuration"],
            json!({
                "hostname": "node-01",
                "network": {
                    "interfaces": [
                        { "name": "eth0", "dhcp": true },
                        { "name": "eth1", "address": "10.0.0.5/24" }
                    ]
                },
                "packages": ["openssh-server", "curl"]
            })
        );
        assert!(body.get("unrelated-key").is_none());
        assert!(body["properties"].get("unrelated-key").is_none());
    }

    #[tokio::test]
    async fn test_create_without_host_configuration_key_sends_nothing() {
        let file = host_config_file("hostname: h1\n");
        let transport = RecordingTransport::new(200, "{}");
        let params = InstallerRequestParams::new("rg1", "sa1", "bc1", file.path()).with_location("eastus");

        let err = client(transport.clone())
            .create_installer(&params)
            .await
            .unwrap_err();
        assert!(matches!(err, MarinerError::MissingConfigKey { .. }));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_create_with_malformed_yaml_sends_nothing() {
        let file = host_config_file("host-configuration: {hostname: h1\n");
        let transport = RecordingTransport::new(200, "{}");
        let params = InstallerRequestParams::new("rg1", "sa1", "bc1", file.path()).with_location("eastus");

        let err = client(transport.clone())
            .create_installer(&params)
            .await
            .unwrap_err();
        assert!(matches!(err, MarinerError::HostConfigParse { .. }));
        assert!(transport.requests().is_empty());
    }
}

#[cfg(test)]
mod read_tests {
    use super::*;

    #[tokio::test]
    async fn test_show_success_prints_pretty_json() {
        let transport = RecordingTransport::new(200, r#"{"name":"foo"}"#);
        let outcome = client(transport.clone())
            .show_installer("rg1", "foo")
            .await
            .unwrap();

        let request = &transport.requests()[0];
        assert_eq!(request.method, reqwest::Method::GET);
        assert!(request.body.is_none());
        assert!(request
            .url
            .ends_with("/installerimage/foo?api-version=2023-10-01-privatepreview"));

        let (stdout, logs) = report_with_logs(OperationKind::Show, Some("foo"), &outcome);
        assert_eq!(stdout, "{\n  \"name\": \"foo\"\n}\n");
        assert!(!logs.contains("ERROR"), "unexpected error log: {logs}");
    }

    #[tokio::test]
    async fn test_show_not_found_logs_error() {
        let transport = RecordingTransport::new(404, r#"{"error":{"code":"ResourceNotFound"}}"#);
        let outcome = client(transport).show_installer("rg1", "foo").await.unwrap();
        assert!(matches!(outcome, ResponseOutcome::Failure { status: 404, .. }));

        let (stdout, logs) = report_with_logs(OperationKind::Show, Some("foo"), &outcome);
        assert!(stdout.is_empty());
        assert!(logs.contains("ERROR"));
        assert!(logs.contains("404"));
        assert!(logs.contains("ResourceNotFound"));
    }

    #[tokio::test]
    async fn test_list_uses_collection_endpoint() {
        let transport = RecordingTransport::new(200, r#"{"value":[{"name":"a"},{"name":"b"}]}"#);
        let outcome = client(transport.clone()).list_installers("rg1").await.unwrap();

        assert!(transport.requests()[0]
            .url
            .ends_with("/resourcegroups/rg1/providers/Private.MarinerProvisioningInstaller/installerimage?api-version=2023-10-01-privatepreview"));
        assert_eq!(
            outcome,
            ResponseOutcome::Success(Some(json!({"value": [{"name": "a"}, {"name": "b"}]})))
        );
    }
}

#[cfg(test)]
mod delete_tests {
    use super::*;

    #[tokio::test]
    async fn test_delete_success_message() {
        let transport = RecordingTransport::new(200, "");
        let outcome = client(transport.clone())
            .delete_installer("rg1", "img")
            .await
            .unwrap();
        assert_eq!(transport.requests()[0].method, reqwest::Method::DELETE);

        let (stdout, _) = report_with_logs(OperationKind::Delete, Some("img"), &outcome);
        assert_eq!(stdout, "Successfully deleted Mariner Baremetal installer image img\n");
    }

    #[tokio::test]
    async fn test_delete_failure_logs_status() {
        let transport = RecordingTransport::new(409, "conflict");
        let outcome = client(transport).delete_installer("rg1", "img").await.unwrap();

        let (stdout, logs) = report_with_logs(OperationKind::Delete, Some("img"), &outcome);
        assert!(stdout.is_empty());
        assert!(logs.contains("Failed to delete Mariner Baremetal installer image img with status code 409"));
    }
}

#[cfg(test)]
mod request_id_tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_each_request_gets_a_fresh_correlation_id() {
        let transport = RecordingTransport::new(200, "{}");
        let client = client(transport.clone());
        client.show_installer("rg1", "a").await.unwrap();
        client.show_installer("rg1", "a").await.unwrap();

        let ids: Vec<String> = transport
            .requests()
            .iter()
            .map(|request| request.request_id().unwrap().to_string())
            .collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.iter().all(|id| Uuid::parse_str(id).is_ok()));
        assert_ne!(ids[0], ids[1]);
    }
}
