//! Verb dispatch: command string in, rendered JSON out.

use rexreq_core::auth::mask_token;
use rexreq_core::{render_json, Credentials, GraphClient, HttpMethod};
use tracing::info;

use crate::args::Cli;
use crate::error::CliResult;
use crate::transport::{Transport, UreqTransport};

/// Validate `command`, send one request for `base_url + path`, and return
/// the response body pretty-printed.
///
/// An unrecognized command fails before `transport` is touched.
pub fn dispatch<T: Transport + ?Sized>(
    transport: &T,
    command: &str,
    path: &str,
    token: &str,
    base_url: &str,
) -> CliResult<String> {
    let method: HttpMethod = command.parse()?;
    let client = GraphClient::new(base_url);
    let request = client.build_request(method, path, &Credentials::from_token(token));
    info!(%method, url = %request.url, token = %mask_token(token), "sending request");

    let response = transport.execute(request)?;
    info!(status = response.status, "gateway answered");

    let document = client.parse_response(response)?;
    Ok(render_json(&document)?)
}

/// Run the parsed command line over the network.
pub fn run(cli: &Cli) -> CliResult<String> {
    dispatch(&UreqTransport::new(), &cli.command, &cli.path, &cli.token, &cli.base_url)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use rexreq_core::{ApiError, HttpRequest, HttpResponse, DEFAULT_BASE_URL};
    use rstest::rstest;

    use super::*;
    use crate::error::CliError;

    /// Records every request and answers with a canned result.
    struct FakeTransport {
        calls: RefCell<Vec<HttpRequest>>,
        answer: Result<(u16, &'static str), &'static str>,
    }

    impl FakeTransport {
        fn answering(status: u16, body: &'static str) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                answer: Ok((status, body)),
            }
        }

        fn failing(reason: &'static str) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                answer: Err(reason),
            }
        }
    }

    impl Transport for FakeTransport {
        fn execute(&self, request: HttpRequest) -> CliResult<HttpResponse> {
            let url = request.url.clone();
            self.calls.borrow_mut().push(request);
            match self.answer {
                Ok((status, body)) => Ok(HttpResponse {
                    status,
                    body: body.to_string(),
                }),
                Err(reason) => Err(CliError::request(&url, reason)),
            }
        }
    }

    #[rstest]
    #[case("get", HttpMethod::Get)]
    #[case("put", HttpMethod::Put)]
    #[case("post", HttpMethod::Post)]
    #[case("delete", HttpMethod::Delete)]
    fn each_command_sends_one_matching_request(#[case] command: &str, #[case] expected: HttpMethod) {
        let transport = FakeTransport::answering(200, "{}");
        dispatch(&transport, command, "/graphs", "QUJD", DEFAULT_BASE_URL).unwrap();

        let calls = transport.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, expected);
    }

    #[rstest]
    #[case("GET")]
    #[case("patch")]
    #[case("")]
    #[case("gets")]
    fn invalid_command_makes_no_call(#[case] command: &str) {
        let transport = FakeTransport::answering(200, "{}");
        let err = dispatch(&transport, command, "/graphs", "QUJD", DEFAULT_BASE_URL).unwrap_err();

        assert!(matches!(err, CliError::Api(ApiError::InvalidCommand(_))));
        assert_eq!(err.exit_code(), 1);
        assert!(transport.calls.borrow().is_empty());
    }

    #[test]
    fn get_graphs_prints_indented_listing() {
        let transport = FakeTransport::answering(200, r#"{"graphs": ["tinkergraph"]}"#);
        let out = dispatch(&transport, "get", "/graphs", "QUJD", "http://localhost:8182").unwrap();

        assert_eq!(out, "{\n    \"graphs\": [\n        \"tinkergraph\"\n    ]\n}");
        let calls = transport.calls.borrow();
        assert_eq!(calls[0].url, "http://localhost:8182/graphs");
        assert_eq!(calls[0].header("authorization"), Some("Basic UVVKRDpub25l"));
    }

    #[test]
    fn put_vertex_targets_concatenated_url() {
        let transport = FakeTransport::answering(200, "{}");
        dispatch(&transport, "put", "/graphs/g/vertices/1", "dG9rZW4=", DEFAULT_BASE_URL).unwrap();

        let calls = transport.calls.borrow();
        assert_eq!(calls[0].method, HttpMethod::Put);
        assert_eq!(calls[0].url, "http://localhost:8182/graphs/g/vertices/1");
        assert_eq!(calls[0].header("authorization"), Some("Basic ZEc5clpXND06bm9uZQ=="));
    }

    #[test]
    fn error_status_body_is_printed_as_success() {
        let transport = FakeTransport::answering(404, r#"{"message":"Graph [g] could not be found"}"#);
        let out = dispatch(&transport, "get", "/graphs/g", "QUJD", DEFAULT_BASE_URL).unwrap();
        assert_eq!(out, "{\n    \"message\": \"Graph [g] could not be found\"\n}");
    }

    #[test]
    fn transport_failure_maps_to_request_failure() {
        let transport = FakeTransport::failing("connection refused");
        let err = dispatch(&transport, "get", "/graphs", "QUJD", "http://localhost:1").unwrap_err();

        assert!(matches!(err, CliError::Request { .. }));
        assert_eq!(err.exit_code(), 2);
        assert_eq!(transport.calls.borrow().len(), 1);
    }

    #[test]
    fn non_json_body_maps_to_request_failure() {
        let transport = FakeTransport::answering(200, "<html></html>");
        let err = dispatch(&transport, "get", "/graphs", "QUJD", DEFAULT_BASE_URL).unwrap_err();

        assert!(matches!(err, CliError::Api(ApiError::InvalidJson { status: 200, .. })));
        assert_eq!(err.exit_code(), 2);
    }
}
