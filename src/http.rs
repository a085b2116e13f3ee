use crate::{rate_limit::RateLimitCell, Error, Result};
use reqwest::{
    header::{HeaderValue, AUTHORIZATION},
    StatusCode,
};

pub fn new_client() -> reqwest::Client {
    reqwest::Client::new()
}

/// A `2xx` response, fully read
#[derive(Debug)]
pub(crate) struct Response {
    pub status: StatusCode,
    pub body: String,
}

/// GET `url` with the api key attached
///
/// Refreshes `rate_limit` from any response that carries a full set of rate
/// limit headers, even ones with an error status.
pub(crate) async fn execute(
    client: &reqwest::Client,
    url: &url::Url,
    api_key: &str,
    rate_limit: &RateLimitCell,
) -> Result<Response> {
    if api_key.trim().is_empty() {
        return Err(Error::NoApiKey);
    }

    let mut key = HeaderValue::from_str(api_key)
        .map_err(|_| Error::Generic("the api key is not a valid header value".into()))?;
    key.set_sensitive(true);

    log::trace!("GET {}", url);
    let resp = client
        .get(url.clone())
        .header(AUTHORIZATION, key)
        .send()
        .await
        .map_err(|err| Error::from_transport(err, url.as_str()))?;

    let status = resp.status();
    log::trace!("got {} for {}", status, url);

    rate_limit.update(resp.headers());

    if !status.is_success() {
        return Err(Error::HttpResponse(status.as_u16()));
    }

    let body = resp
        .text()
        .await
        .map_err(|err| Error::from_transport(err, url.as_str()))?;
    log::trace!("read {} bytes from {}", body.len(), url);

    Ok(Response { status, body })
}

/// GET `url` and decode the body as `T`
pub(crate) async fn get_json<T>(
    client: &reqwest::Client,
    url: &url::Url,
    api_key: &str,
    rate_limit: &RateLimitCell,
) -> Result<T>
where
    for<'de> T: serde::Deserialize<'de>,
{
    let resp = execute(client, url, api_key, rate_limit).await?;
    log::trace!("decoding {} response from {}", resp.status, url);
    let item = serde_json::from_str(&resp.body).map_err(|err| {
        log::debug!("invalid json from '{}': {}", url, resp.body);
        Error::Generic(format!("cannot decode json for '{}': {}", url, err))
    })?;

    if log::log_enabled!(log::Level::Debug) {
        if let Some(body) = pretty_body(&resp.body) {
            log::debug!("response from {}:\n{}", url, body);
        }
    }
    Ok(item)
}

/// Re-indent a json body for the logs
fn pretty_body(body: &str) -> Option<String> {
    let value = serde_json::from_str::<serde_json::Value>(body).ok()?;
    serde_json::to_string_pretty(&value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rate_limit::{LIMIT, REMAINING, RESET};
    use httptest::{all_of, matchers::*, responders::*, Expectation, Server};

    fn url(server: &Server) -> url::Url {
        url::Url::parse(&server.url_str("/v1/curated")).unwrap()
    }

    #[tokio::test]
    async fn sends_the_key() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/v1/curated"),
                request::headers(contains(("authorization", "hunter2"))),
            ])
            .respond_with(status_code(200).body("{}")),
        );

        let rate = RateLimitCell::default();
        let resp = execute(&new_client(), &url(&server), "hunter2", &rate)
            .await
            .unwrap();
        assert_eq!(resp.status, StatusCode::OK);
        assert_eq!(resp.body, "{}");
        assert!(rate.get().is_none());
    }

    #[tokio::test]
    async fn no_key_no_request() {
        let server = Server::run();
        server.expect(Expectation::matching(any()).times(0).respond_with(status_code(200)));

        let rate = RateLimitCell::default();
        for key in &["", "  "] {
            let err = execute(&new_client(), &url(&server), key, &rate)
                .await
                .unwrap_err();
            assert_eq!(err, Error::NoApiKey);
        }
    }

    #[tokio::test]
    async fn error_status_still_updates_rate_limit() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/v1/curated")).respond_with(
                status_code(429)
                    .append_header(LIMIT, "20000")
                    .append_header(REMAINING, "0")
                    .append_header(RESET, "1590529646"),
            ),
        );

        let rate = RateLimitCell::default();
        let err = execute(&new_client(), &url(&server), "key", &rate)
            .await
            .unwrap_err();
        assert_eq!(err, Error::HttpResponse(429));
        assert_eq!(rate.get().map(|r| r.remaining), Some(0));
    }

    #[tokio::test]
    async fn bad_json() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/v1/curated"))
                .respond_with(status_code(200).body("<html>not json</html>")),
        );

        let err = get_json::<serde_json::Value>(
            &new_client(),
            &url(&server),
            "key",
            &RateLimitCell::default(),
        )
        .await
        .unwrap_err();
        match err {
            Error::Generic(msg) => assert!(msg.starts_with("cannot decode json"), "{}", msg),
            err => panic!("expected a generic error, got: {:?}", err),
        }
    }

    #[tokio::test]
    async fn connection_refused() {
        let url = url::Url::parse("http://127.0.0.1:1/v1/curated").unwrap();
        let err = execute(&new_client(), &url, "key", &RateLimitCell::default())
            .await
            .unwrap_err();
        match err {
            Error::Generic(..) => {}
            err => panic!("expected a generic error, got: {:?}", err),
        }
    }

    #[tokio::test]
    async fn stalled_body_is_generic() {
        use std::io::{Read as _, Write as _};

        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let stall = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0; 1024];
            let _ = stream.read(&mut buf);
            let _ = stream.write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 1000\r\n\r\n{\"page\":");
            let _ = stream.flush();
            std::thread::sleep(std::time::Duration::from_secs(1));
        });

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(300))
            .build()
            .unwrap();
        let url = url::Url::parse(&format!("http://{}/v1/photos/1", addr)).unwrap();
        let err = execute(&client, &url, "key", &RateLimitCell::default())
            .await
            .unwrap_err();
        match err {
            Error::Generic(..) => {}
            err => panic!("expected a generic error, got: {:?}", err),
        }
        stall.join().unwrap();
    }

    #[tokio::test]
    async fn endless_redirects_are_no_response() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/v1/curated"))
                .times(1..)
                .respond_with(status_code(302).insert_header("location", "/v1/curated")),
        );

        let err = execute(&new_client(), &url(&server), "key", &RateLimitCell::default())
            .await
            .unwrap_err();
        match err {
            Error::NoResponse(req) => assert!(req.starts_with("GET "), "{}", req),
            err => panic!("expected no response, got: {:?}", err),
        }
    }

    #[test]
    fn bodies_are_pretty_printed() {
        assert_eq!(
            pretty_body(r#"{"page":1,"photos":[]}"#).unwrap(),
            "{\n  \"page\": 1,\n  \"photos\": []\n}"
        );
        assert_eq!(pretty_body("<html>"), None);
    }
}
