//! Access log lines in the common web-server format

use axum::http::{Method, Uri, Version};
use chrono::{DateTime, Local};
use std::net::SocketAddr;
use tracing::info;

/// Timestamp layout, e.g. `19/Oct/2026:09:15:02 +0200`
const TIME_FORMAT: &str = "%d/%b/%Y:%H:%M:%S %z";

/// Format one request; the user field is always empty
pub fn access_line(
    remote: Option<SocketAddr>,
    time: DateTime<Local>,
    method: &Method,
    uri: &Uri,
    version: Version,
) -> String {
    let remote = remote
        .map(|addr| addr.to_string())
        .unwrap_or_else(|| "-".to_string());
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    format!(
        "{} - {} [{}] \"{} {} {:?}\" ",
        remote,
        "",
        time.format(TIME_FORMAT),
        method,
        target,
        version
    )
}

/// Log a request to the `access` target
pub fn log_request(remote: Option<SocketAddr>, method: &Method, uri: &Uri, version: Version) {
    let line = access_line(remote, Local::now(), method, uri, version);
    info!(target: "access", "{}", line);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_access_line_format() {
        let time = Local.with_ymd_and_hms(2026, 10, 19, 9, 15, 2).unwrap();
        let uri: Uri = "/?tab=all".parse().unwrap();
        let remote: SocketAddr = "10.0.0.5:51234".parse().unwrap();

        let line = access_line(Some(remote), time, &Method::GET, &uri, Version::HTTP_11);

        let expected_time = time.format(TIME_FORMAT).to_string();
        assert!(expected_time.starts_with("19/Oct/2026:09:15:02 "));
        assert_eq!(
            line,
            format!("10.0.0.5:51234 -  [{}] \"GET /?tab=all HTTP/1.1\" ", expected_time)
        );
    }

    #[test]
    fn test_unknown_remote() {
        let uri: Uri = "/".parse().unwrap();
        let line = access_line(None, Local::now(), &Method::GET, &uri, Version::HTTP_10);
        assert!(line.starts_with("- -  ["));
        assert!(line.ends_with("\"GET / HTTP/1.0\" "));
    }
}
