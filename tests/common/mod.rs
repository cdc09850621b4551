#![allow(dead_code)]

pub mod test_server {
    use chainserve::config::ServerConfig;
    use chainserve::server::{HttpServer, ServerHandle, SiteService};
    use chainserve::site::Site;
    use std::net::{SocketAddr, TcpListener};
    use std::path::Path;
    use std::sync::Once;

    /// Ensures May coroutines are configured only once
    static MAY_INIT: Once = Once::new();

    pub fn setup_may_runtime() {
        MAY_INIT.call_once(|| {
            may::config().set_stack_size(0x8000);
        });
    }

    /// A running server over a document root, stopped on drop.
    pub struct TestServer {
        handle: Option<ServerHandle>,
        addr: SocketAddr,
    }

    impl TestServer {
        pub fn start(root: &Path) -> Self {
            Self::start_with(root, |_| {})
        }

        /// Start with a config adjusted by `tweak`. The port is always a
        /// free ephemeral port.
        pub fn start_with(root: &Path, tweak: impl FnOnce(&mut ServerConfig)) -> Self {
            setup_may_runtime();

            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            let addr = listener.local_addr().unwrap();
            drop(listener);

            let mut config = ServerConfig {
                host: "127.0.0.1".to_string(),
                port: addr.port(),
                document_root: root.to_path_buf(),
                ..ServerConfig::default()
            };
            tweak(&mut config);

            let site = Site::new(&config).unwrap();
            let handle = HttpServer(SiteService::new(site)).start(addr).unwrap();
            handle.wait_ready().unwrap();
            Self {
                handle: Some(handle),
                addr,
            }
        }

        pub fn addr(&self) -> SocketAddr {
            self.addr
        }
    }

    impl Drop for TestServer {
        fn drop(&mut self) {
            if let Some(handle) = self.handle.take() {
                handle.stop();
            }
        }
    }
}

pub mod http {
    use std::io::{Read, Write};
    use std::net::{SocketAddr, TcpStream};
    use std::time::Duration;

    /// A parsed HTTP response.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct TestResponse {
        pub status: u16,
        pub content_type: String,
        pub content_length: Option<usize>,
        pub body: Vec<u8>,
    }

    impl TestResponse {
        pub fn text(&self) -> String {
            String::from_utf8_lossy(&self.body).into_owned()
        }
    }

    /// Send a raw request and read exactly one response.
    ///
    /// The body is read up to `Content-Length`, so slow handlers (scripts)
    /// are waited for instead of racing a short read timeout.
    pub fn send_request(addr: &SocketAddr, req: &str) -> TestResponse {
        let mut stream = TcpStream::connect(addr).unwrap();
        stream.write_all(req.as_bytes()).unwrap();
        stream
            .set_read_timeout(Some(Duration::from_secs(10)))
            .unwrap();

        let mut buf = Vec::new();
        let mut tmp = [0u8; 4096];
        let header_end = loop {
            if let Some(pos) = find(&buf, b"\r\n\r\n") {
                break pos;
            }
            let n = stream.read(&mut tmp).unwrap();
            assert!(n > 0, "connection closed before headers");
            buf.extend_from_slice(&tmp[..n]);
        };

        let head = String::from_utf8_lossy(&buf[..header_end]).into_owned();
        let mut status = 0;
        let mut content_type = String::new();
        let mut content_length = None;
        for line in head.lines() {
            if line.starts_with("HTTP/1.") {
                status = line
                    .split_whitespace()
                    .nth(1)
                    .unwrap_or("0")
                    .parse()
                    .unwrap();
            } else if let Some((name, val)) = line.split_once(':') {
                if name.eq_ignore_ascii_case("content-type") {
                    content_type = val.trim().to_string();
                } else if name.eq_ignore_ascii_case("content-length") {
                    content_length = val.trim().parse().ok();
                }
            }
        }

        let mut body = buf[header_end + 4..].to_vec();
        let expected = content_length.unwrap_or(0);
        while body.len() < expected {
            let n = stream.read(&mut tmp).unwrap();
            if n == 0 {
                break;
            }
            body.extend_from_slice(&tmp[..n]);
        }

        TestResponse {
            status,
            content_type,
            content_length,
            body,
        }
    }

    pub fn get(addr: &SocketAddr, path: &str) -> TestResponse {
        send_request(
            addr,
            &format!("GET {path} HTTP/1.1\r\nHost: localhost\r\n\r\n"),
        )
    }

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack
            .windows(needle.len())
            .position(|window| window == needle)
    }
}
