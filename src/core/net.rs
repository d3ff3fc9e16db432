// src/core/net.rs

// HTTP/1.0 GET over TCP (std-only). Used only for best-effort auxiliary
// lookups (field enrichment); callers must treat any error as "value
// unavailable", never as a fatal condition.

use std::{
    io::{Read, Write},
    net::TcpStream,
    time::Duration,
};

pub fn http_get_timeout(
    host: &str,
    port: u16,
    path: &str,
    timeout: Duration,
) -> Result<String, Box<dyn std::error::Error>> {
    let mut s = TcpStream::connect((host, port))?;
    s.set_read_timeout(Some(timeout))?;
    s.set_write_timeout(Some(timeout))?;

    let req = format!(
        "GET {} HTTP/1.0\r\nHost: {}\r\nUser-Agent: pagegrid/0.2\r\nConnection: close\r\n\r\n",
        path, host
    );
    s.write_all(req.as_bytes())?;
    s.flush()?;

    let mut buf = Vec::new();
    s.read_to_end(&mut buf)?;
    let resp = String::from_utf8_lossy(&buf);

    let status = resp.split("\r\n").next().unwrap_or("");
    if !status.contains("200") {
        return Err(format!("HTTP error: {} {}{}", status, host, path).into());
    }
    let body_idx = resp.find("\r\n\r\n").ok_or("Malformed HTTP response")? + 4;
    Ok(resp[body_idx..].to_string())
}
