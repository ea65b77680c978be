//! Value parsers for CLI arguments clap cannot check on its own.

use std::net::IpAddr;
use std::path::PathBuf;

const MAX_HOSTNAME_LEN: usize = 253;

pub fn validate_port(port_str: &str) -> Result<u16, String> {
    let port: u16 = port_str.parse().map_err(|_| {
        format!(
            "Port must be a valid number between 1 and 65535, got: '{}'",
            port_str
        )
    })?;

    if port == 0 {
        return Err("Port must be between 1 and 65535. Port 0 is not allowed.".to_string());
    }

    Ok(port)
}

/// The file must exist and be readable.
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.is_file() {
        return Err(format!(
            "Configuration file does not exist or is not a file: '{}'",
            path_str
        ));
    }

    std::fs::File::open(&path)
        .map(|_| path)
        .map_err(|e| format!("Cannot read configuration file '{}': {}", path_str, e))
}

/// Accepts IP addresses (v4 or v6) and RFC 1123 hostnames.
pub fn validate_host_address(host_str: &str) -> Result<String, String> {
    let host = host_str.trim();

    if host.is_empty() {
        return Err("Host address cannot be empty".to_string());
    }

    if host.parse::<IpAddr>().is_ok() {
        return Ok(host.to_string());
    }

    // All-numeric dotted strings that failed to parse are malformed IPs
    if host.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(format!("Invalid IPv4 address format: '{}'", host_str));
    }

    if host.len() > MAX_HOSTNAME_LEN {
        return Err(format!(
            "Host address is too long (maximum {} characters)",
            MAX_HOSTNAME_LEN
        ));
    }

    let valid_label = |label: &str| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    };
    if !host.split('.').all(valid_label) {
        return Err(format!("Invalid hostname: '{}'", host_str));
    }

    Ok(host.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_validation() {
        for port in ["1", "80", "3000", "65535"] {
            assert!(validate_port(port).is_ok(), "Port {} should be valid", port);
        }
        for port in ["0", "65536", "abc", "-1", ""] {
            assert!(validate_port(port).is_err(), "Port '{}' should be invalid", port);
        }
    }

    #[test]
    fn test_host_validation_valid_hosts() {
        for host in [
            "localhost",
            "127.0.0.1",
            "0.0.0.0",
            "::1",
            "192.168.1.1",
            "example.com",
            "my-server.local",
        ] {
            assert!(validate_host_address(host).is_ok(), "Host {} should be valid", host);
        }
    }

    #[test]
    fn test_host_validation_invalid_hosts() {
        let long = "x".repeat(300);
        for host in [
            "",
            "   ",
            "host with spaces",
            "999.999.999.999",
            "-leading.example",
            "under_score.example",
            long.as_str(),
        ] {
            assert!(validate_host_address(host).is_err(), "Host '{}' should be invalid", host);
        }
    }

    #[test]
    fn test_config_file_validation() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        assert_eq!(validate_config_file_path(path).unwrap(), file.path());

        let dir = tempfile::tempdir().unwrap();
        assert!(validate_config_file_path(dir.path().to_str().unwrap()).is_err());
        assert!(validate_config_file_path("/definitely/not/here.toml").is_err());
    }
}
