use thiserror::Error;

pub mod types;
pub mod utils;
pub mod http;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("network error: {0}")]
    Network(String),
    #[error("upstream responded with status {status} for {url}")]
    Status { status: u16, url: String },
    #[error("parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn status_error_names_url() {
        let e = CoreError::Status { status: 503, url: "https://pokeapi.co/api/v2/pokemon".into() };
        assert_eq!(e.to_string(), "upstream responded with status 503 for https://pokeapi.co/api/v2/pokemon");
    }
}
