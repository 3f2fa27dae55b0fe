//! Local GeoLite2 country lookup backend.

use std::net::IpAddr;
use std::path::Path;

use async_trait::async_trait;
use maxminddb::Reader;

use super::country::display_label;
use super::CountryBackend;
use crate::error_handling::ResolveError;

/// Country backend backed by a local MaxMind GeoLite2 database file.
///
/// The database is optional infrastructure: callers treat a failed `open`
/// as "backend not configured" and fall through to the remote API.
pub struct GeoDbBackend {
    reader: Reader<Vec<u8>>,
}

impl GeoDbBackend {
    /// Opens the database file read-only.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::Database` if the file is missing or is not a
    /// valid MaxMind database.
    pub fn open(path: &Path) -> Result<Self, ResolveError> {
        let bytes = std::fs::read(path)
            .map_err(|err| ResolveError::Database(format!("{}: {err}", path.display())))?;
        let reader = Reader::from_source(bytes)
            .map_err(|err| ResolveError::Database(format!("{}: {err}", path.display())))?;
        Ok(Self { reader })
    }
}

#[async_trait]
impl CountryBackend for GeoDbBackend {
    fn name(&self) -> &'static str {
        "geolite2"
    }

    async fn lookup(&self, address: &str) -> Result<Option<String>, ResolveError> {
        // Syntactic matches with out-of-range octets cannot be parsed as
        // real addresses; the local database simply has no answer for them.
        let ip: IpAddr = match address.parse() {
            Ok(ip) => ip,
            Err(_) => return Ok(None),
        };

        let result = self
            .reader
            .lookup(ip)
            .map_err(|err| ResolveError::Database(err.to_string()))?;
        if !result.has_data() {
            return Ok(None);
        }

        let record: maxminddb::geoip2::Country = match result.decode() {
            Ok(Some(record)) => record,
            Ok(None) => return Ok(None),
            Err(err) => return Err(ResolveError::Database(err.to_string())),
        };

        Ok(record
            .country
            .iso_code
            .map(|code| display_label(code)))
    }
}
