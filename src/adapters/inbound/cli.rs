//! Command Line Adapter
//!
//! Parses arguments into a [`Mode`], drives the [`LocateService`] and renders
//! the result as a location report, a JSON dump or a distance.

use crate::application::LocateService;
use crate::domain::entities::{LocationQuery, LocationRecord};
use crate::domain::error::LocateError;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::sync::Arc;

const EXAMPLES: &str = "\
Examples:
  ip-locate                                Get location info for your IP address
  ip-locate -j                             Get location info for your IP as json
  ip-locate 8.8.8.8                        Get location info for an IP address
  ip-locate distance 8.8.8.8               Get distance from your IP to given IP
  ip-locate distance triage.net google.com Get the distance between two given hosts";

/// Placeholder for fields the geolocation service did not return.
pub const MISSING_FIELD: &str = "-";

#[derive(Debug, Parser)]
#[command(
    name = "ip-locate",
    version,
    about = "Locate IP addresses and hostnames, and measure the distance between them",
    after_help = EXAMPLES
)]
pub struct Cli {
    /// Return data as json (ignored by `distance`)
    #[arg(short, long, global = true)]
    pub json: bool,

    /// IP address or hostname to locate (defaults to your own IP)
    pub location: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute the approx. distance between IPs/hostnames
    Distance {
        /// First IP address or hostname
        loc1: String,
        /// Second IP address or hostname (defaults to your own IP)
        loc2: Option<String>,
    },
}

/// What a single invocation does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Labeled, human readable fields
    Report(LocationQuery),
    /// The full record as pretty JSON
    Json(LocationQuery),
    /// Great-circle distance between two locations
    Distance(LocationQuery, LocationQuery),
}

impl Cli {
    pub fn mode(&self) -> Mode {
        match &self.command {
            Some(Command::Distance { loc1, loc2 }) => Mode::Distance(
                LocationQuery::parse(Some(loc1.as_str())),
                LocationQuery::parse(loc2.as_deref()),
            ),
            None if self.json => Mode::Json(LocationQuery::parse(self.location.as_deref())),
            None => Mode::Report(LocationQuery::parse(self.location.as_deref())),
        }
    }
}

/// Runs a [`Mode`] against the locate service and produces the text to print.
pub struct CommandRunner {
    service: Arc<LocateService>,
}

impl CommandRunner {
    pub fn new(service: Arc<LocateService>) -> Self {
        Self { service }
    }

    pub async fn run(&self, mode: &Mode) -> Result<String, LocateError> {
        tracing::debug!("running {:?}", mode);

        match mode {
            Mode::Report(query) => {
                let record = self.service.resolve(query).await?;
                Ok(render_report(&record))
            }
            Mode::Json(query) => {
                let record = self.service.resolve(query).await?;
                render_json(&record)
            }
            Mode::Distance(from, to) => {
                let distance = self.service.find_distance(from, to).await?;
                Ok(distance.to_string())
            }
        }
    }
}

/// Eight labeled lines; absent or empty fields become [`MISSING_FIELD`].
pub fn render_report(record: &LocationRecord) -> String {
    let field = |value: &Option<String>| match value.as_deref() {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => MISSING_FIELD.to_string(),
    };

    let lines = [
        ("IP", record.ip.clone()),
        ("Hostname", field(&record.hostname)),
        ("City", field(&record.city)),
        ("Region", field(&record.region)),
        ("Postal", field(&record.postal)),
        ("Country", field(&record.country)),
        ("Coordinates", field(&record.loc)),
        ("ISP", field(&record.org)),
    ];

    lines
        .iter()
        .map(|(label, value)| format!("{}: {}", label, value))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pretty JSON with 4-space indentation.
pub fn render_json(record: &LocationRecord) -> Result<String, LocateError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    record.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// One-line error report.
pub fn render_error(err: &LocateError) -> String {
    format!("Error: {}", err)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::domain::ports::{GeoLocator, HostResolver};
    use async_trait::async_trait;
    use clap::CommandFactory;
    use serde_json::json;
    use std::collections::HashMap;
    use std::net::{IpAddr, Ipv4Addr};

    // ===== Mock Implementations =====

    struct StaticGeoLocator {
        records: HashMap<Option<IpAddr>, LocationRecord>,
    }

    #[async_trait]
    impl GeoLocator for StaticGeoLocator {
        async fn locate(&self, ip: Option<IpAddr>) -> Result<LocationRecord, LocateError> {
            self.records
                .get(&ip)
                .cloned()
                .ok_or_else(|| LocateError::network("mock", "unreachable"))
        }
    }

    struct NoDns;

    #[async_trait]
    impl HostResolver for NoDns {
        async fn lookup(&self, host: &str) -> Result<IpAddr, LocateError> {
            Err(LocateError::lookup(host, "NXDOMAIN"))
        }
    }

    fn google_record() -> LocationRecord {
        serde_json::from_value(json!({"ip": "8.8.8.8", "loc": "37.3860,-122.0838"})).unwrap()
    }

    fn runner(records: Vec<(Option<IpAddr>, LocationRecord)>) -> CommandRunner {
        let geo = StaticGeoLocator {
            records: records.into_iter().collect(),
        };
        CommandRunner::new(Arc::new(LocateService::new(Arc::new(geo), Arc::new(NoDns))))
    }

    fn google_ip() -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8))
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    // ===== Argument Parsing Tests =====

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_args_is_report_for_own_ip() {
        assert_eq!(parse(&["ip-locate"]).mode(), Mode::Report(LocationQuery::Own));
    }

    #[test]
    fn test_location_arg_is_report() {
        assert_eq!(
            parse(&["ip-locate", "8.8.8.8"]).mode(),
            Mode::Report(LocationQuery::Address(google_ip()))
        );
        assert_eq!(
            parse(&["ip-locate", "google.com"]).mode(),
            Mode::Report(LocationQuery::Host("google.com".to_string()))
        );
    }

    #[test]
    fn test_json_flag() {
        assert_eq!(parse(&["ip-locate", "-j"]).mode(), Mode::Json(LocationQuery::Own));
        assert_eq!(
            parse(&["ip-locate", "--json", "8.8.8.8"]).mode(),
            Mode::Json(LocationQuery::Address(google_ip()))
        );
        assert_eq!(
            parse(&["ip-locate", "8.8.8.8", "-j"]).mode(),
            Mode::Json(LocationQuery::Address(google_ip()))
        );
    }

    #[test]
    fn test_distance_with_two_locations() {
        assert_eq!(
            parse(&["ip-locate", "distance", "triage.net", "google.com"]).mode(),
            Mode::Distance(
                LocationQuery::Host("triage.net".to_string()),
                LocationQuery::Host("google.com".to_string())
            )
        );
    }

    #[test]
    fn test_distance_second_location_defaults_to_own() {
        assert_eq!(
            parse(&["ip-locate", "distance", "8.8.8.8"]).mode(),
            Mode::Distance(LocationQuery::Address(google_ip()), LocationQuery::Own)
        );
    }

    #[test]
    fn test_json_flag_ignored_by_distance() {
        let expected = Mode::Distance(LocationQuery::Address(google_ip()), LocationQuery::Own);
        assert_eq!(parse(&["ip-locate", "-j", "distance", "8.8.8.8"]).mode(), expected);
        assert_eq!(parse(&["ip-locate", "distance", "8.8.8.8", "--json"]).mode(), expected);
    }

    #[test]
    fn test_distance_requires_first_location() {
        assert!(Cli::try_parse_from(["ip-locate", "distance"]).is_err());
    }

    #[test]
    fn test_too_many_locations_rejected() {
        assert!(Cli::try_parse_from(["ip-locate", "8.8.8.8", "1.1.1.1"]).is_err());
    }

    #[test]
    fn test_help_mentions_examples() {
        let help = Cli::command().render_long_help().to_string();
        assert!(help.contains("distance"));
        assert!(help.contains("--json"));
        assert!(help.contains("Examples:"));
    }

    // ===== Rendering Tests =====

    #[test]
    fn test_render_report_substitutes_missing_fields() {
        let report = render_report(&google_record());
        assert_eq!(
            report,
            "IP: 8.8.8.8\n\
             Hostname: -\n\
             City: -\n\
             Region: -\n\
             Postal: -\n\
             Country: -\n\
             Coordinates: 37.3860,-122.0838\n\
             ISP: -"
        );
    }

    #[test]
    fn test_render_report_full_record() {
        let record: LocationRecord = serde_json::from_value(json!({
            "ip": "8.8.8.8",
            "hostname": "dns.google",
            "city": "Mountain View",
            "region": "California",
            "postal": "94043",
            "country": "US",
            "loc": "37.3860,-122.0838",
            "org": "AS15169 Google LLC"
        }))
        .unwrap();

        let report = render_report(&record);
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[1], "Hostname: dns.google");
        assert_eq!(lines[4], "Postal: 94043");
        assert_eq!(lines[7], "ISP: AS15169 Google LLC");
    }

    #[test]
    fn test_render_report_empty_string_is_missing() {
        let mut record = google_record();
        record.city = Some(String::new());
        assert!(render_report(&record).contains("City: -"));
    }

    #[test]
    fn test_render_json_four_space_indent() {
        let output = render_json(&google_record()).unwrap();
        assert_eq!(
            output,
            "{\n    \"ip\": \"8.8.8.8\",\n    \"loc\": \"37.3860,-122.0838\"\n}"
        );
    }

    #[test]
    fn test_render_json_roundtrip() {
        let input = json!({
            "ip": "1.1.1.1",
            "hostname": "one.one.one.one",
            "city": "Brisbane",
            "loc": "-27.4816,153.0175",
            "anycast": true,
            "timezone": "Australia/Brisbane"
        });
        let record: LocationRecord = serde_json::from_value(input.clone()).unwrap();
        let output = render_json(&record).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, input);
    }

    #[test]
    fn test_render_error() {
        let err = LocateError::lookup("nope.invalid", "NXDOMAIN");
        assert_eq!(
            render_error(&err),
            "Error: could not resolve host nope.invalid: NXDOMAIN"
        );
    }

    // ===== CommandRunner Tests =====

    #[tokio::test]
    async fn test_run_report() {
        let runner = runner(vec![(Some(google_ip()), google_record())]);
        let output = runner
            .run(&Mode::Report(LocationQuery::Address(google_ip())))
            .await
            .unwrap();
        assert!(output.starts_with("IP: 8.8.8.8\n"));
        assert!(output.contains("Coordinates: 37.3860,-122.0838"));
    }

    #[tokio::test]
    async fn test_run_json() {
        let runner = runner(vec![(None, google_record())]);
        let output = runner.run(&Mode::Json(LocationQuery::Own)).await.unwrap();
        let parsed: LocationRecord = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, google_record());
    }

    #[tokio::test]
    async fn test_run_distance() {
        let mut paris = LocationRecord::new("203.0.113.7");
        paris.loc = Some("48.8534,2.3488".to_string());
        let runner = runner(vec![(Some(google_ip()), google_record()), (None, paris)]);

        let output = runner
            .run(&Mode::Distance(
                LocationQuery::Address(google_ip()),
                LocationQuery::Own,
            ))
            .await
            .unwrap();

        assert!(output.ends_with(" km"));
        let km: f64 = output.trim_end_matches(" km").parse().unwrap();
        assert!(km > 8900.0 && km < 9000.0, "got {}", km);
        assert_eq!(output.split('.').nth(1).map(|s| s.len()), Some(5));
    }

    #[tokio::test]
    async fn test_run_reports_errors_in_every_mode() {
        let runner = runner(vec![]);
        let host = LocationQuery::Host("nope.invalid".to_string());

        for mode in [
            Mode::Report(host.clone()),
            Mode::Json(host.clone()),
            Mode::Distance(host.clone(), LocationQuery::Own),
        ] {
            let err = runner.run(&mode).await.unwrap_err();
            assert!(matches!(err, LocateError::Lookup { .. }), "mode {:?}", mode);
        }
    }
}
