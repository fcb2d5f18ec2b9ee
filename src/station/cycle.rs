use super::config::StationConfig;
use super::payload::{FailureReport, SampleRecord};
use super::ports::{Clock, DocumentStore, Indicator, Network, SensorReader, Signal};
use super::{Result, StationError};

/// Drives one wake cycle at a time. Sleeping between cycles is left to the
/// caller, see [`StationConfig::sleep_duration`].
pub struct Station<S, N, C, U, L> {
    sensor: S,
    network: N,
    clock: C,
    store: U,
    indicator: L,
    config: StationConfig,
}

impl<S, N, C, U, L> Station<S, N, C, U, L>
where
    S: SensorReader,
    N: Network,
    C: Clock,
    U: DocumentStore,
    L: Indicator,
{
    pub fn new(
        sensor: S,
        network: N,
        clock: C,
        store: U,
        indicator: L,
        config: StationConfig,
    ) -> Self {
        Self {
            sensor,
            network,
            clock,
            store,
            indicator,
            config,
        }
    }

    pub fn config(&self) -> &StationConfig {
        &self.config
    }

    /// Runs one cycle and returns the uploaded record.
    ///
    /// Failures are shown on the indicator and, when the network is up,
    /// reported to the store. Nothing is retried.
    pub fn run_cycle(&mut self) -> Result<SampleRecord> {
        self.indicator.show(Signal::Pending);

        let result = self.sample_and_upload();
        match &result {
            Ok(record) => {
                log::info!("Record for {} uploaded", record.dt);
                self.indicator.show(Signal::Success);
            }
            Err(err) => {
                log::warn!("Cycle failed: {}", err);
                self.indicator.show(Signal::Failure);
                self.report_failure(err);
            }
        }

        self.indicator.show(Signal::Off);
        result
    }

    fn sample_and_upload(&mut self) -> Result<SampleRecord> {
        self.join_network()?;

        let timestamp = self.clock.timestamp().map_err(StationError::Clock)?;
        let reading = self.sensor.measure()?;
        let record = SampleRecord::new(&reading, timestamp, &self.config);

        let body = serde_json::to_vec(&record)?;
        let status = self
            .store
            .post(&self.config.store, &body)
            .map_err(StationError::Upload)?;
        match status {
            200 | 201 => Ok(record),
            status => Err(StationError::Rejected { status }),
        }
    }

    fn join_network(&mut self) -> Result<()> {
        if self.network.is_connected() {
            return Ok(());
        }

        let timeout = self.config.connect_timeout();
        for credentials in &self.config.networks {
            if self.network.connect(credentials, timeout) {
                log::info!("Joined {}", credentials.ssid);
                return Ok(());
            }
            log::warn!("Could not join {} within {:?}", credentials.ssid, timeout);
        }

        Err(StationError::NoNetwork(self.config.networks.len()))
    }

    fn report_failure(&mut self, err: &StationError) {
        if !self.network.is_connected() {
            return;
        }

        let report = FailureReport {
            exc: err.to_string(),
        };
        let outcome = serde_json::to_vec(&report)
            .map_err(StationError::from)
            .and_then(|body| {
                self.store
                    .post(&self.config.store, &body)
                    .map_err(StationError::Upload)
            });
        match outcome {
            Ok(status) => log::info!("Failure report posted with status {}", status),
            Err(err) => log::warn!("Failure report not posted: {}", err),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::{BusFault, SHTError};
    use crate::reading::{FixedPoint, Reading};
    use crate::station::{Credentials, PortError, StoreConfig};
    use crate::SHT30;
    use embedded_hal_mock::delay::MockNoop;
    use embedded_hal_mock::i2c::{Mock as I2cMock, Transaction};
    use rstest::rstest;
    use serde_json::Value;
    use std::collections::VecDeque;
    use std::time::Duration;

    struct FakeSensor(VecDeque<crate::error::Result<Reading>>);

    impl SensorReader for FakeSensor {
        fn measure(&mut self) -> crate::error::Result<Reading> {
            self.0.pop_front().unwrap_or(Err(SHTError::NoReadingYet))
        }
    }

    #[derive(Default)]
    struct FakeNetwork {
        connected: bool,
        reachable: Vec<String>,
        attempts: Vec<(String, Duration)>,
    }

    impl Network for FakeNetwork {
        fn is_connected(&mut self) -> bool {
            self.connected
        }

        fn connect(&mut self, credentials: &Credentials, timeout: Duration) -> bool {
            self.attempts.push((credentials.ssid.clone(), timeout));
            self.connected = self.reachable.contains(&credentials.ssid);
            self.connected
        }
    }

    struct FakeClock(Option<String>);

    impl Clock for FakeClock {
        fn timestamp(&mut self) -> core::result::Result<String, PortError> {
            self.0.clone().ok_or_else(|| PortError::new("time service down"))
        }
    }

    struct FakeStore {
        status: core::result::Result<u16, PortError>,
        bodies: Vec<Value>,
        urls: Vec<String>,
    }

    impl DocumentStore for FakeStore {
        fn post(
            &mut self,
            store: &StoreConfig,
            body: &[u8],
        ) -> core::result::Result<u16, PortError> {
            self.urls.push(store.database_url());
            self.bodies.push(serde_json::from_slice(body).unwrap());
            self.status.clone()
        }
    }

    #[derive(Default)]
    struct FakeIndicator(Vec<Signal>);

    impl Indicator for FakeIndicator {
        fn show(&mut self, signal: Signal) {
            self.0.push(signal);
        }
    }

    type FakeStation<S = FakeSensor> = Station<S, FakeNetwork, FakeClock, FakeStore, FakeIndicator>;

    fn reading() -> Reading {
        Reading {
            temperature: FixedPoint::new(24, 5),
            humidity: FixedPoint::new(34, 66),
        }
    }

    fn config() -> StationConfig {
        StationConfig {
            networks: vec![
                Credentials::new("upstairs", "a"),
                Credentials::new("downstairs", "b"),
            ],
            store: StoreConfig {
                url: "http://192.168.1.101:5984".to_string(),
                ..StoreConfig::default()
            },
            ..StationConfig::default()
        }
    }

    fn station_with<S: SensorReader>(sensor: S, status: u16) -> FakeStation<S> {
        Station::new(
            sensor,
            FakeNetwork {
                reachable: vec!["downstairs".to_string()],
                ..FakeNetwork::default()
            },
            FakeClock(Some("2022-11-11T17:33:50".to_string())),
            FakeStore {
                status: Ok(status),
                bodies: Vec::new(),
                urls: Vec::new(),
            },
            FakeIndicator::default(),
            config(),
        )
    }

    fn station(status: u16) -> FakeStation {
        station_with(FakeSensor(VecDeque::from([Ok(reading())])), status)
    }

    #[test]
    fn successful_cycle() {
        let mut station = station(201);
        let record = station.run_cycle().unwrap();

        assert_eq!(record.dt, "2022-11-11T17:33:50");
        assert_eq!(record.loc, "sauna");
        assert_eq!(
            station.network.attempts,
            vec![
                ("upstairs".to_string(), Duration::from_secs(10)),
                ("downstairs".to_string(), Duration::from_secs(10)),
            ]
        );
        assert_eq!(station.store.bodies.len(), 1);
        assert_eq!(
            station.store.urls,
            vec!["http://192.168.1.101:5984/home-sensors".to_string()]
        );
        assert!((station.store.bodies[0]["humRel"].as_f64().unwrap() - 34.66).abs() < 0.001);
        assert_eq!(
            station.indicator.0,
            vec![Signal::Pending, Signal::Success, Signal::Off]
        );
    }

    #[test]
    fn already_connected_skips_joining() {
        let mut station = station(200);
        station.network.connected = true;
        station.run_cycle().unwrap();
        assert!(station.network.attempts.is_empty());
    }

    #[test]
    fn no_reachable_network() {
        let mut station = station(201);
        station.network.reachable.clear();

        assert!(matches!(station.run_cycle(), Err(StationError::NoNetwork(2))));
        // Offline, so no failure report either
        assert!(station.store.bodies.is_empty());
        assert_eq!(
            station.indicator.0,
            vec![Signal::Pending, Signal::Failure, Signal::Off]
        );
    }

    #[rstest]
    #[case(500)]
    #[case(401)]
    #[case(409)]
    fn rejected_upload_is_reported(#[case] status: u16) {
        let mut station = station(status);

        let err = station.run_cycle().unwrap_err();
        assert!(matches!(err, StationError::Rejected { status: s } if s == status));
        assert_eq!(station.store.bodies.len(), 2);
        assert_eq!(
            station.store.bodies[1]["exc"],
            format!("Document store answered with status {}", status)
        );
    }

    #[test]
    fn sensor_failure_is_reported() {
        let sensor = FakeSensor(VecDeque::from([Err(SHTError::BusFault(BusFault::StuckLine))]));
        let mut station = station_with(sensor, 201);

        let err = station.run_cycle().unwrap_err();
        assert!(matches!(
            err,
            StationError::Sensor(SHTError::BusFault(BusFault::StuckLine))
        ));
        assert_eq!(station.store.bodies.len(), 1);
        assert_eq!(
            station.store.bodies[0]["exc"],
            "Sensor error: I2C bus fault: Response was all zeroes"
        );
    }

    #[test]
    fn clock_failure() {
        let mut station = station(201);
        station.clock.0 = None;

        let err = station.run_cycle().unwrap_err();
        assert!(matches!(err, StationError::Clock(_)));
        assert_eq!(err.to_string(), "Clock unavailable: time service down");
    }

    #[test]
    fn store_unreachable() {
        let mut station = station(201);
        station.store.status = Err(PortError::new("connection refused"));

        assert!(matches!(station.run_cycle(), Err(StationError::Upload(_))));
        // The report is attempted as well and fails the same way
        assert_eq!(station.store.bodies.len(), 2);
    }

    #[test]
    fn drives_a_real_sensor() {
        let i2c = I2cMock::new(&[
            Transaction::write(0x44, vec![0x2C, 0x10]),
            Transaction::read(0x44, vec![0x65, 0x03, 0xF0, 0x58, 0xBB, 0x04]),
        ]);
        let sensor = SHT30::new(i2c, MockNoop::new());
        let mut station = station_with(sensor, 201);

        let record = station.run_cycle().unwrap();
        assert!((record.temp_f - 75.29).abs() < 0.001);
        assert_eq!(station.sensor.last_reading(), Ok(reading()));

        let (mut i2c, _) = station.sensor.destroy();
        i2c.done();
    }
}
