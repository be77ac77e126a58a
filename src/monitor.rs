// src/monitor.rs
//! Feeds a line stream of sentences into a shared fix

use crate::{
    config::ParserConfig,
    error::{GpsError, Result},
    gps::{data::FixState, nmea::NmeaParser},
};
use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc, RwLock,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::Notify;
use tracing::{info, warn};

/// Sentence counts from one monitor run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonitorStats {
    pub accepted: u64,
    pub rejected: u64,
}

/// Reads sentences line by line and merges each into one shared [`FixState`].
pub struct FixMonitor {
    parser: Arc<NmeaParser>,
    config: Arc<ParserConfig>,
    data: Arc<RwLock<FixState>>,
    running: Arc<AtomicBool>,
    stop_signal: Arc<Notify>,
    accepted: Arc<AtomicU64>,
    rejected: Arc<AtomicU64>,
}

impl FixMonitor {
    pub fn new(config: ParserConfig) -> Self {
        Self::with_parser(NmeaParser::new(), config)
    }

    /// Monitor using `parser`, e.g. one with custom decoders registered.
    pub fn with_parser(parser: NmeaParser, config: ParserConfig) -> Self {
        let data = Arc::new(RwLock::new(config.new_state()));
        Self {
            parser: Arc::new(parser),
            config: Arc::new(config),
            data,
            running: Arc::new(AtomicBool::new(true)),
            stop_signal: Arc::new(Notify::new()),
            accepted: Arc::new(AtomicU64::new(0)),
            rejected: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Shared handle to the fix being updated
    pub fn data(&self) -> Arc<RwLock<FixState>> {
        Arc::clone(&self.data)
    }

    /// Read lines until EOF or [`stop`](Self::stop), decoding each into the shared fix.
    ///
    /// A stop interrupts a pending read, so an idle stream does not hold the run open.
    pub async fn run<R>(&self, mut reader: R) -> Result<MonitorStats>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut line = String::new();

        while self.running.load(Ordering::Relaxed) {
            line.clear();
            let read = tokio::select! {
                read = reader.read_line(&mut line) => read,
                _ = self.stop_signal.notified() => break,
            };
            match read {
                Ok(0) => break, // EOF
                Ok(_) => {
                    let sentence = line.trim();
                    if sentence.is_empty() {
                        continue;
                    }
                    let ok = {
                        let mut data = self.write_guard()?;
                        self.parser.parse(&mut data, sentence, self.config.ignore_checksum)
                    };
                    let counter = if ok { &self.accepted } else { &self.rejected };
                    counter.fetch_add(1, Ordering::Relaxed);
                }
                Err(e) => {
                    warn!("Error reading sentence stream: {}", e);
                    return Err(GpsError::Io(e));
                }
            }
        }

        self.config.finish(&mut *self.write_guard()?);

        let stats = self.stats();
        info!(
            "Stream finished: {} accepted, {} rejected",
            stats.accepted, stats.rejected
        );
        Ok(stats)
    }

    fn write_guard(&self) -> Result<std::sync::RwLockWriteGuard<'_, FixState>> {
        self.data
            .write()
            .map_err(|_| GpsError::Other("fix state lock poisoned".to_string()))
    }

    /// Stop the monitor, abandoning any line still being read
    pub fn stop(&self) {
        self.running.store(false, Ordering::Relaxed);
        // stores a permit if no read is pending yet
        self.stop_signal.notify_one();
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    pub fn stats(&self) -> MonitorStats {
        MonitorStats {
            accepted: self.accepted.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
        }
    }

    /// A copy of the current fix
    pub fn get_data(&self) -> Result<FixState> {
        self.data
            .read()
            .map(|data| data.clone())
            .map_err(|_| GpsError::Other("fix state lock poisoned".to_string()))
    }
}

impl Clone for FixMonitor {
    /// Shares the parser, data, stop flag and counters
    fn clone(&self) -> Self {
        Self {
            parser: Arc::clone(&self.parser),
            config: Arc::clone(&self.config),
            data: Arc::clone(&self.data),
            running: Arc::clone(&self.running),
            stop_signal: Arc::clone(&self.stop_signal),
            accepted: Arc::clone(&self.accepted),
            rejected: Arc::clone(&self.rejected),
        }
    }
}

impl Default for FixMonitor {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gps::data::SentenceType;
    use std::time::Duration;
    use tokio::io::{AsyncWriteExt, BufReader};

    const STREAM: &str = "\
$GPGGA,125653.00,3845.165,N,14228.961,W,1,05,,102.1331,M,,M,,*75\r\n\
$GPVTG,229.86,T,,M,0.00,N,0.0046,K*55\r\n\
\r\n\
$GPZDA,125653.00,13,09,2007,00,00*00\r\n\
$GPZDA,125653.00,13,09,2007,00,00*6E\r\n\
garbage\r\n";

    #[tokio::test]
    async fn test_stream_merges_and_counts() {
        let monitor = FixMonitor::default();
        let stats = monitor.run(BufReader::new(STREAM.as_bytes())).await.unwrap();

        assert_eq!(stats, MonitorStats { accepted: 3, rejected: 2 });
        let data = monitor.get_data().unwrap();
        assert!(data.has_type(SentenceType::Gpgga));
        assert!(data.has_type(SentenceType::Gpvtg));
        assert!(data.has_type(SentenceType::Gpzda));
        assert_eq!(data.fixtime(), Some(1_189_688_213));
        assert_eq!(data.heading(), Some(229.86));
    }

    #[tokio::test]
    async fn test_ignore_checksum_from_config() {
        let config = ParserConfig {
            ignore_checksum: true,
            ..ParserConfig::default()
        };
        let monitor = FixMonitor::new(config);
        let stats = monitor
            .run(BufReader::new("$GPVTG,229.86,T,,M,0.00,N,0.0046,K*00\n".as_bytes()))
            .await
            .unwrap();
        assert_eq!(stats.accepted, 1);
    }

    #[tokio::test]
    async fn test_stop_interrupts_idle_stream() {
        let monitor = FixMonitor::default();
        let (reader, mut writer) = tokio::io::duplex(256);
        writer.write_all(b"$GTUID,unit-7\n").await.unwrap();

        let runner = monitor.clone();
        let task = tokio::spawn(async move { runner.run(BufReader::new(reader)).await });

        // writer stays open, so the reader would wait forever without a stop
        tokio::time::sleep(Duration::from_millis(50)).await;
        monitor.stop();

        let stats = tokio::time::timeout(Duration::from_secs(2), task)
            .await
            .expect("run should return after stop")
            .unwrap()
            .unwrap();
        assert_eq!(stats, MonitorStats { accepted: 1, rejected: 0 });
        assert_eq!(monitor.get_data().unwrap().mobile_id(), Some("unit-7"));
        drop(writer);
    }

    #[tokio::test]
    async fn test_stopped_monitor_reads_nothing() {
        let monitor = FixMonitor::default();
        let handle = monitor.clone();
        handle.stop();
        assert!(!monitor.is_running());

        let stats = monitor.run(BufReader::new(STREAM.as_bytes())).await.unwrap();
        assert_eq!(stats, MonitorStats::default());
        assert!(!monitor.get_data().unwrap().has_parsed_types());
    }
}
