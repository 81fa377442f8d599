use std::io::Write;

use parking_lot::Mutex;

use crate::metrics::snapshot::LruMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for cache metrics snapshots.
///
/// Writes the text exposition format, so output can be served from a scrape
/// endpoint or appended to a file picked up by a collector. Write failures are
/// logged and otherwise ignored; metrics never affect cache behavior.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the exporter and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn write_metric(&self, kind: &str, suffix: &str, value: u64) {
        let name = self.metric_name(suffix);
        let mut writer = self.writer.lock();
        let result = writeln!(writer, "# TYPE {name} {kind}")
            .and_then(|()| writeln!(writer, "{name} {value}"));
        if let Err(err) = result {
            tracing::warn!(metric = %name, error = %err, "metrics export write failed");
        }
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send> MetricsExporter<LruMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &LruMetricsSnapshot) {
        let counters = [
            ("get_calls_total", snapshot.get_calls),
            ("get_hits_total", snapshot.get_hits),
            ("get_misses_total", snapshot.get_misses),
            ("insert_calls_total", snapshot.insert_calls),
            ("insert_updates_total", snapshot.insert_updates),
            ("insert_new_total", snapshot.insert_new),
            ("evicted_entries_total", snapshot.evicted_entries),
            ("remove_calls_total", snapshot.remove_calls),
            ("remove_found_total", snapshot.remove_found),
            ("pop_lru_calls_total", snapshot.pop_lru_calls),
            ("pop_lru_found_total", snapshot.pop_lru_found),
            ("touch_calls_total", snapshot.touch_calls),
            ("touch_found_total", snapshot.touch_found),
            ("clears_total", snapshot.clears),
        ];
        for (suffix, value) in counters {
            self.write_metric("counter", suffix, value);
        }
        self.write_metric("gauge", "cache_len", snapshot.cache_len as u64);
        self.write_metric("gauge", "capacity", snapshot.capacity as u64);
    }
}
