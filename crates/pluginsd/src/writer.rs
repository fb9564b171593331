//! High-performance chart writer with minimal allocations.

use super::metadata::{ChartMetadata, DimensionMetadata};
use bytes::{BufMut, BytesMut};
use std::io::{self, Write};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Buffered writer for the Netdata chart protocol.
///
/// Uses a reusable buffer to minimize allocations. The buffer is reused
/// across multiple chart updates, only growing when necessary.
///
/// Chart ids are taken explicitly because the protocol expects the wire form
/// (`type.id`), which callers usually derive by namespacing a module-local
/// chart id.
pub struct ChartWriter {
    buffer: BytesMut,
}

impl ChartWriter {
    /// Create a new chart writer with default capacity (4KB)
    pub fn new() -> Self {
        Self::with_capacity(4096)
    }

    /// Create a new chart writer with specified capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(capacity),
        }
    }

    /// Write a chart definition (CHART + DIMENSION commands).
    ///
    /// Dimensions are declared in their stored order.
    pub fn write_chart_definition(&mut self, chart_id: &str, chart: &ChartMetadata) {
        // CHART command
        self.buffer.put_slice(b"CHART ");
        self.buffer.put_slice(chart_id.as_bytes());
        self.buffer.put_slice(b" '");
        self.buffer.put_slice(chart.name.as_bytes());
        self.buffer.put_slice(b"' '");
        self.buffer.put_slice(chart.title.as_bytes());
        self.buffer.put_slice(b"' '");
        self.buffer.put_slice(chart.units.as_bytes());
        self.buffer.put_slice(b"' '");
        self.buffer.put_slice(chart.family.as_bytes());
        self.buffer.put_slice(b"' '");
        self.buffer.put_slice(chart.context.as_bytes());
        self.buffer.put_slice(b"' ");
        self.buffer.put_slice(chart.chart_type.as_bytes());
        self.buffer.put_slice(b" ");
        self.write_i64(chart.priority);
        self.buffer.put_slice(b" ");
        self.write_u64(chart.update_every);

        if chart.hidden {
            self.buffer.put_slice(b" 'hidden'");
        }

        self.buffer.put_u8(b'\n');

        // DIMENSION commands
        for dim in &chart.dimensions {
            self.write_dimension_definition(dim);
        }
    }

    /// Write a dimension definition (DIMENSION command)
    fn write_dimension_definition(&mut self, dim: &DimensionMetadata) {
        self.buffer.put_slice(b"DIMENSION ");
        self.buffer.put_slice(dim.id.as_bytes());
        self.buffer.put_slice(b" '");
        self.buffer.put_slice(dim.name.as_bytes());
        self.buffer.put_slice(b"' ");
        self.buffer.put_slice(dim.algorithm.as_str().as_bytes());
        self.buffer.put_slice(b" ");
        self.write_i64(dim.multiplier);
        self.buffer.put_slice(b" ");
        self.write_i64(dim.divisor);

        if dim.hidden {
            self.buffer.put_slice(b" hidden");
        }

        self.buffer.put_u8(b'\n');
    }

    /// Begin a chart update (BEGIN command)
    ///
    /// The `elapsed` duration is the time since this chart's previous
    /// update, zero on the first. This helps Netdata perform accurate
    /// interpolation.
    pub fn begin_chart(&mut self, chart_id: &str, elapsed: Duration) {
        self.buffer.put_slice(b"BEGIN ");
        self.buffer.put_slice(chart_id.as_bytes());
        self.buffer.put_u8(b' ');
        // Netdata expects microseconds
        self.write_u64(elapsed.as_micros() as u64);
        self.buffer.put_u8(b'\n');
    }

    /// Write a dimension value (SET command)
    pub fn write_dimension(&mut self, dimension_id: &str, value: i64) {
        self.buffer.put_slice(b"SET ");
        self.buffer.put_slice(dimension_id.as_bytes());
        self.buffer.put_slice(b" = ");
        self.write_i64(value);
        self.buffer.put_u8(b'\n');
    }

    /// End a chart update (END command)
    ///
    /// The `collection_time` specifies when the data was collected.
    /// This allows Netdata to accurately align data points and perform proper interpolation.
    pub fn end_chart(&mut self, collection_time: SystemTime) {
        self.buffer.put_slice(b"END ");
        // Netdata expects Unix timestamp in seconds
        let secs = collection_time
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_secs();
        self.write_u64(secs);
        self.buffer.put_u8(b'\n');
    }

    /// Write an i64 value using itoa (zero-allocation integer formatting)
    #[inline]
    fn write_i64(&mut self, value: i64) {
        let mut buf = itoa::Buffer::new();
        let s = buf.format(value);
        self.buffer.put_slice(s.as_bytes());
    }

    /// Write a u64 value using itoa (zero-allocation integer formatting)
    #[inline]
    fn write_u64(&mut self, value: u64) {
        let mut buf = itoa::Buffer::new();
        let s = buf.format(value);
        self.buffer.put_slice(s.as_bytes());
    }

    /// Flush the buffer to stdout
    pub fn flush(&mut self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(&self.buffer)?;
        handle.flush()?;
        self.buffer.clear();
        Ok(())
    }

    /// Get a reference to the buffer (for testing)
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Clear the buffer without flushing
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl Default for ChartWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChartMetadata, DimensionMetadata};

    fn chart_with_dimensions(id: &str, dims: &[&str]) -> ChartMetadata {
        let mut chart = ChartMetadata::new(id);
        chart.title = "Test Chart".to_string();
        chart.units = "widgets".to_string();
        chart.family = "tests".to_string();
        for dim in dims {
            chart.dimensions.push(DimensionMetadata::new(*dim));
        }
        chart
    }

    #[test]
    fn chart_definition_format() {
        let mut writer = ChartWriter::new();
        let chart = chart_with_dimensions("test.chart", &["value1"]);

        writer.write_chart_definition("test.chart", &chart);

        let output = String::from_utf8_lossy(writer.buffer());
        assert_eq!(
            output,
            "CHART test.chart '' 'Test Chart' 'widgets' 'tests' 'test.chart' line 1000 1\n\
             DIMENSION value1 'value1' absolute 1 1\n"
        );
    }

    #[test]
    fn hidden_chart_definition_carries_the_option() {
        let mut writer = ChartWriter::new();
        let mut chart = chart_with_dimensions("test.chart", &["value1"]);
        chart.hidden = true;

        writer.write_chart_definition("test.chart", &chart);

        let output = String::from_utf8_lossy(writer.buffer());
        let chart_line = output.lines().next().unwrap();
        assert!(chart_line.ends_with("line 1000 1 'hidden'"));
    }

    #[test]
    fn hidden_dimension_definition_carries_the_flag() {
        let mut writer = ChartWriter::new();
        let mut chart = chart_with_dimensions("test.chart", &["value1"]);
        chart.dimensions[0].hidden = true;

        writer.write_chart_definition("test.chart", &chart);

        let output = String::from_utf8_lossy(writer.buffer());
        assert!(output.contains("DIMENSION value1 'value1' absolute 1 1 hidden\n"));
    }

    #[test]
    fn dimensions_are_declared_in_order() {
        let mut writer = ChartWriter::new();
        let chart = chart_with_dimensions("test.chart", &["b", "a", "c"]);

        writer.write_chart_definition("test.chart", &chart);

        let output = String::from_utf8_lossy(writer.buffer());
        let declared: Vec<&str> = output
            .lines()
            .skip(1)
            .map(|line| line.split_whitespace().nth(1).unwrap())
            .collect();
        assert_eq!(declared, ["b", "a", "c"]);
    }

    #[test]
    fn chart_update_format() {
        let mut writer = ChartWriter::new();

        writer.begin_chart("test.chart", Duration::from_secs(1));
        writer.write_dimension("value1", 42);
        writer.write_dimension("value2", -13);
        writer.end_chart(UNIX_EPOCH + Duration::from_secs(1609459200)); // 2021-01-01 00:00:00 UTC

        let output = String::from_utf8_lossy(writer.buffer());
        assert_eq!(
            output,
            "BEGIN test.chart 1000000\nSET value1 = 42\nSET value2 = -13\nEND 1609459200\n"
        );
    }

    #[test]
    fn first_update_begins_with_zero_elapsed() {
        let mut writer = ChartWriter::new();

        writer.begin_chart("test.chart", Duration::ZERO);

        assert_eq!(
            String::from_utf8_lossy(writer.buffer()),
            "BEGIN test.chart 0\n"
        );
    }

    #[test]
    fn buffer_is_reused_across_updates() {
        let mut writer = ChartWriter::new();

        // First update
        writer.begin_chart("test.chart", Duration::from_secs(1));
        writer.write_dimension("value", 1);
        writer.end_chart(UNIX_EPOCH + Duration::from_secs(1609459200));
        let len1 = writer.buffer().len();
        writer.clear();

        // Second update - buffer should be reused
        writer.begin_chart("test.chart", Duration::from_secs(1));
        writer.write_dimension("value", 2);
        writer.end_chart(UNIX_EPOCH + Duration::from_secs(1609459201));
        let len2 = writer.buffer().len();

        assert_eq!(len1, len2);
    }
}
