//! Shared sample ring buffer
//!
//! Fixed-capacity circular store of sensor readings shared between the
//! acquisition task (single producer) and the display refresh task
//! (reader). Writing never fails: once the cursor reaches the end it wraps
//! to slot 0 and the oldest sample is overwritten.
//!
//! No lock protects the buffer. Each slot is one atomic word holding a
//! packed [`SensorSample`], and the write cursor is published with release
//! ordering after the slot store. A reader may observe the previous sample
//! in a slot that is being rewritten; it never observes a torn sample.
//!
//! The single-producer rule is enforced by ownership: [`SampleBuffer::split`]
//! needs `&mut` access and hands out exactly one [`SampleWriter`], which is
//! neither `Clone` nor `Copy`.
//!
//! No count of written slots is kept. Slots that were never written read as
//! [`SensorSample::ZERO`] and cannot be told apart from a genuine 0 °C / 0 %
//! reading.

use portable_atomic::{AtomicU32, AtomicUsize, Ordering};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One temperature/humidity reading, truncated to whole units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorSample {
    /// Temperature in whole degrees Celsius
    pub temperature_c: i16,
    /// Relative humidity in whole percent
    pub humidity_pct: u8,
}

impl SensorSample {
    /// Value of a slot that has never been written
    pub const ZERO: Self = Self {
        temperature_c: 0,
        humidity_pct: 0,
    };

    /// Create a sample from integer values
    pub const fn new(temperature_c: i16, humidity_pct: u8) -> Self {
        Self {
            temperature_c,
            humidity_pct,
        }
    }

    /// Build a sample from raw sensor floats
    ///
    /// Returns `None` if either value is NaN. The fractional part of each
    /// value is dropped (truncation toward zero); values outside the
    /// integer range saturate.
    pub fn from_readings(temperature_c: f32, humidity_pct: f32) -> Option<Self> {
        if temperature_c.is_nan() || humidity_pct.is_nan() {
            return None;
        }

        Some(Self {
            temperature_c: temperature_c as i16,
            humidity_pct: humidity_pct as u8,
        })
    }

    /// Pack into one 32-bit word: temperature in the high half, humidity low
    const fn pack(self) -> u32 {
        ((self.temperature_c as u16 as u32) << 16) | self.humidity_pct as u32
    }

    const fn unpack(word: u32) -> Self {
        Self {
            temperature_c: (word >> 16) as u16 as i16,
            humidity_pct: (word & 0xFF) as u8,
        }
    }
}

/// Fixed-capacity ring of samples with a write cursor
///
/// `N` is the compile-time capacity and must be non-zero.
pub struct SampleBuffer<const N: usize> {
    slots: [AtomicU32; N],
    cursor: AtomicUsize,
}

impl<const N: usize> Default for SampleBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> SampleBuffer<N> {
    const NON_EMPTY: () = assert!(N > 0, "sample buffer capacity must be non-zero");

    /// Create an empty buffer (all slots zero, cursor at 0)
    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NON_EMPTY;

        #[allow(clippy::declare_interior_mutable_const)]
        const EMPTY: AtomicU32 = AtomicU32::new(0);

        Self {
            slots: [EMPTY; N],
            cursor: AtomicUsize::new(0),
        }
    }

    /// Split into the single producer handle and a reader handle
    ///
    /// Both handles borrow the buffer, so with a `&'static mut` buffer
    /// (e.g. from a `StaticCell`) they can be moved into separate tasks.
    pub fn split(&mut self) -> (SampleWriter<'_, N>, SampleReader<'_, N>) {
        let buffer: &Self = self;
        let cursor = buffer.cursor.load(Ordering::Relaxed);
        (SampleWriter { buffer, cursor }, SampleReader { buffer })
    }

    /// A read-only handle to the buffer
    pub fn reader(&self) -> SampleReader<'_, N> {
        SampleReader { buffer: self }
    }

    /// Buffer capacity
    pub const fn capacity(&self) -> usize {
        N
    }
}

/// The only handle allowed to mutate a [`SampleBuffer`]
pub struct SampleWriter<'a, const N: usize> {
    buffer: &'a SampleBuffer<N>,
    /// Local copy of the cursor; the writer is the only one advancing it
    cursor: usize,
}

impl<'a, const N: usize> SampleWriter<'a, N> {
    /// Store `sample` at the cursor and advance the cursor modulo `N`
    pub fn append(&mut self, sample: SensorSample) {
        self.buffer.slots[self.cursor].store(sample.pack(), Ordering::Release);

        self.cursor += 1;
        if self.cursor >= N {
            self.cursor = 0;
        }

        self.buffer.cursor.store(self.cursor, Ordering::Release);
    }

    /// Index the next append will write to
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// A reader for the same buffer
    pub fn reader(&self) -> SampleReader<'a, N> {
        SampleReader {
            buffer: self.buffer,
        }
    }
}

/// Read-only view of a [`SampleBuffer`]
///
/// Cheap to copy; any number of readers may exist.
#[derive(Clone, Copy)]
pub struct SampleReader<'a, const N: usize> {
    buffer: &'a SampleBuffer<N>,
}

impl<'a, const N: usize> SampleReader<'a, N> {
    /// Buffer capacity
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Index the next append will write to (the oldest slot once wrapped)
    pub fn cursor(&self) -> usize {
        self.buffer.cursor.load(Ordering::Acquire)
    }

    /// Read one slot by index
    ///
    /// Returns `None` only for an out-of-range index. An unwritten slot
    /// yields [`SensorSample::ZERO`].
    pub fn get(&self, index: usize) -> Option<SensorSample> {
        self.buffer
            .slots
            .get(index)
            .map(|slot| SensorSample::unpack(slot.load(Ordering::Acquire)))
    }

    /// Copy of every slot in storage order
    pub fn snapshot(&self) -> [SensorSample; N] {
        core::array::from_fn(|i| SensorSample::unpack(self.buffer.slots[i].load(Ordering::Acquire)))
    }

    /// Every slot ordered oldest to newest, starting at the cursor
    ///
    /// Always yields `N` samples since the buffer is treated as full.
    pub fn chronological(&self) -> impl Iterator<Item = SensorSample> + 'a {
        let buffer = self.buffer;
        let start = buffer.cursor.load(Ordering::Acquire);
        (0..N).map(move |i| {
            let index = (start + i) % N;
            SensorSample::unpack(buffer.slots[index].load(Ordering::Acquire))
        })
    }

    /// The most recently written slot (the one just before the cursor)
    pub fn latest(&self) -> SensorSample {
        let cursor = self.cursor();
        let index = if cursor == 0 { N - 1 } else { cursor - 1 };
        SensorSample::unpack(self.buffer.slots[index].load(Ordering::Acquire))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn temps<const N: usize>(reader: &SampleReader<'_, N>) -> [i16; N] {
        reader.snapshot().map(|s| s.temperature_c)
    }

    #[test]
    fn test_new_buffer_reads_zero() {
        let buffer: SampleBuffer<4> = SampleBuffer::new();
        let reader = buffer.reader();

        assert_eq!(reader.cursor(), 0);
        for i in 0..4 {
            assert_eq!(reader.get(i), Some(SensorSample::ZERO));
        }
        assert_eq!(reader.get(4), None);
    }

    #[test]
    fn test_append_advances_cursor() {
        let mut buffer: SampleBuffer<4> = SampleBuffer::new();
        let (mut writer, reader) = buffer.split();

        writer.append(SensorSample::new(21, 40));
        assert_eq!(writer.cursor(), 1);
        assert_eq!(reader.cursor(), 1);
        assert_eq!(reader.get(0), Some(SensorSample::new(21, 40)));
        assert_eq!(reader.latest(), SensorSample::new(21, 40));
    }

    #[test]
    fn test_wraparound_scenario() {
        // Capacity 5, temperatures 20..=25, humidity 50
        let mut buffer: SampleBuffer<5> = SampleBuffer::new();
        let (mut writer, reader) = buffer.split();

        for t in 20..=25 {
            writer.append(SensorSample::new(t, 50));
        }

        assert_eq!(temps(&reader), [25, 21, 22, 23, 24]);
        assert_eq!(reader.cursor(), 1);
        assert!(reader.snapshot().iter().all(|s| s.humidity_pct == 50));
    }

    #[test]
    fn test_overwrite_oldest_slot() {
        const N: usize = 8;
        let mut buffer: SampleBuffer<N> = SampleBuffer::new();
        let (mut writer, reader) = buffer.split();

        for v in 0..=N as i16 {
            writer.append(SensorSample::new(v * 3, 0));
        }

        let snap = reader.snapshot();
        assert_eq!(snap[0].temperature_c, N as i16 * 3);
        for (i, sample) in snap.iter().enumerate().skip(1) {
            assert_eq!(sample.temperature_c, i as i16 * 3);
        }
    }

    #[test]
    fn test_chronological_order_after_wrap() {
        let mut buffer: SampleBuffer<3> = SampleBuffer::new();
        let (mut writer, reader) = buffer.split();

        for t in 1..=4 {
            writer.append(SensorSample::new(t, 10));
        }

        let ordered: heapless::Vec<i16, 3> =
            reader.chronological().map(|s| s.temperature_c).collect();
        assert_eq!(ordered.as_slice(), &[2, 3, 4]);
        assert_eq!(reader.latest().temperature_c, 4);
    }

    #[test]
    fn test_chronological_before_wrap_includes_zero_slots() {
        let mut buffer: SampleBuffer<4> = SampleBuffer::new();
        let (mut writer, reader) = buffer.split();

        writer.append(SensorSample::new(30, 60));

        let ordered: heapless::Vec<SensorSample, 4> = reader.chronological().collect();
        assert_eq!(
            ordered.as_slice(),
            &[
                SensorSample::ZERO,
                SensorSample::ZERO,
                SensorSample::ZERO,
                SensorSample::new(30, 60)
            ]
        );
    }

    #[test]
    fn test_latest_on_empty_buffer_is_zero() {
        let buffer: SampleBuffer<4> = SampleBuffer::new();
        assert_eq!(buffer.reader().latest(), SensorSample::ZERO);
    }

    #[test]
    fn test_negative_temperature_survives_packing() {
        let mut buffer: SampleBuffer<2> = SampleBuffer::new();
        let (mut writer, reader) = buffer.split();

        writer.append(SensorSample::new(-17, 99));
        assert_eq!(reader.get(0), Some(SensorSample::new(-17, 99)));
    }

    #[test]
    fn test_from_readings_truncates() {
        assert_eq!(
            SensorSample::from_readings(23.9, 45.7),
            Some(SensorSample::new(23, 45))
        );
        assert_eq!(
            SensorSample::from_readings(-4.8, 0.4),
            Some(SensorSample::new(-4, 0))
        );
    }

    #[test]
    fn test_from_readings_rejects_nan() {
        assert_eq!(SensorSample::from_readings(f32::NAN, 50.0), None);
        assert_eq!(SensorSample::from_readings(20.0, f32::NAN), None);
        assert_eq!(SensorSample::from_readings(f32::NAN, f32::NAN), None);
    }

    #[test]
    fn test_reader_from_writer_sees_writes() {
        let mut buffer: SampleBuffer<2> = SampleBuffer::new();
        let (mut writer, _) = buffer.split();
        let reader = writer.reader();

        writer.append(SensorSample::new(5, 5));
        writer.append(SensorSample::new(6, 6));
        assert_eq!(reader.cursor(), 0);
        assert_eq!(reader.latest(), SensorSample::new(6, 6));
    }

    proptest! {
        #[test]
        fn prop_cursor_is_count_mod_capacity(count in 0usize..200) {
            let mut buffer: SampleBuffer<7> = SampleBuffer::new();
            let (mut writer, reader) = buffer.split();

            for k in 0..count {
                writer.append(SensorSample::new(k as i16, 1));
            }

            prop_assert_eq!(reader.cursor(), count % 7);
            prop_assert!(reader.cursor() < reader.capacity());
        }

        #[test]
        fn prop_pack_roundtrip(t in any::<i16>(), h in any::<u8>()) {
            let sample = SensorSample::new(t, h);
            prop_assert_eq!(SensorSample::unpack(sample.pack()), sample);
        }
    }
}
