use crate::values::Interpolatable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationMode {
    #[default]
    Linear,
    Step,
}

/// Keys sorted by time, at most one per time.
#[derive(Debug, Clone, Default)]
pub struct KeyframeTrack<T: Interpolatable> {
    pub(crate) times: Vec<f32>,
    pub(crate) values: Vec<T>,
    pub interpolation: InterpolationMode,
}

impl<T: Interpolatable> KeyframeTrack<T> {
    /// Builds a track from parallel time/value lists.
    ///
    /// Keys are sorted by time; when a time repeats, the last value wins.
    #[must_use]
    pub fn new(times: Vec<f32>, values: Vec<T>, interpolation: InterpolationMode) -> Self {
        let mut track = Self {
            times: Vec::with_capacity(times.len()),
            values: Vec::with_capacity(values.len()),
            interpolation,
        };
        for (time, value) in times.into_iter().zip(values) {
            track.insert(time, value);
        }
        track
    }

    #[must_use]
    pub fn times(&self) -> &[f32] {
        &self.times
    }

    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Inserts a key, replacing any key already at `time`.
    ///
    /// Keys inserted in ascending time order are appended without shifting.
    pub fn insert(&mut self, time: f32, value: T) {
        // Fast path: the bake writes frames in ascending order
        if self.times.last().is_none_or(|&last| time > last) {
            self.times.push(time);
            self.values.push(value);
            return;
        }

        let idx = self.times.partition_point(|&t| t < time);
        if self.times.get(idx) == Some(&time) {
            self.values[idx] = value;
        } else {
            self.times.insert(idx, time);
            self.values.insert(idx, value);
        }
    }

    /// Value of the key exactly at `time`, if there is one.
    #[must_use]
    pub fn key_at(&self, time: f32) -> Option<T> {
        let idx = self.times.partition_point(|&t| t < time);
        (self.times.get(idx) == Some(&time)).then(|| self.values[idx])
    }

    /// Evaluates the curve at `time`, holding the first and last values
    /// outside the keyed range. Returns `None` for an empty track.
    #[must_use]
    pub fn sample(&self, time: f32) -> Option<T> {
        let first = *self.values.first()?;
        let after = self.times.partition_point(|&t| t <= time);
        if after == 0 {
            return Some(first);
        }
        if after == self.times.len() {
            return self.values.last().copied();
        }

        let before = after - 1;
        let (from, to) = (self.values[before], self.values[after]);
        Some(match self.interpolation {
            InterpolationMode::Step => from,
            InterpolationMode::Linear => {
                // Keys are unique, so the span is never zero
                let span = self.times[after] - self.times[before];
                let t = ((time - self.times[before]) / span).clamp(0.0, 1.0);
                T::interpolate_linear(from, to, t)
            }
        })
    }
}
