//! Autocorrelation-based pitch estimation
//!
//! Estimates the fundamental frequency of a single audio block by finding
//! the first strongly correlated lag in its autocorrelation function.
//!
//! # Algorithm
//!
//! 1. Gate the block on RMS energy (silence/noise produces no pitch)
//! 2. Compute the autocorrelation using FFT acceleration:
//!    `ACF = IFFT(|FFT(signal)|²)`
//! 3. Scan lags within the melodic range (80-1000 Hz), normalized against
//!    the zero-lag energy
//! 4. Select the *first* local maximum whose correlation exceeds the
//!    high-confidence threshold (0.9) - not the global maximum. Scanning
//!    stops once correlation falls after a good candidate, which avoids
//!    octave errors from later, weaker peaks
//! 5. Convert the chosen lag to frequency: `f = sample_rate / lag`

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

use crate::config::EngineConfig;
use crate::error::RecognitionError;

const EPSILON: f32 = 1e-10;

/// Autocorrelation pitch estimator
///
/// Holds the tunable thresholds; construct one per capture stream and feed
/// it fixed-size sample blocks.
#[derive(Debug, Clone)]
pub struct PitchEstimator {
    /// Minimum RMS amplitude for a voiced block
    rms_gate: f32,

    /// Normalized correlation threshold for a high-confidence lag
    correlation_threshold: f32,

    /// Lowest accepted frequency in Hz
    min_frequency_hz: f32,

    /// Highest accepted frequency in Hz
    max_frequency_hz: f32,
}

impl PitchEstimator {
    /// Create an estimator from the engine configuration
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            rms_gate: config.rms_gate,
            correlation_threshold: config.correlation_threshold,
            min_frequency_hz: config.min_frequency_hz,
            max_frequency_hz: config.max_frequency_hz,
        }
    }

    /// Estimate the fundamental frequency of one sample block
    ///
    /// # Arguments
    ///
    /// * `samples` - Time-domain samples, normalized to [-1.0, 1.0]
    /// * `sample_rate` - Sample rate in Hz
    ///
    /// # Returns
    ///
    /// `Some(frequency)` in Hz, or `None` when the block is silent, no lag
    /// correlates strongly enough, or the estimate falls outside the melodic
    /// range.
    ///
    /// # Errors
    ///
    /// Returns `RecognitionError::InvalidInput` for an empty block or a zero
    /// sample rate.
    pub fn estimate(
        &self,
        samples: &[f32],
        sample_rate: u32,
    ) -> Result<Option<f32>, RecognitionError> {
        if samples.is_empty() {
            return Err(RecognitionError::InvalidInput(
                "Empty sample block".to_string(),
            ));
        }

        if sample_rate == 0 {
            return Err(RecognitionError::InvalidInput(
                "Invalid sample rate: 0".to_string(),
            ));
        }

        // Noise gate: silent blocks produce no pitch, not an error
        let rms = (samples.iter().map(|s| s * s).sum::<f32>() / samples.len() as f32).sqrt();
        if rms < self.rms_gate {
            return Ok(None);
        }

        let acf = compute_autocorrelation_fft(samples);
        let energy = acf[0];
        if energy < EPSILON {
            return Ok(None);
        }

        // Lag window for the melodic range, capped at half the block length
        let min_lag = ((sample_rate as f32 / self.max_frequency_hz).ceil() as usize).max(1);
        let max_lag = ((sample_rate as f32 / self.min_frequency_hz).floor() as usize)
            .min(samples.len() / 2);

        if min_lag >= max_lag {
            log::debug!(
                "Block too short for melodic lag range: [{}, {}] at {} samples",
                min_lag,
                max_lag,
                samples.len()
            );
            return Ok(None);
        }

        // First local maximum above the threshold: track the best lag while
        // correlation is above the threshold and still rising, stop once it
        // falls after a good candidate. The rising requirement rejects the
        // high-but-decaying correlation that slow sub-melodic oscillations
        // show at short lags.
        let mut best_lag = 0usize;
        let mut best_correlation = 0.0f32;
        let mut previous = f32::MAX;
        let mut found = false;

        for lag in min_lag..=max_lag {
            let correlation = acf[lag] / energy;

            if correlation > self.correlation_threshold
                && correlation > previous
                && correlation > best_correlation
            {
                best_correlation = correlation;
                best_lag = lag;
                found = true;
            } else if found && correlation < best_correlation {
                break;
            }

            previous = correlation;
        }

        if !found {
            return Ok(None);
        }

        let frequency = sample_rate as f32 / best_lag as f32;
        if frequency < self.min_frequency_hz || frequency > self.max_frequency_hz {
            return Ok(None);
        }

        log::debug!(
            "Pitch estimate: {:.1} Hz (lag {}, correlation {:.3}, rms {:.4})",
            frequency,
            best_lag,
            best_correlation,
            rms
        );

        Ok(Some(frequency))
    }
}

/// Compute autocorrelation using FFT acceleration
///
/// Uses the identity `ACF = IFFT(|FFT(signal)|²)` with zero-padding to the
/// next power of two, so the result is the linear (non-circular)
/// autocorrelation.
fn compute_autocorrelation_fft(signal: &[f32]) -> Vec<f32> {
    let n = signal.len();
    let fft_size = (2 * n).next_power_of_two();

    let mut buffer: Vec<Complex<f32>> = signal.iter().map(|&x| Complex::new(x, 0.0)).collect();
    buffer.resize(fft_size, Complex::new(0.0, 0.0));

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(fft_size);
    fft.process(&mut buffer);

    for x in &mut buffer {
        *x = *x * x.conj();
    }

    let ifft = planner.plan_fft_inverse(fft_size);
    ifft.process(&mut buffer);

    let scale = 1.0 / (fft_size as f32);
    buffer[..n].iter().map(|x| x.re * scale).collect()
}
